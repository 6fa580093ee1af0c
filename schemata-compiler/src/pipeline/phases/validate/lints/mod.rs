//! Built-in lints for blueprint validation.

mod duplicate_enum_alias;
mod naming;
mod printed_name;
mod reserved_prefix;

pub use duplicate_enum_alias::DuplicateEnumAliasLint;
pub use naming::NamingLint;
pub use printed_name::PrintedNameLint;
pub use reserved_prefix::ReservedPrefixLint;

use schemata_blueprint::{Blueprint, NodeId, TypeDefinition};

/// Every user-authored name with its node, in registration order.
///
/// Enum values are listed by key; their aliases are printed verbatim and
/// are not subject to naming rules.
pub(crate) fn named_nodes(blueprint: &Blueprint) -> Vec<(&str, NodeId)> {
    let mut nodes = Vec::new();
    for ty in blueprint.types().filter(|ty| !ty.is_builtin()) {
        nodes.push((ty.name(), NodeId::for_type(ty.name())));

        for field in ty.fields().into_iter().flat_map(|f| f.values()) {
            nodes.push((
                field.name.as_str(),
                NodeId::for_field(ty.name(), &field.name),
            ));
            for arg in field.arguments.values() {
                nodes.push((
                    arg.name.as_str(),
                    NodeId::for_argument(ty.name(), &field.name, &arg.name),
                ));
            }
        }

        if let TypeDefinition::Enum(enum_type) = ty {
            for value in enum_type.values.values() {
                nodes.push((
                    value.key.as_str(),
                    NodeId::for_enum_value(ty.name(), &value.key),
                ));
            }
        }
    }
    nodes
}

/// Human readable location of a node, e.g. ``field `User.name` ``.
pub(crate) fn describe(node: &NodeId) -> String {
    let kind = match node {
        NodeId::Schema => "schema",
        NodeId::Type { .. } => "type",
        NodeId::Field { .. } => "field",
        NodeId::Argument { .. } => "argument",
        NodeId::EnumValue { .. } => "enum value",
    };
    format!("{kind} `{node}`")
}
