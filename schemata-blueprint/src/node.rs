//! Node identities and borrowed node views.

use std::fmt;

use serde::Serialize;

use crate::{
    ArgumentDefinition, EnumValueDefinition, FieldDefinition, SchemaDefinition, TypeDefinition,
};

/// Stable identity of a node in the blueprint.
///
/// Nodes are addressed by name paths rather than references, so a field's
/// link to its owning type is a lookup and never an ownership edge.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(tag = "node", rename_all = "snake_case")]
pub enum NodeId {
    Schema,
    Type {
        type_name: String,
    },
    Field {
        type_name: String,
        field: String,
    },
    Argument {
        type_name: String,
        field: String,
        argument: String,
    },
    EnumValue {
        type_name: String,
        value: String,
    },
}

impl NodeId {
    pub fn for_type(type_name: impl Into<String>) -> Self {
        Self::Type {
            type_name: type_name.into(),
        }
    }

    pub fn for_field(type_name: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Field {
            type_name: type_name.into(),
            field: field.into(),
        }
    }

    pub fn for_argument(
        type_name: impl Into<String>,
        field: impl Into<String>,
        argument: impl Into<String>,
    ) -> Self {
        Self::Argument {
            type_name: type_name.into(),
            field: field.into(),
            argument: argument.into(),
        }
    }

    pub fn for_enum_value(type_name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::EnumValue {
            type_name: type_name.into(),
            value: value.into(),
        }
    }

    /// The owning type name, if the node lives inside a type.
    pub fn type_name(&self) -> Option<&str> {
        match self {
            Self::Schema => None,
            Self::Type { type_name }
            | Self::Field { type_name, .. }
            | Self::Argument { type_name, .. }
            | Self::EnumValue { type_name, .. } => Some(type_name),
        }
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Schema => f.write_str("schema"),
            Self::Type { type_name } => f.write_str(type_name),
            Self::Field { type_name, field } => write!(f, "{type_name}.{field}"),
            Self::Argument {
                type_name,
                field,
                argument,
            } => write!(f, "{type_name}.{field}({argument})"),
            Self::EnumValue { type_name, value } => write!(f, "{type_name}::{value}"),
        }
    }
}

/// A borrowed view of one node, handed to hydrators.
#[derive(Debug, Clone, Copy)]
pub enum Node<'a> {
    Schema(&'a SchemaDefinition),
    Type(&'a TypeDefinition),
    Field(&'a FieldDefinition),
    Argument(&'a ArgumentDefinition),
    EnumValue(&'a EnumValueDefinition),
}

impl<'a> Node<'a> {
    /// The node's own name. The schema node is called `schema`.
    pub fn name(&self) -> &'a str {
        match self {
            Node::Schema(_) => "schema",
            Node::Type(ty) => ty.name(),
            Node::Field(field) => &field.name,
            Node::Argument(arg) => &arg.name,
            Node::EnumValue(value) => &value.key,
        }
    }

    pub fn as_type(&self) -> Option<&'a TypeDefinition> {
        match self {
            Node::Type(ty) => Some(ty),
            _ => None,
        }
    }
}
