//! Lowering - turns parsed schema modules into the initial blueprint.
//!
//! Identifiers become GraphQL type names (`string` → `String`,
//! `search_result` → `SearchResult`). Field, argument and enum keys keep
//! their authored spelling; the printer's naming adapter decides how they
//! appear in SDL.

use std::collections::HashSet;

use schemata_blueprint::{
    ArgumentDefinition, BUILTIN_SCALARS, Blueprint, EnumType, EnumValueDefinition,
    FieldDefinition, FieldImport, InputObjectType, InterfaceType, ObjectType, ScalarType,
    SchemaDefinition, TypeDefinition, TypeRef, UnionType, Value,
};
use schemata_core::to_pascal_case;
use schemata_manifest::{
    Deprecated, EnumDef, EnumValueDef, FieldDef, ImportDef, InputDef, Manifest, ObjectDef,
    TypeExpr,
};
use tracing::debug;

use crate::{Error, PhaseErrors};

/// Build the initial blueprint from schema modules.
///
/// Types are registered module by module, section by section, in
/// declaration order. The first module to declare a root operation wins.
/// Without a declared query root, an object named `Query` is used.
///
/// # Errors
///
/// Every duplicate type and every conflicting root declaration is reported.
pub fn lower(manifests: &[Manifest]) -> Result<Blueprint, PhaseErrors> {
    let mut errors = PhaseErrors::new();
    let mut schema = SchemaDefinition::default();
    let mut types: Vec<TypeDefinition> = Vec::new();
    let mut seen: HashSet<String> = BUILTIN_SCALARS.iter().map(|s| s.to_string()).collect();

    for manifest in manifests {
        lower_roots(manifest, &mut schema, &mut errors);

        for ty in lower_types(manifest) {
            if seen.insert(ty.name().to_string()) {
                types.push(ty);
            } else {
                errors.push(schemata_blueprint::Error::DuplicateType {
                    name: ty.name().to_string(),
                });
            }
        }
    }

    let has_query_object = types
        .iter()
        .any(|ty| matches!(ty, TypeDefinition::Object(o) if o.name == "Query"));
    if schema.query.is_none() && has_query_object {
        schema.query = Some("Query".to_string());
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    debug!(
        modules = manifests.len(),
        types = types.len(),
        "lowered schema modules"
    );
    let blueprint = types
        .into_iter()
        .try_fold(Blueprint::new().with_schema(schema), |bp, ty| bp.add_type(ty))?;
    Ok(blueprint)
}

/// Map a schema identifier to its GraphQL type name.
pub fn type_name(identifier: &str) -> String {
    match identifier {
        "string" => "String".to_string(),
        "integer" | "int" => "Int".to_string(),
        "float" => "Float".to_string(),
        "boolean" | "bool" => "Boolean".to_string(),
        "id" => "ID".to_string(),
        other => to_pascal_case(other),
    }
}

fn lower_roots(manifest: &Manifest, schema: &mut SchemaDefinition, errors: &mut PhaseErrors) {
    for (operation, identifier) in manifest.schema.roots() {
        let name = type_name(identifier);
        let slot = match operation {
            "query" => &mut schema.query,
            "mutation" => &mut schema.mutation,
            _ => &mut schema.subscription,
        };

        match slot {
            None => *slot = Some(name),
            Some(first) if *first != name => errors.push(Error::DuplicateRootOperation {
                operation: operation.to_string(),
                first: first.clone(),
                second: name,
            }),
            Some(_) => {}
        }
    }
}

fn lower_types(manifest: &Manifest) -> Vec<TypeDefinition> {
    let module = manifest.name();
    let mut types = Vec::new();

    for (identifier, def) in &manifest.objects {
        types.push(lower_object(module, identifier, def).into());
    }
    for (identifier, def) in &manifest.interfaces {
        types.push(lower_interface(module, identifier, def).into());
    }
    for (identifier, def) in &manifest.unions {
        let mut union = UnionType::new(type_name(identifier)).with_module(module);
        union.description.clone_from(&def.description);
        for member in &def.types {
            union = union.with_member(type_name(member));
        }
        types.push(union.into());
    }
    for (identifier, def) in &manifest.enums {
        types.push(lower_enum(module, identifier, def).into());
    }
    for (identifier, def) in &manifest.inputs {
        types.push(lower_input(module, identifier, def).into());
    }
    for (identifier, def) in &manifest.scalars {
        let mut scalar = ScalarType::new(type_name(identifier)).with_module(module);
        scalar.description.clone_from(&def.description);
        types.push(scalar.into());
    }

    types
}

fn lower_object(module: &str, identifier: &str, def: &ObjectDef) -> ObjectType {
    let mut object = ObjectType::new(type_name(identifier)).with_module(module);
    object.description.clone_from(&def.description);
    for interface in &def.interfaces {
        object = object.with_interface(type_name(interface));
    }
    for import in &def.import_fields {
        object = object.with_import(lower_import(import));
    }
    for (name, field) in &def.fields {
        object = object.with_field(lower_field(name, field));
    }
    object
}

fn lower_interface(module: &str, identifier: &str, def: &ObjectDef) -> InterfaceType {
    let mut interface = InterfaceType::new(type_name(identifier)).with_module(module);
    interface.description.clone_from(&def.description);
    for parent in &def.interfaces {
        interface = interface.with_interface(type_name(parent));
    }
    for import in &def.import_fields {
        interface = interface.with_import(lower_import(import));
    }
    for (name, field) in &def.fields {
        interface = interface.with_field(lower_field(name, field));
    }
    interface
}

fn lower_enum(module: &str, identifier: &str, def: &EnumDef) -> EnumType {
    let mut enum_type = EnumType::new(type_name(identifier)).with_module(module);
    enum_type.description.clone_from(&def.description);
    for value in &def.values {
        enum_type = enum_type.with_value(lower_enum_value(value));
    }
    enum_type
}

fn lower_enum_value(def: &EnumValueDef) -> EnumValueDefinition {
    let mut value = EnumValueDefinition::new(def.key());
    if let Some(alias) = def.alias() {
        value = value.with_alias(alias);
    }
    if let Some(description) = def.description() {
        value = value.with_description(description);
    }
    if let Some(deprecated) = def.deprecated()
        && deprecated.is_deprecated()
    {
        value = value.deprecated(deprecated.reason());
    }
    value
}

fn lower_input(module: &str, identifier: &str, def: &InputDef) -> InputObjectType {
    let mut input = InputObjectType::new(type_name(identifier)).with_module(module);
    input.description.clone_from(&def.description);
    for import in &def.import_fields {
        input = input.with_import(lower_import(import));
    }
    for (name, field) in &def.fields {
        let mut lowered = FieldDefinition::new(name, lower_type(&field.field_type));
        lowered.description.clone_from(&field.description);
        lowered.default_value = field.default.as_ref().map(lower_value);
        input = input.with_field(lowered);
    }
    input
}

fn lower_field(name: &str, def: &FieldDef) -> FieldDefinition {
    let mut field = FieldDefinition::new(name, lower_type(&def.field_type));
    field.description.clone_from(&def.description);
    field = lower_deprecation(field, def.deprecated.as_ref());

    for (arg_name, arg) in &def.args {
        let mut argument = ArgumentDefinition::new(arg_name, lower_type(&arg.arg_type));
        argument.description.clone_from(&arg.description);
        argument.default_value = arg.default.as_ref().map(lower_value);
        field = field.with_argument(argument);
    }
    field
}

fn lower_deprecation(field: FieldDefinition, deprecated: Option<&Deprecated>) -> FieldDefinition {
    match deprecated {
        Some(d) if d.is_deprecated() => field.deprecated(d.reason()),
        _ => field,
    }
}

fn lower_import(def: &ImportDef) -> FieldImport {
    let mut import =
        FieldImport::new(type_name(def.source())).except(def.except().iter().cloned());
    if let Some(module) = def.module() {
        import = import.from_module(module);
    }
    import
}

fn lower_type(expr: &TypeExpr) -> TypeRef {
    match expr {
        TypeExpr::Named(name) => TypeRef::named(type_name(name)),
        TypeExpr::NonNull(inner) => TypeRef::non_null(lower_type(inner)),
        TypeExpr::List(inner) => TypeRef::list(lower_type(inner)),
    }
}

/// Convert a TOML default to a raw value.
pub fn lower_value(value: &toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s.clone()),
        toml::Value::Integer(i) => Value::Int(*i),
        toml::Value::Float(f) => Value::Float(*f),
        toml::Value::Boolean(b) => Value::Boolean(*b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => Value::List(items.iter().map(lower_value).collect()),
        toml::Value::Table(table) => Value::Object(
            table
                .iter()
                .map(|(k, v)| (k.clone(), lower_value(v)))
                .collect(),
        ),
    }
}
