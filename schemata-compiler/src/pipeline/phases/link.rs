//! Link phase - resolves type references.

use indexmap::IndexMap;
use schemata_blueprint::{Blueprint, FieldDefinition, TypeDefinition, TypeRef};

use crate::{
    Error, PhaseErrors,
    pipeline::{Phase, PhaseResult},
};

/// Phase that checks every type reference and computes interface implementors.
///
/// Checked references: root operation types, field, argument and input
/// field types, union members, and declared interfaces.
pub struct LinkPhase;

impl Phase for LinkPhase {
    fn name(&self) -> &str {
        "link"
    }

    fn description(&self) -> &str {
        "Resolve type references and compute interface implementors"
    }

    fn run(&self, mut blueprint: Blueprint) -> PhaseResult {
        let mut errors = PhaseErrors::new();
        check_roots(&blueprint, &mut errors);
        for ty in blueprint.types() {
            check_type(&blueprint, ty, &mut errors);
        }
        if !errors.is_empty() {
            return Err(errors);
        }

        stamp_parents(&mut blueprint);
        compute_implementors(&mut blueprint);
        Ok(blueprint)
    }
}

fn check_roots(blueprint: &Blueprint, errors: &mut PhaseErrors) {
    let schema = blueprint.schema();
    if schema.query.is_none() {
        errors.push(Error::MissingQueryRoot);
    }

    for (operation, name) in schema.roots() {
        match blueprint.find_type(name) {
            None => errors.push(Error::UnknownType {
                name: name.to_string(),
                location: format!("schema {operation} root"),
            }),
            Some(TypeDefinition::Object(_)) => {}
            Some(other) => errors.push(Error::InvalidRootType {
                operation: operation.to_string(),
                name: name.to_string(),
                kind: other.kind(),
            }),
        }
    }
}

fn check_type(blueprint: &Blueprint, ty: &TypeDefinition, errors: &mut PhaseErrors) {
    match ty {
        TypeDefinition::Object(_) | TypeDefinition::Interface(_) => {
            for interface in ty.interfaces() {
                match blueprint.find_type(interface) {
                    None => errors.push(Error::UnknownType {
                        name: interface.clone(),
                        location: format!("interfaces of `{}`", ty.name()),
                    }),
                    Some(TypeDefinition::Interface(_)) => {}
                    Some(_) => errors.push(Error::NotAnInterface {
                        type_name: ty.name().to_string(),
                        name: interface.clone(),
                    }),
                }
            }
            for field in ty.fields().into_iter().flat_map(|f| f.values()) {
                check_field(blueprint, ty.name(), field, errors);
            }
        }
        TypeDefinition::InputObject(input) => {
            for field in input.fields.values() {
                check_ref(
                    blueprint,
                    &field.type_ref,
                    || format!("input field `{}.{}`", input.name, field.name),
                    errors,
                );
            }
        }
        TypeDefinition::Union(union) => {
            for member in &union.types {
                match blueprint.find_type(member) {
                    None => errors.push(Error::UnknownType {
                        name: member.clone(),
                        location: format!("union `{}`", union.name),
                    }),
                    Some(TypeDefinition::Object(_)) => {}
                    Some(_) => errors.push(Error::InvalidUnionMember {
                        union_name: union.name.clone(),
                        member: member.clone(),
                    }),
                }
            }
        }
        TypeDefinition::Enum(_) | TypeDefinition::Scalar(_) => {}
    }
}

fn check_field(
    blueprint: &Blueprint,
    type_name: &str,
    field: &FieldDefinition,
    errors: &mut PhaseErrors,
) {
    check_ref(
        blueprint,
        &field.type_ref,
        || format!("field `{type_name}.{}`", field.name),
        errors,
    );
    for arg in field.arguments.values() {
        check_ref(
            blueprint,
            &arg.type_ref,
            || format!("argument `{type_name}.{}({})`", field.name, arg.name),
            errors,
        );
    }
}

fn check_ref(
    blueprint: &Blueprint,
    type_ref: &TypeRef,
    location: impl FnOnce() -> String,
    errors: &mut PhaseErrors,
) {
    let name = type_ref.base_name();
    if !blueprint.contains_type(name) {
        errors.push(Error::UnknownType {
            name: name.to_string(),
            location: location(),
        });
    }
}

fn stamp_parents(blueprint: &mut Blueprint) {
    for ty in blueprint.types_mut() {
        let name = ty.name().to_string();
        if let Some(fields) = ty.fields_mut() {
            for field in fields.values_mut() {
                field.parent.clone_from(&name);
            }
        }
    }
}

fn compute_implementors(blueprint: &mut Blueprint) {
    let mut implementors: IndexMap<String, Vec<String>> = IndexMap::new();
    for ty in blueprint.types() {
        if let TypeDefinition::Object(object) = ty {
            for interface in &object.interfaces {
                implementors
                    .entry(interface.clone())
                    .or_default()
                    .push(object.name.clone());
            }
        }
    }

    for ty in blueprint.types_mut() {
        if let TypeDefinition::Interface(interface) = ty {
            interface.implementors = implementors
                .shift_remove(&interface.name)
                .unwrap_or_default();
        }
    }
}
