//! Conformance phase - checks implementors against their interfaces.

use schemata_blueprint::{Blueprint, TypeDefinition};

use crate::{
    Error, PhaseErrors,
    pipeline::{Phase, PhaseResult},
    sdl::{Adapter, LanguageConventions},
};

/// Phase that requires every interface field to exist on each implementor.
///
/// Fields are matched by their printed name under [`LanguageConventions`],
/// so `display_name` satisfies an interface field `displayName`. Interfaces
/// implementing other interfaces are checked the same way as objects.
pub struct ConformancePhase;

impl Phase for ConformancePhase {
    fn name(&self) -> &str {
        "conformance"
    }

    fn description(&self) -> &str {
        "Check that implementors define every interface field"
    }

    fn run(&self, blueprint: Blueprint) -> PhaseResult {
        let mut errors = PhaseErrors::new();

        for ty in blueprint.types() {
            for interface_name in ty.interfaces() {
                let Some(TypeDefinition::Interface(interface)) =
                    blueprint.find_type(interface_name)
                else {
                    continue;
                };

                for field in interface.fields.keys() {
                    if !defines(ty, field) {
                        errors.push(Error::InterfaceConformanceViolation {
                            type_name: ty.name().to_string(),
                            interface: interface.name.clone(),
                            field: field.clone(),
                        });
                    }
                }
            }
        }

        errors.into_result(blueprint)
    }
}

fn defines(ty: &TypeDefinition, field: &str) -> bool {
    if ty.find_field(field).is_some() {
        return true;
    }
    let printed = LanguageConventions.field_name(field);
    ty.fields()
        .into_iter()
        .flat_map(|fields| fields.keys())
        .any(|name| LanguageConventions.field_name(name) == printed)
}
