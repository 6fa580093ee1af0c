//! Defaults phase - renders every default value once.

use schemata_blueprint::Blueprint;

use crate::{
    LiteralRenderer, PhaseErrors,
    pipeline::{Phase, PhaseResult},
};

/// Phase that renders each argument and input field default through the
/// literal renderer, so a compiled blueprint always prints.
pub struct DefaultsPhase;

impl Phase for DefaultsPhase {
    fn name(&self) -> &str {
        "defaults"
    }

    fn description(&self) -> &str {
        "Check that every default value renders as a literal"
    }

    fn run(&self, blueprint: Blueprint) -> PhaseResult {
        let mut errors = PhaseErrors::new();
        let renderer = LiteralRenderer::new(&blueprint);

        for ty in blueprint.types() {
            for field in ty.fields().into_iter().flat_map(|f| f.values()) {
                if let Some(value) = &field.default_value
                    && let Err(err) = renderer.render(&field.type_ref, value)
                {
                    errors.push(err);
                }

                for arg in field.arguments.values() {
                    if let Some(value) = &arg.default_value
                        && let Err(err) = renderer.render(&arg.type_ref, value)
                    {
                        errors.push(err);
                    }
                }
            }
        }

        errors.into_result(blueprint)
    }
}
