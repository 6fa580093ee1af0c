//! Check operation - compile without printing.

use std::path::PathBuf;

use schemata_compiler::Pipeline;
use schemata_manifest::Manifest;

use super::compile;
use crate::reports::{CheckReport, FailureReport};

/// Execute the check operation.
///
/// Runs the full pipeline and summarizes the compiled schema.
pub fn check(manifests: &[Manifest], schemas: &[PathBuf]) -> Result<CheckReport, FailureReport> {
    let blueprint = compile(manifests, &Pipeline::new())?;

    Ok(CheckReport {
        schemas: schemas.to_vec(),
        roots: blueprint
            .schema()
            .roots()
            .into_iter()
            .map(|(op, name)| (op.to_string(), name.to_string()))
            .collect(),
        type_count: blueprint.types().filter(|ty| !ty.is_builtin()).count(),
    })
}
