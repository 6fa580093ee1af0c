//! Explain operation - pipeline explanation.

use std::path::PathBuf;

use schemata_blueprint::{Blueprint, TypeDefinition};
use schemata_compiler::{Pipeline, pipeline::phases::ValidatePhase};
use schemata_manifest::Manifest;

use super::compile;
use crate::reports::{
    ExplainReport, FailureReport, LintInfo, ModuleInfo, PhaseInfo, TypeCounts,
};

/// Execute the explain operation.
///
/// Runs the pipeline and returns information about what it does.
pub fn explain(
    manifests: &[Manifest],
    schemas: &[PathBuf],
) -> Result<ExplainReport, FailureReport> {
    let pipeline = Pipeline::new();
    let validate_phase = ValidatePhase::new();

    let modules = manifests
        .iter()
        .zip(schemas)
        .map(|(manifest, path)| ModuleInfo {
            path: path.clone(),
            name: manifest.name().to_string(),
            type_count: manifest.declarations().count(),
        })
        .collect();

    let phases = pipeline
        .phase_info()
        .into_iter()
        .map(|p| PhaseInfo {
            name: p.name,
            description: p.description,
        })
        .collect();

    let lints = validate_phase
        .lint_info()
        .into_iter()
        .map(|l| LintInfo {
            name: l.name.to_string(),
            description: l.description.to_string(),
        })
        .collect();

    let blueprint = compile(manifests, &pipeline)?;

    Ok(ExplainReport {
        modules,
        phases,
        lints,
        roots: blueprint
            .schema()
            .roots()
            .into_iter()
            .map(|(op, name)| (op.to_string(), name.to_string()))
            .collect(),
        types: type_counts(&blueprint),
    })
}

fn type_counts(blueprint: &Blueprint) -> TypeCounts {
    let mut counts = TypeCounts::default();
    for ty in blueprint.types().filter(|ty| !ty.is_builtin()) {
        match ty {
            TypeDefinition::Object(_) => counts.objects += 1,
            TypeDefinition::Interface(_) => counts.interfaces += 1,
            TypeDefinition::Union(_) => counts.unions += 1,
            TypeDefinition::Enum(_) => counts.enums += 1,
            TypeDefinition::InputObject(_) => counts.inputs += 1,
            TypeDefinition::Scalar(_) => counts.scalars += 1,
        }
    }
    counts
}
