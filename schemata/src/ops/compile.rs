//! Loading and compiling schema modules.

use std::path::PathBuf;

use schemata_blueprint::Blueprint;
use schemata_compiler::{Pipeline, lower};
use schemata_manifest::Manifest;
use tracing::debug;

use crate::reports::FailureReport;

/// Parse every schema module, in order. The first one is the root module.
pub fn load(paths: &[PathBuf]) -> schemata_manifest::Result<Vec<Manifest>> {
    paths.iter().map(Manifest::from_file).collect()
}

/// Lower the modules and run them through `pipeline`.
pub fn compile(manifests: &[Manifest], pipeline: &Pipeline) -> Result<Blueprint, FailureReport> {
    let blueprint = lower(manifests).map_err(FailureReport::from_lowering)?;
    debug!(
        types = blueprint.type_count(),
        phases = pipeline.len(),
        "running pipeline"
    );
    Ok(pipeline.run(blueprint)?)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_load_keeps_order() {
        let temp = TempDir::new().unwrap();
        let shared = temp.path().join("shared.toml");
        let app = temp.path().join("app.toml");
        fs::write(&shared, "[module]\nname = \"shared\"\n").unwrap();
        fs::write(&app, "[module]\nname = \"app\"\n").unwrap();

        let manifests = load(&[app, shared]).unwrap();
        let names: Vec<_> = manifests.iter().map(|m| m.name()).collect();
        assert_eq!(names, ["app", "shared"]);
    }

    #[test]
    fn test_lowering_errors_are_reported_as_lower() {
        let first: Manifest = "[module]\nname = \"a\"\n[objects.user]\n".parse().unwrap();
        let second: Manifest = "[module]\nname = \"b\"\n[objects.user]\n".parse().unwrap();

        let failure = compile(&[first, second], &Pipeline::new()).unwrap_err();
        assert_eq!(failure.phase, "lower");
        assert_eq!(failure.errors.len(), 1);
    }
}
