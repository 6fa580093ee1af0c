//! SDL operation - print a compiled schema.

use std::{path::Path, sync::Arc};

use eyre::{Context, Result};
use schemata_blueprint::Blueprint;
use schemata_compiler::{Pipeline, SdlPrinter, SnapshotPlugin};
use schemata_core::OutputFile;

use crate::{
    adapter::AdapterKind,
    reports::{SdlReport, Written},
};

/// The default pipeline, plus a snapshot plugin writing into `visualize`.
pub fn snapshot_pipeline(visualize: Option<&Path>) -> (Pipeline, Option<Arc<SnapshotPlugin>>) {
    match visualize {
        Some(dir) => {
            let plugin = Arc::new(SnapshotPlugin::with_output_dir(dir));
            (Pipeline::new().plugin(Arc::clone(&plugin)), Some(plugin))
        }
        None => (Pipeline::new(), None),
    }
}

/// Print `blueprint` and write it to `output` when given.
pub fn sdl(blueprint: &Blueprint, adapter: AdapterKind, output: Option<&Path>) -> Result<SdlReport> {
    let sdl = SdlPrinter::new(blueprint)
        .adapter(adapter.adapter())
        .print()
        .wrap_err("Failed to print SDL")?;

    let written = match output {
        Some(path) => {
            let result = OutputFile::new(path, sdl.as_str())
                .write()
                .wrap_err_with(|| format!("Failed to write {}", path.display()))?;
            Some(Written {
                path: path.to_path_buf(),
                result,
            })
        }
        None => None,
    };

    Ok(SdlReport {
        sdl,
        written,
        snapshots: None,
    })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use schemata_core::WriteResult;
    use schemata_manifest::Manifest;
    use tempfile::TempDir;

    use super::*;
    use crate::ops::compile;

    const APP: &str = r#"
[module]
name = "app"

[objects.query.fields.hello_world]
type = "string"

[objects.query.fields.hello_world.args.name]
type = "string!"
"#;

    fn compiled() -> Blueprint {
        let manifest: Manifest = APP.parse().unwrap();
        compile(&[manifest], &Pipeline::new()).unwrap()
    }

    #[test]
    fn test_writes_sdl_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("out").join("schema.graphql");

        let report = sdl(&compiled(), AdapterKind::Camel, Some(path.as_path())).unwrap();
        assert_eq!(report.written.as_ref().unwrap().result, WriteResult::Written);

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written, report.sdl);
        assert!(written.contains("helloWorld(name: String!): String"));

        let again = sdl(&compiled(), AdapterKind::Camel, Some(path.as_path())).unwrap();
        assert_eq!(again.written.unwrap().result, WriteResult::Unchanged);
    }

    #[test]
    fn test_passthrough_adapter() {
        let report = sdl(&compiled(), AdapterKind::Passthrough, None).unwrap();
        assert!(report.written.is_none());
        assert!(report.sdl.contains("hello_world(name: String!): String"));
    }

    #[test]
    fn test_visualize_writes_one_snapshot_per_phase() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("debug");
        let (pipeline, plugin) = snapshot_pipeline(Some(dir.as_path()));

        let manifest: Manifest = APP.parse().unwrap();
        compile(&[manifest], &pipeline).unwrap();

        assert_eq!(plugin.unwrap().snapshots().len(), pipeline.len());
        assert!(dir.join("01-imports.json").exists());
        assert!(dir.join("06-hydrate.json").exists());
    }
}
