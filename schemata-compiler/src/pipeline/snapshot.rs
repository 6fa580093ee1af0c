//! Pipeline snapshot plugin for visualization and debugging.
//!
//! This module provides a plugin that captures the blueprint after each phase,
//! so the effect of every phase can be inspected on its own.

use std::{
    fs,
    path::{Path, PathBuf},
    sync::{PoisonError, RwLock},
};

use eyre::Result;
use schemata_blueprint::Blueprint;
use serde::Serialize;

use super::Plugin;

/// The blueprint as it stood after one phase.
#[derive(Debug, Clone, Serialize)]
pub struct PhaseSnapshot {
    /// 1-based position of the phase in the run.
    pub index: usize,

    /// The phase that just completed.
    pub phase: String,

    /// The blueprint it produced. Behaviors are not included.
    pub blueprint: serde_json::Value,
}

impl PhaseSnapshot {
    /// File name used when writing the snapshot, e.g. `02-link.json`.
    pub fn file_name(&self) -> String {
        format!("{:02}-{}.json", self.index, self.phase)
    }
}

/// A plugin that captures pipeline state after each phase.
///
/// The CLI uses this plugin for its `--visualize` flag.
///
/// # Example
///
/// ```ignore
/// let snapshots = Arc::new(SnapshotPlugin::new());
/// let pipeline = Pipeline::new().plugin(snapshots.clone());
/// let blueprint = pipeline.run(blueprint)?;
///
/// // Write snapshots to disk
/// snapshots.write_to_dir(".schemata/debug")?;
/// ```
pub struct SnapshotPlugin {
    /// Collected snapshots.
    snapshots: RwLock<Vec<PhaseSnapshot>>,
    /// Output directory for snapshots.
    output_dir: Option<PathBuf>,
}

impl SnapshotPlugin {
    /// Create a new snapshot plugin.
    pub fn new() -> Self {
        Self {
            snapshots: RwLock::new(Vec::new()),
            output_dir: None,
        }
    }

    /// Create a new snapshot plugin that writes each snapshot to a directory
    /// as soon as it is taken.
    pub fn with_output_dir(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            snapshots: RwLock::new(Vec::new()),
            output_dir: Some(output_dir.into()),
        }
    }

    /// Get all collected snapshots.
    pub fn snapshots(&self) -> Vec<PhaseSnapshot> {
        self.snapshots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Write all snapshots to `dir`.
    pub fn write_to_dir(&self, dir: impl AsRef<Path>) -> Result<()> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;

        for snapshot in self
            .snapshots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
        {
            write_snapshot(dir, snapshot)?;
        }

        Ok(())
    }

    fn capture_snapshot(&self, phase: &str, blueprint: &Blueprint) -> Result<PhaseSnapshot> {
        let mut snapshots = self
            .snapshots
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let snapshot = PhaseSnapshot {
            index: snapshots.len() + 1,
            phase: phase.to_string(),
            blueprint: serde_json::to_value(blueprint)?,
        };
        snapshots.push(snapshot.clone());
        Ok(snapshot)
    }
}

fn write_snapshot(dir: &Path, snapshot: &PhaseSnapshot) -> Result<()> {
    let json = serde_json::to_string_pretty(snapshot)?;
    fs::write(dir.join(snapshot.file_name()), json)?;
    Ok(())
}

impl Default for SnapshotPlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for SnapshotPlugin {
    fn name(&self) -> &'static str {
        "snapshot"
    }

    fn on_after_phase(&self, phase: &str, blueprint: &Blueprint) -> Result<()> {
        let snapshot = self.capture_snapshot(phase, blueprint)?;

        // If output directory is configured, write immediately
        if let Some(ref dir) = self.output_dir {
            fs::create_dir_all(dir)?;
            write_snapshot(dir, &snapshot)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use schemata_blueprint::ObjectType;

    use super::*;

    #[test]
    fn test_snapshot_plugin_creation() {
        let plugin = SnapshotPlugin::new();
        assert!(plugin.snapshots().is_empty());
    }

    #[test]
    fn test_snapshots_are_numbered() {
        let plugin = SnapshotPlugin::new();
        let bp = Blueprint::new().add_type(ObjectType::new("Query")).unwrap();

        plugin.on_after_phase("imports", &bp).unwrap();
        plugin.on_after_phase("link", &bp).unwrap();

        let snapshots = plugin.snapshots();
        assert_eq!(snapshots.len(), 2);
        assert_eq!(snapshots[1].file_name(), "02-link.json");
        assert_eq!(snapshots[0].blueprint["types"]["Query"]["kind"], "object");
    }

    #[test]
    fn test_writes_to_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let plugin = SnapshotPlugin::with_output_dir(dir.path().join("debug"));

        plugin.on_after_phase("link", &Blueprint::new()).unwrap();

        let written = fs::read_to_string(dir.path().join("debug/01-link.json")).unwrap();
        assert!(written.contains("\"phase\": \"link\""));
    }
}
