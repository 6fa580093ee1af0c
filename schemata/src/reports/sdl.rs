//! SDL command report data structures.

use std::path::PathBuf;

use schemata_core::WriteResult;

use super::output::{Output, Report};

/// Report data from printing a compiled schema.
#[derive(Debug)]
pub struct SdlReport {
    /// The printed SDL.
    pub sdl: String,
    /// Where the SDL went, if it was written to a file.
    pub written: Option<Written>,
    /// Phase snapshots taken for `--visualize`.
    pub snapshots: Option<SnapshotSummary>,
}

#[derive(Debug)]
pub struct Written {
    pub path: PathBuf,
    pub result: WriteResult,
}

#[derive(Debug)]
pub struct SnapshotSummary {
    pub dir: PathBuf,
    pub count: usize,
}

impl Report for SdlReport {
    fn render(&self, out: &mut dyn Output) {
        match &self.written {
            None => out.preformatted(&self.sdl),
            Some(Written {
                path,
                result: WriteResult::Written,
            }) => out.success(&format!("wrote {}", path.display())),
            Some(Written {
                path,
                result: WriteResult::Unchanged,
            }) => out.success(&format!("{} is up to date", path.display())),
        }

        if let Some(snapshots) = &self.snapshots {
            out.note(&format!(
                "wrote {} phase snapshots to {}",
                snapshots.count,
                snapshots.dir.display()
            ));
        }
    }
}
