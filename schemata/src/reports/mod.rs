//! Report data structures for commands.
//!
//! This module provides data structures that separate data collection from rendering.
//! Commands build reports, then render them to an Output target.

mod check;
mod explain;
mod failure;
mod output;
mod sdl;

pub use check::CheckReport;
pub use explain::{ExplainReport, LintInfo, ModuleInfo, PhaseInfo, TypeCounts};
pub use failure::FailureReport;
pub use output::{Report, TerminalOutput};
pub use sdl::{SdlReport, SnapshotSummary, Written};
