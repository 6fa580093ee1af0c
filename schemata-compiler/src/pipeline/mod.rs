//! Compilation pipeline.
//!
//! A [`Pipeline`] is an ordered list of uniquely named [`Phase`]s. Each phase
//! consumes a [`Blueprint`](schemata_blueprint::Blueprint) and returns the
//! transformed one, or every error it found. The built-in sequence is:
//!
//! ```text
//! imports → link → validate → conformance → defaults → hydrate
//! ```
//!
//! Extra phases are spliced in by name:
//!
//! ```
//! use schemata_compiler::{Pipeline, phase_fn};
//!
//! let pipeline = Pipeline::new()
//!     .insert_after("link", phase_fn("audit", "Accept everything", |bp| Ok(bp)))
//!     .unwrap();
//!
//! assert_eq!(
//!     pipeline.phase_names(),
//!     ["imports", "link", "audit", "validate", "conformance", "defaults", "hydrate"]
//! );
//! ```

mod phase;
pub mod phases;
mod plugin;
mod runner;
mod snapshot;

pub use phase::{FnPhase, Phase, PhaseInfo, PhaseResult, phase_fn};
pub use plugin::Plugin;
pub use runner::Pipeline;
pub use snapshot::{PhaseSnapshot, SnapshotPlugin};
