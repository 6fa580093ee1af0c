//! Hooks around pipeline phases.

use std::sync::Arc;

use eyre::Result;
use schemata_blueprint::Blueprint;

/// Observes the blueprint around every phase.
///
/// Hooks get read access only. Returning an error from either hook stops
/// the run, and the error is reported against the phase it surrounds.
///
/// ```
/// use schemata_blueprint::Blueprint;
/// use schemata_compiler::{Pipeline, Plugin};
///
/// /// Rejects a run whose `link` phase left no query root.
/// struct RequireQuery;
///
/// impl Plugin for RequireQuery {
///     fn name(&self) -> &'static str {
///         "require-query"
///     }
///
///     fn on_after_phase(&self, phase: &str, blueprint: &Blueprint) -> eyre::Result<()> {
///         if phase == "link" && blueprint.schema().query.is_none() {
///             eyre::bail!("no query root after linking");
///         }
///         Ok(())
///     }
/// }
///
/// let pipeline = Pipeline::new().plugin(RequireQuery);
/// assert_eq!(pipeline.len(), 6);
/// ```
pub trait Plugin: Send + Sync {
    /// Name used in logs and in [`Error::Plugin`](crate::Error::Plugin).
    fn name(&self) -> &'static str;

    /// Called with the input of `phase`, before it runs.
    #[allow(unused_variables)]
    fn on_before_phase(&self, phase: &str, blueprint: &Blueprint) -> Result<()> {
        Ok(())
    }

    /// Called with the output of `phase`, after it succeeds.
    #[allow(unused_variables)]
    fn on_after_phase(&self, phase: &str, blueprint: &Blueprint) -> Result<()> {
        Ok(())
    }
}

impl<P: Plugin + ?Sized> Plugin for Arc<P> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn on_before_phase(&self, phase: &str, blueprint: &Blueprint) -> Result<()> {
        (**self).on_before_phase(phase, blueprint)
    }

    fn on_after_phase(&self, phase: &str, blueprint: &Blueprint) -> Result<()> {
        (**self).on_after_phase(phase, blueprint)
    }
}
