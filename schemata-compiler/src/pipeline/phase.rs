//! Pipeline phase trait.

use schemata_blueprint::Blueprint;

use crate::PhaseErrors;

/// Outcome of one phase.
pub type PhaseResult = Result<Blueprint, PhaseErrors>;

/// Information about a pipeline phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseInfo {
    /// The phase name.
    pub name: String,
    /// A human-readable description.
    pub description: String,
}

/// A phase in the compilation pipeline.
///
/// Phases are executed in order by the pipeline. Each phase takes the
/// blueprint by value and returns the next one. A failing phase reports
/// every error it found, not just the first.
///
/// Built-in phases:
/// - `imports` - copies imported fields into their target types
/// - `link` - resolves type references and computes implementors
/// - `validate` - runs naming lints
/// - `conformance` - checks objects against their interfaces
/// - `defaults` - renders every default value once
/// - `hydrate` - attaches runtime behaviors
pub trait Phase: Send + Sync {
    /// The name of this phase, unique within a pipeline.
    fn name(&self) -> &str;

    /// A human-readable description of what this phase does.
    fn description(&self) -> &str;

    /// Run this phase on the blueprint.
    ///
    /// # Errors
    ///
    /// Returns every error the phase found.
    fn run(&self, blueprint: Blueprint) -> PhaseResult;

    /// Get information about this phase.
    fn info(&self) -> PhaseInfo {
        PhaseInfo {
            name: self.name().to_string(),
            description: self.description().to_string(),
        }
    }
}

/// A phase backed by a function or closure. See [`phase_fn`].
pub struct FnPhase<F> {
    name: String,
    description: String,
    f: F,
}

/// Wrap a function as a named phase.
pub fn phase_fn<F>(name: impl Into<String>, description: impl Into<String>, f: F) -> FnPhase<F>
where
    F: Fn(Blueprint) -> PhaseResult + Send + Sync,
{
    FnPhase {
        name: name.into(),
        description: description.into(),
        f,
    }
}

impl<F> Phase for FnPhase<F>
where
    F: Fn(Blueprint) -> PhaseResult + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn run(&self, blueprint: Blueprint) -> PhaseResult {
        (self.f)(blueprint)
    }
}
