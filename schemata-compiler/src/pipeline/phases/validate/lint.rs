//! Lint trait for blueprint validation.

use schemata_blueprint::Blueprint;

use crate::Error;

/// Information about a lint.
#[derive(Debug, Clone)]
pub struct LintInfo {
    /// The lint name.
    pub name: &'static str,
    /// A human-readable description.
    pub description: &'static str,
}

/// A lint that checks the blueprint for issues.
pub trait Lint: Send + Sync {
    /// The name of this lint.
    fn name(&self) -> &'static str;

    /// A human-readable description of what this lint checks.
    fn description(&self) -> &'static str;

    /// Check the blueprint and add any errors.
    fn check(&self, blueprint: &Blueprint, errors: &mut Vec<Error>);

    /// Get information about this lint.
    fn info(&self) -> LintInfo {
        LintInfo {
            name: self.name(),
            description: self.description(),
        }
    }
}
