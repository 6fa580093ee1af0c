//! Validate phase - runs lints on the blueprint.

mod lint;
pub mod lints;

pub use lint::{Lint, LintInfo};
pub use lints::{DuplicateEnumAliasLint, NamingLint, PrintedNameLint, ReservedPrefixLint};
use schemata_blueprint::Blueprint;

use crate::pipeline::{Phase, PhaseResult};

/// Phase that validates the blueprint using configurable lints.
pub struct ValidatePhase {
    lints: Vec<Box<dyn Lint>>,
}

impl ValidatePhase {
    /// Create a new validate phase with default lints.
    pub fn new() -> Self {
        Self {
            lints: vec![
                Box::new(NamingLint),
                Box::new(ReservedPrefixLint),
                Box::new(DuplicateEnumAliasLint),
                Box::new(PrintedNameLint::default()),
            ],
        }
    }

    /// Create a validate phase with no lints.
    pub fn empty() -> Self {
        Self { lints: Vec::new() }
    }

    /// Add a custom lint to the validation phase.
    pub fn with_lint(mut self, lint: impl Lint + 'static) -> Self {
        self.lints.push(Box::new(lint));
        self
    }
}

impl Default for ValidatePhase {
    fn default() -> Self {
        Self::new()
    }
}

impl ValidatePhase {
    /// Get the names of all lints that will be run.
    pub fn lint_names(&self) -> Vec<&'static str> {
        self.lints.iter().map(|l| l.name()).collect()
    }

    /// Get information about all lints that will be run.
    pub fn lint_info(&self) -> Vec<LintInfo> {
        self.lints.iter().map(|l| l.info()).collect()
    }
}

impl Phase for ValidatePhase {
    fn name(&self) -> &str {
        "validate"
    }

    fn description(&self) -> &str {
        "Check names against GraphQL naming rules"
    }

    fn run(&self, blueprint: Blueprint) -> PhaseResult {
        let mut errors = Vec::new();
        for lint in &self.lints {
            lint.check(&blueprint, &mut errors);
        }

        if errors.is_empty() {
            Ok(blueprint)
        } else {
            Err(errors.into())
        }
    }
}
