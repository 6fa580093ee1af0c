//! Compilation failure report.

use schemata_compiler::{PhaseErrors, PipelineError};

use super::output::{Output, Report};

/// A schema that did not compile.
#[derive(Debug)]
pub struct FailureReport {
    /// The step that failed: `lower` or a pipeline phase name.
    pub phase: String,
    /// One message per error the step reported.
    pub errors: Vec<String>,
}

impl FailureReport {
    pub fn from_lowering(errors: PhaseErrors) -> Self {
        Self {
            phase: "lower".to_string(),
            errors: errors.iter().map(ToString::to_string).collect(),
        }
    }
}

impl From<PipelineError> for FailureReport {
    fn from(err: PipelineError) -> Self {
        Self {
            phase: err.phase,
            errors: err.errors.iter().map(ToString::to_string).collect(),
        }
    }
}

impl Report for FailureReport {
    fn render(&self, out: &mut dyn Output) {
        out.error(&format!(
            "phase `{}` failed with {} error{}",
            self.phase,
            self.errors.len(),
            if self.errors.len() == 1 { "" } else { "s" }
        ));
        for error in &self.errors {
            out.error(&format!("  - {}", error));
        }
    }
}

#[cfg(test)]
mod tests {
    use schemata_compiler::Error;

    use super::*;
    use crate::reports::output::BufferOutput;

    #[test]
    fn test_renders_every_cause() {
        let report = FailureReport::from(PipelineError::new(
            "link",
            vec![
                Error::MissingQueryRoot,
                Error::UnknownType {
                    name: "User".into(),
                    location: "field `Post.author`".into(),
                },
            ],
        ));

        let mut out = BufferOutput::default();
        report.render(&mut out);
        assert_eq!(
            out.lines,
            [
                "error: phase `link` failed with 2 errors",
                "error:   - schema has no query root type",
                "error:   - unknown type `User` referenced by field `Post.author`",
            ]
        );
    }
}
