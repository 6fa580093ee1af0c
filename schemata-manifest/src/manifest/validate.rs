//! Validation context and utilities for manifest parsing.

use std::sync::Arc;

use miette::SourceSpan;

use crate::{Result, error::SourceContext};

/// Parsing and validation context that carries source information.
///
/// Holds the source content and the current path through the module
/// (e.g. `objects.user.fields`), so nested checks can report where a bad
/// name was declared.
///
/// # Example
///
/// ```ignore
/// let ctx = ParseContext::new(src, "app.toml");
/// ctx.validate_name("user", "object")?;
///
/// let nested = ctx.push("user");
/// nested.validate_name("first_name", "field")?;
/// ```
#[derive(Debug, Clone)]
pub struct ParseContext<'a> {
    /// Source context for error reporting (shared across nested contexts)
    source: Arc<SourceContext>,
    path: Vec<&'a str>,
}

impl<'a> ParseContext<'a> {
    pub fn new(src: &str, filename: &str) -> Self {
        Self {
            source: Arc::new(SourceContext::new(src, filename)),
            path: Vec::new(),
        }
    }

    /// Push a path segment and return a new context.
    pub fn push(&self, segment: &'a str) -> Self {
        let mut path = self.path.clone();
        path.push(segment);
        Self {
            source: Arc::clone(&self.source),
            path,
        }
    }

    /// Get the current path as a dot-separated string.
    pub fn path_string(&self) -> String {
        self.path.join(".")
    }

    /// Get a context description for error messages.
    ///
    /// For example: "field in 'user'" or just "object" if no path.
    pub fn context_for(&self, kind: &str) -> String {
        if self.path.is_empty() {
            kind.to_string()
        } else {
            format!("{} in '{}'", kind, self.path_string())
        }
    }

    /// Find the span of a name in the source.
    pub fn find_span(&self, name: &str) -> Option<SourceSpan> {
        find_name_span(self.source.src(), name)
    }

    /// Validate that a name is a valid GraphQL-style identifier.
    pub fn validate_name(&self, name: &str, kind: &str) -> Result<()> {
        if let Some(reason) = schemata_core::invalid_name_reason(name) {
            return Err(self.source.invalid_identifier_error(
                name,
                self.context_for(kind),
                reason,
                self.find_span(name),
            ));
        }
        Ok(())
    }

    /// Create a validation error pointing at `name`, if it can be found.
    pub fn error_at(&self, message: impl Into<String>, name: &str) -> Box<crate::Error> {
        self.source.validation_error(message, self.find_span(name))
    }
}

/// Find the span of a name in the TOML source.
///
/// Searches table headers (`.name]`, `.name.`), quoted strings (`"name"`),
/// and bare keys (`name =`) in that order.
pub(crate) fn find_name_span(src: &str, name: &str) -> Option<SourceSpan> {
    if name.is_empty() {
        return None;
    }

    let prefixed = [
        format!(".{}]", name),
        format!(".{}.", name),
        format!("\"{}\"", name),
        format!("'{}'", name),
    ];

    for pattern in &prefixed {
        if let Some(pos) = src.find(pattern) {
            return Some(SourceSpan::from((pos + 1, name.len())));
        }
    }

    // Bare keys at the start of a line or inside an inline table
    let key_patterns = [
        (format!("\n{} ", name), 1usize),
        (format!("\n{}=", name), 1usize),
        (format!("{{ {} ", name), 2usize),
        (format!(", {} ", name), 2usize),
    ];

    if src.starts_with(&format!("{} ", name)) || src.starts_with(&format!("{}=", name)) {
        return Some(SourceSpan::from((0, name.len())));
    }

    for (pattern, skip) in &key_patterns {
        if let Some(pos) = src.find(pattern) {
            return Some(SourceSpan::from((pos + skip, name.len())));
        }
    }

    None
}
