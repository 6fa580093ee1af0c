//! Builder for indented, line-oriented text.

use super::Indent;

/// Fluent API for building text with proper indentation.
///
/// # Example
///
/// ```
/// use schemata_compiler::builder::CodeBuilder;
///
/// let mut builder = CodeBuilder::sdl();
/// builder.push_block("type Query {", "}", |b| {
///     b.push_line("hello: String");
/// });
///
/// assert_eq!(builder.build(), "type Query {\n  hello: String\n}\n");
/// ```
#[derive(Debug, Clone)]
pub struct CodeBuilder {
    indent_level: usize,
    indent: Indent,
    buffer: String,
}

impl CodeBuilder {
    /// Create a new CodeBuilder with the specified indentation.
    pub fn new(indent: Indent) -> Self {
        Self {
            indent_level: 0,
            indent,
            buffer: String::new(),
        }
    }

    /// Create a new CodeBuilder with 2-space indentation.
    pub fn sdl() -> Self {
        Self::new(Indent::SDL)
    }

    /// Add a line with current indentation.
    pub fn push_line(&mut self, s: &str) -> &mut Self {
        self.write_indent();
        self.buffer.push_str(s);
        self.buffer.push('\n');
        self
    }

    /// Add each line of `text` with current indentation.
    ///
    /// Empty lines are written without trailing whitespace.
    pub fn push_lines(&mut self, text: &str) -> &mut Self {
        for line in text.lines() {
            if line.is_empty() {
                self.push_blank();
            } else {
                self.push_line(line);
            }
        }
        self
    }

    /// Add a blank line.
    pub fn push_blank(&mut self) -> &mut Self {
        self.buffer.push('\n');
        self
    }

    /// Increase indentation level.
    pub fn push_indent(&mut self) -> &mut Self {
        self.indent_level += 1;
        self
    }

    /// Decrease indentation level.
    pub fn push_dedent(&mut self) -> &mut Self {
        self.indent_level = self.indent_level.saturating_sub(1);
        self
    }

    /// Add an indented block between a header and a closing line.
    pub fn push_block<F>(&mut self, header: &str, close: &str, f: F) -> &mut Self
    where
        F: FnOnce(&mut Self),
    {
        self.push_line(header);
        self.push_indent();
        f(self);
        self.push_dedent();
        self.push_line(close)
    }

    /// Get the current indentation level.
    pub fn current_indent(&self) -> usize {
        self.indent_level
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Consume the builder and return the text.
    pub fn build(self) -> String {
        self.buffer
    }

    /// Get a reference to the current buffer content.
    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.buffer.push_str(self.indent.as_str());
        }
    }
}

impl Default for CodeBuilder {
    fn default() -> Self {
        Self::sdl()
    }
}
