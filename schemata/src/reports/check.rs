//! Check command report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};

/// Report data from a successful compilation.
#[derive(Debug)]
pub struct CheckReport {
    /// The schema modules that were compiled.
    pub schemas: Vec<PathBuf>,
    /// Root operations as `(operation, type)` pairs.
    pub roots: Vec<(String, String)>,
    /// Number of non-builtin types.
    pub type_count: usize,
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        for schema in &self.schemas {
            out.success(&format!("{} is valid", schema.display()));
        }
        out.newline();

        for (operation, name) in &self.roots {
            out.key_value_indented(operation, name);
        }
        out.preformatted(&format!(
            "  {} type{}",
            self.type_count,
            if self.type_count == 1 { "" } else { "s" }
        ));
    }
}
