//! Explain command report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};

/// Report data from pipeline explanation.
#[derive(Debug)]
pub struct ExplainReport {
    /// Schema modules in load order.
    pub modules: Vec<ModuleInfo>,
    /// Pipeline phases.
    pub phases: Vec<PhaseInfo>,
    /// Validation lints.
    pub lints: Vec<LintInfo>,
    /// Root operations of the compiled schema.
    pub roots: Vec<(String, String)>,
    /// Compiled types by kind.
    pub types: TypeCounts,
}

/// A loaded schema module.
#[derive(Debug)]
pub struct ModuleInfo {
    /// Path to the module file.
    pub path: PathBuf,
    /// Declared module name.
    pub name: String,
    /// Number of types it declares.
    pub type_count: usize,
}

/// Information about a pipeline phase.
#[derive(Debug)]
pub struct PhaseInfo {
    pub name: String,
    pub description: String,
}

/// Information about a validation lint.
#[derive(Debug)]
pub struct LintInfo {
    pub name: String,
    pub description: String,
}

/// Non-builtin types by kind.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct TypeCounts {
    pub objects: usize,
    pub interfaces: usize,
    pub unions: usize,
    pub enums: usize,
    pub inputs: usize,
    pub scalars: usize,
}

impl TypeCounts {
    pub fn total(&self) -> usize {
        self.objects + self.interfaces + self.unions + self.enums + self.inputs + self.scalars
    }
}

impl Report for ExplainReport {
    fn render(&self, out: &mut dyn Output) {
        out.title("Schemata Pipeline Explanation");
        out.newline();

        out.section("Schema Modules");
        for (i, module) in self.modules.iter().enumerate() {
            let root = if i == 0 { ", root" } else { "" };
            out.numbered_item(
                i + 1,
                &format!(
                    "{} ({}, {} types{})",
                    module.name,
                    module.path.display(),
                    module.type_count,
                    root
                ),
            );
        }
        out.newline();

        out.section("Pipeline Phases");
        for (i, phase) in self.phases.iter().enumerate() {
            out.numbered_item(i + 1, &format!("{} - {}", phase.name, phase.description));
        }
        out.newline();

        out.section("Validation Lints");
        for lint in &self.lints {
            out.list_item(&format!("{}: {}", lint.name, lint.description));
        }
        out.newline();

        out.section("Compiled Schema");
        for (operation, name) in &self.roots {
            out.key_value_indented(operation, name);
        }
        out.key_value_indented("types", &self.types.total().to_string());
        let kinds = [
            ("objects", self.types.objects),
            ("interfaces", self.types.interfaces),
            ("unions", self.types.unions),
            ("enums", self.types.enums),
            ("inputs", self.types.inputs),
            ("scalars", self.types.scalars),
        ];
        for (kind, count) in kinds.into_iter().filter(|(_, count)| *count > 0) {
            out.list_item(&format!("{count} {kind}"));
        }
    }
}
