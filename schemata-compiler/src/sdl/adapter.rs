//! Naming adapters for printed SDL.

use schemata_core::to_camel_case;

/// Maps authored field and argument names to their external SDL names.
pub trait Adapter: Send + Sync {
    /// Short name used on the command line.
    fn name(&self) -> &'static str;

    fn field_name(&self, name: &str) -> String;

    fn argument_name(&self, name: &str) -> String {
        self.field_name(name)
    }
}

/// GraphQL conventions: `hello_world` prints as `helloWorld`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LanguageConventions;

impl Adapter for LanguageConventions {
    fn name(&self) -> &'static str {
        "camel"
    }

    fn field_name(&self, name: &str) -> String {
        to_camel_case(name)
    }
}

/// Prints names exactly as authored.
#[derive(Debug, Clone, Copy, Default)]
pub struct Passthrough;

impl Adapter for Passthrough {
    fn name(&self) -> &'static str {
        "passthrough"
    }

    fn field_name(&self, name: &str) -> String {
        name.to_string()
    }
}
