//! Naming adapter selection for the `sdl` command.

use clap::ValueEnum;
use schemata_compiler::sdl::{Adapter, LanguageConventions, Passthrough};

/// How schema identifiers are spelled in printed SDL.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum AdapterKind {
    /// `hello_world` prints as `helloWorld`
    #[default]
    Camel,
    /// Names print exactly as written in the schema module
    Passthrough,
}

impl AdapterKind {
    pub fn adapter(self) -> &'static dyn Adapter {
        match self {
            AdapterKind::Camel => &LanguageConventions,
            AdapterKind::Passthrough => &Passthrough,
        }
    }
}
