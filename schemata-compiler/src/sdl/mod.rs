//! SDL printing.
//!
//! The printer is a pure projection of a compiled blueprint: the schema
//! block first, then every non-builtin type in registration order. Default
//! values go through the [`LiteralRenderer`](crate::LiteralRenderer), and
//! attached behaviors are ignored.

mod adapter;
mod printer;

pub use adapter::{Adapter, LanguageConventions, Passthrough};
pub use printer::{SdlPrinter, print_sdl};
