//! Text building blocks for SDL output.
//!
//! - [`CodeBuilder`] - Fluent API for building indented text
//! - [`Indent`] - Indentation configuration

mod code_builder;
mod indent;

pub use code_builder::CodeBuilder;
pub use indent::Indent;
