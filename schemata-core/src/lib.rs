//! Core utilities shared by the schemata crates.
//!
//! This crate provides naming helpers used when turning schema identifiers
//! into external GraphQL names, and the output file abstraction used by the
//! CLI when writing SDL to disk.

mod file;
mod utils;

// File operations
pub use file::{OutputFile, WriteResult};
// Naming utilities
pub use utils::{invalid_name_reason, is_graphql_name, to_camel_case, to_pascal_case};
