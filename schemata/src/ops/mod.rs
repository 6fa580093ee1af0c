//! Core operations.
//!
//! This module contains the business logic for schemata commands,
//! separated from CLI argument parsing and output rendering.

pub mod check;
pub mod compile;
pub mod explain;
pub mod sdl;

pub use check::check;
pub use compile::{compile, load};
pub use explain::explain;
pub use sdl::{sdl, snapshot_pipeline};
