//! Compilation pipeline, literal renderer, and SDL printer for schemata.
//!
//! The compiler takes a [`Blueprint`] through an ordered [`Pipeline`] of
//! phases and prints the result as SDL:
//!
//! ```
//! use schemata_blueprint::{
//!     ArgumentDefinition, Blueprint, FieldDefinition, ObjectType, SchemaDefinition, TypeRef,
//! };
//! use schemata_compiler::{Pipeline, compile, print_sdl};
//!
//! let blueprint = Blueprint::new()
//!     .with_schema(SchemaDefinition::default().with_query("Query"))
//!     .add_type(
//!         ObjectType::new("Query").with_field(
//!             FieldDefinition::new("hello_world", TypeRef::named("String")).with_argument(
//!                 ArgumentDefinition::new("name", TypeRef::non_null(TypeRef::named("String"))),
//!             ),
//!         ),
//!     )
//!     .unwrap();
//!
//! let compiled = compile(blueprint, &Pipeline::new()).unwrap();
//! let sdl = print_sdl(&compiled).unwrap();
//! assert!(sdl.contains("helloWorld(name: String!): String"));
//! ```

pub mod builder;
mod error;
pub mod hydrate;
mod literal;
mod lower;
pub mod pipeline;
pub mod provider;
pub mod sdl;

pub use error::{Error, PhaseErrors, PipelineError, ProviderError, Result};
pub use hydrate::{HydratePhase, Hydration, Hydrator};
pub use literal::{LiteralRenderer, quote, render_literal};
pub use lower::{lower, lower_value, type_name};
pub use pipeline::{Phase, PhaseInfo, PhaseResult, Pipeline, Plugin, SnapshotPlugin, phase_fn};
pub use provider::{
    BlueprintStore, CachedProvider, DirectProvider, MemoryStore, SchemaIdentity, SchemaProvider,
    SchemaSource,
};
use schemata_blueprint::Blueprint;
pub use sdl::{SdlPrinter, print_sdl};

/// Run `pipeline` over `blueprint`.
///
/// # Errors
///
/// Returns the first failing phase with all of its errors.
pub fn compile(blueprint: Blueprint, pipeline: &Pipeline) -> Result<Blueprint, PipelineError> {
    pipeline.run(blueprint)
}
