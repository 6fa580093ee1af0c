//! Blueprint model for the schemata GraphQL schema compiler.
//!
//! A [`Blueprint`] is the in-memory form of a schema as it moves through the
//! compilation pipeline:
//!
//! ```text
//! schema modules → lower → Blueprint → phases → hydrate → SDL
//! ```
//!
//! Types are stored in an arena keyed by name. Fields refer back to their
//! owning type by name, and runtime behaviors live in a side table keyed by
//! [`NodeId`], so none of the model needs shared ownership.

mod behavior;
mod blueprint;
mod error;
mod field;
mod node;
mod type_ref;
mod types;
mod value;

pub use behavior::{Behavior, Behaviors, IsTypeOf, TypeResolver};
pub use blueprint::{Blueprint, SchemaDefinition};
pub use error::{Error, Result};
pub use field::{
    ArgumentDefinition, Deprecation, EnumValueDefinition, FieldDefinition, FieldImport, FieldMap,
};
pub use node::{Node, NodeId};
pub use type_ref::TypeRef;
pub use types::{
    BUILTIN_SCALARS, EnumType, InputObjectType, InterfaceType, ObjectType, ScalarType, TypeDefinition,
    TypeKind, UnionType,
};
pub use value::Value;
