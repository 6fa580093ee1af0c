//! TOML schema modules for the schemata GraphQL schema compiler.
//!
//! Each file describes one module: its root operations and the objects,
//! interfaces, unions, enums, inputs, and scalars it declares. Tables keep
//! their declaration order, which is the order types are printed in.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod definition;
mod error;
mod manifest;
mod type_expr;

pub use definition::{
    ArgDef, Deprecated, EnumDef, EnumValueDef, EnumValueTable, FieldDef, ImportDef, InputDef,
    InputFieldDef, ObjectDef, ScalarDef, UnionDef,
};
pub use error::{Error, Result, SourceContext};
pub use manifest::{Manifest, ModuleConfig, ParseContext, SchemaConfig};
pub use type_expr::{TypeExpr, TypeExprError};
