//! Schema module manifests.

mod parse;
mod validate;

use indexmap::IndexMap;
use serde::Deserialize;
pub use validate::ParseContext;

use crate::{EnumDef, InputDef, ObjectDef, ScalarDef, UnionDef};

/// One schema module, parsed from a TOML file.
#[derive(Debug, Clone, Deserialize)]
pub struct Manifest {
    /// Module metadata
    pub module: ModuleConfig,

    /// Root operation types
    #[serde(default)]
    pub schema: SchemaConfig,

    #[serde(default)]
    pub objects: IndexMap<String, ObjectDef>,

    #[serde(default)]
    pub interfaces: IndexMap<String, ObjectDef>,

    #[serde(default)]
    pub unions: IndexMap<String, UnionDef>,

    #[serde(default)]
    pub enums: IndexMap<String, EnumDef>,

    #[serde(default)]
    pub inputs: IndexMap<String, InputDef>,

    #[serde(default)]
    pub scalars: IndexMap<String, ScalarDef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModuleConfig {
    /// Module name, used to scope field imports
    pub name: String,

    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SchemaConfig {
    pub query: Option<String>,
    pub mutation: Option<String>,
    pub subscription: Option<String>,
}

impl SchemaConfig {
    /// Declared roots as `(operation, identifier)` pairs.
    pub fn roots(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("query", &self.query),
            ("mutation", &self.mutation),
            ("subscription", &self.subscription),
        ]
        .into_iter()
        .filter_map(|(op, name)| name.as_deref().map(|name| (op, name)))
    }
}

impl Manifest {
    /// The module name.
    pub fn name(&self) -> &str {
        &self.module.name
    }

    /// Every declared type identifier with its kind, section by section.
    pub fn declarations(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.objects
            .keys()
            .map(|n| ("object", n.as_str()))
            .chain(self.interfaces.keys().map(|n| ("interface", n.as_str())))
            .chain(self.unions.keys().map(|n| ("union", n.as_str())))
            .chain(self.enums.keys().map(|n| ("enum", n.as_str())))
            .chain(self.inputs.keys().map(|n| ("input", n.as_str())))
            .chain(self.scalars.keys().map(|n| ("scalar", n.as_str())))
    }
}
