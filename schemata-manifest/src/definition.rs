//! Type declarations of a schema module.

use indexmap::IndexMap;
use serde::Deserialize;

use crate::TypeExpr;

/// An object or interface declaration.
///
/// ```toml
/// [objects.user]
/// interfaces = ["node"]
/// import_fields = ["timestamps"]
///
/// [objects.user.fields.name]
/// type = "string!"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ObjectDef {
    pub description: Option<String>,

    /// Interfaces this type implements
    #[serde(default)]
    pub interfaces: Vec<String>,

    /// Types whose fields are copied into this one
    #[serde(default)]
    pub import_fields: Vec<ImportDef>,

    #[serde(default)]
    pub fields: IndexMap<String, FieldDef>,
}

/// A field of an object or interface.
#[derive(Debug, Clone, Deserialize)]
pub struct FieldDef {
    #[serde(rename = "type")]
    pub field_type: TypeExpr,

    pub description: Option<String>,

    /// `true` or a deprecation reason
    pub deprecated: Option<Deprecated>,

    #[serde(default)]
    pub args: IndexMap<String, ArgDef>,
}

/// A field argument.
#[derive(Debug, Clone, Deserialize)]
pub struct ArgDef {
    #[serde(rename = "type")]
    pub arg_type: TypeExpr,

    pub description: Option<String>,

    /// Raw default value, rendered against the declared type
    pub default: Option<toml::Value>,
}

/// Deprecation marker: either a flag or a reason.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Deprecated {
    Flag(bool),
    Reason(String),
}

impl Deprecated {
    pub fn is_deprecated(&self) -> bool {
        !matches!(self, Deprecated::Flag(false))
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            Deprecated::Flag(_) => None,
            Deprecated::Reason(reason) => Some(reason),
        }
    }
}

/// A field import, written as a type name or a table.
///
/// ```toml
/// import_fields = ["timestamps", { from = "audit", module = "shared", except = ["secret"] }]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ImportDef {
    Source(String),
    Detailed {
        from: String,
        module: Option<String>,
        #[serde(default)]
        except: Vec<String>,
    },
}

impl ImportDef {
    /// Name of the type to copy fields from.
    pub fn source(&self) -> &str {
        match self {
            ImportDef::Source(from) | ImportDef::Detailed { from, .. } => from,
        }
    }

    pub fn module(&self) -> Option<&str> {
        match self {
            ImportDef::Source(_) => None,
            ImportDef::Detailed { module, .. } => module.as_deref(),
        }
    }

    pub fn except(&self) -> &[String] {
        match self {
            ImportDef::Source(_) => &[],
            ImportDef::Detailed { except, .. } => except,
        }
    }
}

/// A union declaration.
#[derive(Debug, Clone, Deserialize)]
pub struct UnionDef {
    pub description: Option<String>,

    /// Member object types
    #[serde(default)]
    pub types: Vec<String>,
}

/// An enum declaration.
#[derive(Debug, Clone, Deserialize)]
pub struct EnumDef {
    pub description: Option<String>,

    #[serde(default)]
    pub values: Vec<EnumValueDef>,
}

/// An enum value, written as its key or a table.
///
/// ```toml
/// values = ["red", { key = "first", as = "FiRsT  x" }]
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum EnumValueDef {
    Key(String),
    Detailed(EnumValueTable),
}

#[derive(Debug, Clone, Deserialize)]
pub struct EnumValueTable {
    pub key: String,

    /// External name printed in SDL
    #[serde(rename = "as")]
    pub alias: Option<String>,

    pub description: Option<String>,

    pub deprecated: Option<Deprecated>,
}

impl EnumValueDef {
    pub fn key(&self) -> &str {
        match self {
            EnumValueDef::Key(key) => key,
            EnumValueDef::Detailed(table) => &table.key,
        }
    }

    pub fn alias(&self) -> Option<&str> {
        match self {
            EnumValueDef::Key(_) => None,
            EnumValueDef::Detailed(table) => table.alias.as_deref(),
        }
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            EnumValueDef::Key(_) => None,
            EnumValueDef::Detailed(table) => table.description.as_deref(),
        }
    }

    pub fn deprecated(&self) -> Option<&Deprecated> {
        match self {
            EnumValueDef::Key(_) => None,
            EnumValueDef::Detailed(table) => table.deprecated.as_ref(),
        }
    }
}

/// An input object declaration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InputDef {
    pub description: Option<String>,

    #[serde(default)]
    pub import_fields: Vec<ImportDef>,

    #[serde(default)]
    pub fields: IndexMap<String, InputFieldDef>,
}

/// A field of an input object.
#[derive(Debug, Clone, Deserialize)]
pub struct InputFieldDef {
    #[serde(rename = "type")]
    pub field_type: TypeExpr,

    pub description: Option<String>,

    pub default: Option<toml::Value>,
}

/// A custom scalar declaration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScalarDef {
    pub description: Option<String>,
}
