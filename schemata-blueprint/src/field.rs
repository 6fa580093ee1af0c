//! Field, argument, and enum value definitions.

use indexmap::IndexMap;
use serde::Serialize;

use crate::{TypeRef, Value};

/// Ordered map of field name to field definition.
pub type FieldMap = IndexMap<String, FieldDefinition>;

/// Deprecation marker for fields and enum values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Deprecation {
    /// Optional human readable reason.
    pub reason: Option<String>,
}

/// A field on an object, interface, or input object.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDefinition {
    /// Field name as authored (e.g. `hello_world`).
    pub name: String,
    /// Description for documentation.
    pub description: Option<String>,
    /// Declared type.
    pub type_ref: TypeRef,
    /// Arguments, in declaration order.
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub arguments: IndexMap<String, ArgumentDefinition>,
    /// Default value (input object fields only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,
    /// Deprecation marker.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecation: Option<Deprecation>,
    /// Name of the type owning this field.
    ///
    /// This is a lookup key into the blueprint, not an owning reference.
    pub parent: String,
}

impl FieldDefinition {
    /// Create a field with the given name and type.
    pub fn new(name: impl Into<String>, type_ref: TypeRef) -> Self {
        Self {
            name: name.into(),
            description: None,
            type_ref,
            arguments: IndexMap::new(),
            default_value: None,
            deprecation: None,
            parent: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Add an argument. A later argument with the same name replaces the earlier one.
    pub fn with_argument(mut self, argument: ArgumentDefinition) -> Self {
        self.arguments.insert(argument.name.clone(), argument);
        self
    }

    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn deprecated(mut self, reason: Option<&str>) -> Self {
        self.deprecation = Some(Deprecation {
            reason: reason.map(str::to_string),
        });
        self
    }

    /// Find an argument by name.
    pub fn find_argument(&self, name: &str) -> Option<&ArgumentDefinition> {
        self.arguments.get(name)
    }
}

/// An argument of a field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArgumentDefinition {
    pub name: String,
    pub description: Option<String>,
    pub type_ref: TypeRef,
    /// Raw default value, rendered at print time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,
}

impl ArgumentDefinition {
    pub fn new(name: impl Into<String>, type_ref: TypeRef) -> Self {
        Self {
            name: name.into(),
            description: None,
            type_ref,
            default_value: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default_value = Some(value.into());
        self
    }
}

/// A value of an enum type.
///
/// `key` is the internal name used by schema authors; `alias` is the literal
/// emitted in SDL. Default values are matched against the alias first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumValueDefinition {
    pub key: String,
    pub alias: String,
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecation: Option<Deprecation>,
}

impl EnumValueDefinition {
    /// Create a value whose alias is the upper-cased key.
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            alias: key.to_uppercase(),
            key,
            description: None,
            deprecation: None,
        }
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = alias.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn deprecated(mut self, reason: Option<&str>) -> Self {
        self.deprecation = Some(Deprecation {
            reason: reason.map(str::to_string),
        });
        self
    }
}

/// A pending request to copy the fields of another type into this one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldImport {
    /// Name of the type to copy fields from.
    pub source: String,
    /// Restrict the lookup to types authored by this module.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,
    /// Field names to leave out.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub except: Vec<String>,
}

impl FieldImport {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            module: None,
            except: Vec::new(),
        }
    }

    pub fn from_module(mut self, module: impl Into<String>) -> Self {
        self.module = Some(module.into());
        self
    }

    pub fn except<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.except.extend(names.into_iter().map(Into::into));
        self
    }
}
