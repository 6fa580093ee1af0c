//! Type definitions.

use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;

use crate::{EnumValueDefinition, Error, FieldDefinition, FieldImport, FieldMap, Result};

/// Names of the scalars every blueprint starts with.
pub const BUILTIN_SCALARS: &[&str] = &["ID", "String", "Int", "Float", "Boolean"];

/// The kind of a type definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    Object,
    Interface,
    Union,
    Enum,
    InputObject,
    Scalar,
}

impl TypeKind {
    /// Get the lowercase string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeKind::Object => "object",
            TypeKind::Interface => "interface",
            TypeKind::Union => "union",
            TypeKind::Enum => "enum",
            TypeKind::InputObject => "input object",
            TypeKind::Scalar => "scalar",
        }
    }

    /// The kind with its indefinite article, e.g. "an enum".
    pub fn article(&self) -> String {
        match self {
            TypeKind::Object | TypeKind::Interface | TypeKind::Enum | TypeKind::InputObject => {
                format!("an {}", self.as_str())
            }
            TypeKind::Union | TypeKind::Scalar => format!("a {}", self.as_str()),
        }
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named type in the blueprint.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeDefinition {
    Object(ObjectType),
    Interface(InterfaceType),
    Union(UnionType),
    Enum(EnumType),
    InputObject(InputObjectType),
    Scalar(ScalarType),
}

impl TypeDefinition {
    pub fn name(&self) -> &str {
        match self {
            Self::Object(t) => &t.name,
            Self::Interface(t) => &t.name,
            Self::Union(t) => &t.name,
            Self::Enum(t) => &t.name,
            Self::InputObject(t) => &t.name,
            Self::Scalar(t) => &t.name,
        }
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            Self::Object(t) => t.description.as_deref(),
            Self::Interface(t) => t.description.as_deref(),
            Self::Union(t) => t.description.as_deref(),
            Self::Enum(t) => t.description.as_deref(),
            Self::InputObject(t) => t.description.as_deref(),
            Self::Scalar(t) => t.description.as_deref(),
        }
    }

    /// The schema module that authored this type, if known.
    pub fn module(&self) -> Option<&str> {
        match self {
            Self::Object(t) => t.module.as_deref(),
            Self::Interface(t) => t.module.as_deref(),
            Self::Union(t) => t.module.as_deref(),
            Self::Enum(t) => t.module.as_deref(),
            Self::InputObject(t) => t.module.as_deref(),
            Self::Scalar(t) => t.module.as_deref(),
        }
    }

    pub fn kind(&self) -> TypeKind {
        match self {
            Self::Object(_) => TypeKind::Object,
            Self::Interface(_) => TypeKind::Interface,
            Self::Union(_) => TypeKind::Union,
            Self::Enum(_) => TypeKind::Enum,
            Self::InputObject(_) => TypeKind::InputObject,
            Self::Scalar(_) => TypeKind::Scalar,
        }
    }

    /// Returns true for the pre-registered scalars.
    pub fn is_builtin(&self) -> bool {
        matches!(self, Self::Scalar(s) if s.builtin)
    }

    /// Fields of objects, interfaces, and input objects.
    pub fn fields(&self) -> Option<&FieldMap> {
        match self {
            Self::Object(t) => Some(&t.fields),
            Self::Interface(t) => Some(&t.fields),
            Self::InputObject(t) => Some(&t.fields),
            Self::Union(_) | Self::Enum(_) | Self::Scalar(_) => None,
        }
    }

    pub fn fields_mut(&mut self) -> Option<&mut FieldMap> {
        match self {
            Self::Object(t) => Some(&mut t.fields),
            Self::Interface(t) => Some(&mut t.fields),
            Self::InputObject(t) => Some(&mut t.fields),
            Self::Union(_) | Self::Enum(_) | Self::Scalar(_) => None,
        }
    }

    /// Find a field by name.
    pub fn find_field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields().and_then(|fields| fields.get(name))
    }

    /// Interfaces declared by an object or interface.
    pub fn interfaces(&self) -> &[String] {
        match self {
            Self::Object(t) => &t.interfaces,
            Self::Interface(t) => &t.interfaces,
            _ => &[],
        }
    }

    /// Pending field imports.
    pub fn imports(&self) -> &[FieldImport] {
        match self {
            Self::Object(t) => &t.imports,
            Self::Interface(t) => &t.imports,
            Self::InputObject(t) => &t.imports,
            _ => &[],
        }
    }

    /// Remove and return the pending field imports.
    pub fn take_imports(&mut self) -> Vec<FieldImport> {
        match self {
            Self::Object(t) => std::mem::take(&mut t.imports),
            Self::Interface(t) => std::mem::take(&mut t.imports),
            Self::InputObject(t) => std::mem::take(&mut t.imports),
            _ => Vec::new(),
        }
    }

    /// Insert a field, stamping its parent with this type's name.
    ///
    /// # Errors
    ///
    /// Fails if this type cannot hold fields or already has a field of that name.
    pub fn insert_field(&mut self, mut field: FieldDefinition) -> Result<()> {
        let name = self.name().to_string();
        let kind = self.kind();
        let fields = self
            .fields_mut()
            .ok_or_else(|| Error::NotAFieldContainer {
                name: name.clone(),
                kind,
            })?;

        if fields.contains_key(&field.name) {
            return Err(Error::DuplicateField {
                type_name: name,
                field: field.name,
            });
        }

        field.parent = name;
        fields.insert(field.name.clone(), field);
        Ok(())
    }

    /// Declare that this type implements an interface. Idempotent.
    pub fn implement(&mut self, interface: &str) -> Result<()> {
        let interfaces = match self {
            Self::Object(t) => &mut t.interfaces,
            Self::Interface(t) => &mut t.interfaces,
            other => {
                return Err(Error::CannotImplement {
                    name: other.name().to_string(),
                    kind: other.kind(),
                });
            }
        };

        if !interfaces.iter().any(|i| i == interface) {
            interfaces.push(interface.to_string());
        }
        Ok(())
    }
}

/// An object type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectType {
    pub name: String,
    pub description: Option<String>,
    pub module: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub interfaces: Vec<String>,
    pub fields: FieldMap,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub imports: Vec<FieldImport>,
}

impl ObjectType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            module: None,
            interfaces: Vec::new(),
            fields: FieldMap::new(),
            imports: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_module(mut self, module: impl Into<String>) -> Self {
        self.module = Some(module.into());
        self
    }

    pub fn with_interface(mut self, interface: impl Into<String>) -> Self {
        self.interfaces.push(interface.into());
        self
    }

    /// Add a field, replacing any field of the same name.
    pub fn with_field(mut self, mut field: FieldDefinition) -> Self {
        field.parent = self.name.clone();
        self.fields.insert(field.name.clone(), field);
        self
    }

    pub fn with_import(mut self, import: FieldImport) -> Self {
        self.imports.push(import);
        self
    }
}

/// An interface type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InterfaceType {
    pub name: String,
    pub description: Option<String>,
    pub module: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub interfaces: Vec<String>,
    pub fields: FieldMap,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub imports: Vec<FieldImport>,
    /// Object types implementing this interface (computed by linking).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub implementors: Vec<String>,
}

impl InterfaceType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            module: None,
            interfaces: Vec::new(),
            fields: FieldMap::new(),
            imports: Vec::new(),
            implementors: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_module(mut self, module: impl Into<String>) -> Self {
        self.module = Some(module.into());
        self
    }

    pub fn with_interface(mut self, interface: impl Into<String>) -> Self {
        self.interfaces.push(interface.into());
        self
    }

    pub fn with_field(mut self, mut field: FieldDefinition) -> Self {
        field.parent = self.name.clone();
        self.fields.insert(field.name.clone(), field);
        self
    }

    pub fn with_import(mut self, import: FieldImport) -> Self {
        self.imports.push(import);
        self
    }
}

/// A union type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnionType {
    pub name: String,
    pub description: Option<String>,
    pub module: Option<String>,
    /// Member object type names.
    pub types: Vec<String>,
}

impl UnionType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            module: None,
            types: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_module(mut self, module: impl Into<String>) -> Self {
        self.module = Some(module.into());
        self
    }

    pub fn with_member(mut self, member: impl Into<String>) -> Self {
        self.types.push(member.into());
        self
    }
}

/// An enum type, with values keyed by their internal key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnumType {
    pub name: String,
    pub description: Option<String>,
    pub module: Option<String>,
    pub values: IndexMap<String, EnumValueDefinition>,
}

impl EnumType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            module: None,
            values: IndexMap::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_module(mut self, module: impl Into<String>) -> Self {
        self.module = Some(module.into());
        self
    }

    pub fn with_value(mut self, value: EnumValueDefinition) -> Self {
        self.values.insert(value.key.clone(), value);
        self
    }

    /// Look up a value by a raw default.
    ///
    /// Alias equality wins over key equality, so a value whose alias happens
    /// to equal another value's key still resolves to the aliased value.
    pub fn find_value(&self, raw: &str) -> Option<&EnumValueDefinition> {
        self.values
            .values()
            .find(|v| v.alias == raw)
            .or_else(|| self.values.get(raw))
    }
}

/// An input object type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InputObjectType {
    pub name: String,
    pub description: Option<String>,
    pub module: Option<String>,
    pub fields: FieldMap,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub imports: Vec<FieldImport>,
}

impl InputObjectType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            module: None,
            fields: FieldMap::new(),
            imports: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_module(mut self, module: impl Into<String>) -> Self {
        self.module = Some(module.into());
        self
    }

    pub fn with_field(mut self, mut field: FieldDefinition) -> Self {
        field.parent = self.name.clone();
        self.fields.insert(field.name.clone(), field);
        self
    }

    pub fn with_import(mut self, import: FieldImport) -> Self {
        self.imports.push(import);
        self
    }
}

/// A scalar type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScalarType {
    pub name: String,
    pub description: Option<String>,
    pub module: Option<String>,
    /// True for the scalars every blueprint starts with.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub builtin: bool,
}

impl ScalarType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            module: None,
            builtin: false,
        }
    }

    pub(crate) fn builtin(name: &str) -> Self {
        Self {
            builtin: true,
            ..Self::new(name)
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_module(mut self, module: impl Into<String>) -> Self {
        self.module = Some(module.into());
        self
    }
}

macro_rules! impl_from_variant {
    ($($ty:ident => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for TypeDefinition {
                fn from(value: $ty) -> Self {
                    TypeDefinition::$variant(value)
                }
            }
        )*
    };
}

impl_from_variant! {
    ObjectType => Object,
    InterfaceType => Interface,
    UnionType => Union,
    EnumType => Enum,
    InputObjectType => InputObject,
    ScalarType => Scalar,
}
