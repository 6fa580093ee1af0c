//! The blueprint container.

use indexmap::IndexMap;
use serde::Serialize;

use crate::types::BUILTIN_SCALARS;
use crate::{
    Behavior, Behaviors, Error, FieldDefinition, IsTypeOf, NodeId, Result, ScalarType,
    TypeDefinition, TypeResolver,
};

/// Root operation types of a schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SchemaDefinition {
    pub query: Option<String>,
    pub mutation: Option<String>,
    pub subscription: Option<String>,
}

impl SchemaDefinition {
    pub fn with_query(mut self, name: impl Into<String>) -> Self {
        self.query = Some(name.into());
        self
    }

    pub fn with_mutation(mut self, name: impl Into<String>) -> Self {
        self.mutation = Some(name.into());
        self
    }

    pub fn with_subscription(mut self, name: impl Into<String>) -> Self {
        self.subscription = Some(name.into());
        self
    }

    /// Declared roots as `(operation, type name)` pairs, in canonical order.
    pub fn roots(&self) -> Vec<(&'static str, &str)> {
        [
            ("query", &self.query),
            ("mutation", &self.mutation),
            ("subscription", &self.subscription),
        ]
        .into_iter()
        .filter_map(|(op, name)| name.as_deref().map(|name| (op, name)))
        .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.query.is_none() && self.mutation.is_none() && self.subscription.is_none()
    }
}

/// A schema as a set of named types plus its root operations.
///
/// Types are kept in registration order, which is also the order they are
/// printed in. Every mutation consumes the blueprint and returns the updated
/// value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Blueprint {
    schema: SchemaDefinition,
    types: IndexMap<String, TypeDefinition>,
    #[serde(skip)]
    behaviors: Behaviors,
}

impl Default for Blueprint {
    fn default() -> Self {
        Self::new()
    }
}

impl Blueprint {
    /// Create a blueprint holding only the built-in scalars.
    pub fn new() -> Self {
        let types = BUILTIN_SCALARS
            .iter()
            .map(|name| {
                (
                    name.to_string(),
                    TypeDefinition::Scalar(ScalarType::builtin(name)),
                )
            })
            .collect();

        Self {
            schema: SchemaDefinition::default(),
            types,
            behaviors: Behaviors::new(),
        }
    }

    pub fn schema(&self) -> &SchemaDefinition {
        &self.schema
    }

    pub fn with_schema(mut self, schema: SchemaDefinition) -> Self {
        self.schema = schema;
        self
    }

    /// Find a type by name.
    pub fn find_type(&self, name: &str) -> Option<&TypeDefinition> {
        self.types.get(name)
    }

    /// Find a field of a type.
    pub fn find_field(&self, type_name: &str, field: &str) -> Option<&FieldDefinition> {
        self.find_type(type_name)
            .and_then(|ty| ty.find_field(field))
    }

    pub fn contains_type(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    pub fn type_mut(&mut self, name: &str) -> Option<&mut TypeDefinition> {
        self.types.get_mut(name)
    }

    /// Iterate types in registration order, built-in scalars included.
    pub fn types(&self) -> impl Iterator<Item = &TypeDefinition> {
        self.types.values()
    }

    pub fn types_mut(&mut self) -> impl Iterator<Item = &mut TypeDefinition> {
        self.types.values_mut()
    }

    /// Number of registered types, built-in scalars included.
    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    /// Types authored by one schema module, keyed by name.
    pub fn types_by_name(&self, module: &str) -> IndexMap<&str, &TypeDefinition> {
        self.types
            .iter()
            .filter(|(_, ty)| ty.module() == Some(module))
            .map(|(name, ty)| (name.as_str(), ty))
            .collect()
    }

    /// Distinct module names in first-seen order.
    pub fn modules(&self) -> Vec<&str> {
        let mut modules: Vec<&str> = Vec::new();
        for module in self.types.values().filter_map(TypeDefinition::module) {
            if !modules.contains(&module) {
                modules.push(module);
            }
        }
        modules
    }

    /// Register a new type.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateType`] if a type of that name exists.
    pub fn add_type(mut self, ty: impl Into<TypeDefinition>) -> Result<Self> {
        let ty = ty.into();
        if self.types.contains_key(ty.name()) {
            return Err(Error::DuplicateType {
                name: ty.name().to_string(),
            });
        }
        self.types.insert(ty.name().to_string(), ty);
        Ok(self)
    }

    /// Add a field to an existing type.
    ///
    /// # Errors
    ///
    /// Fails if the type is unknown, cannot hold fields, or already has a
    /// field of that name.
    pub fn add_field(mut self, type_name: &str, field: FieldDefinition) -> Result<Self> {
        let ty = self
            .types
            .get_mut(type_name)
            .ok_or_else(|| Error::UnknownType {
                name: type_name.to_string(),
            })?;
        ty.insert_field(field)?;
        Ok(self)
    }

    /// Declare that a type implements an interface.
    pub fn add_interface(mut self, type_name: &str, interface: &str) -> Result<Self> {
        let ty = self
            .types
            .get_mut(type_name)
            .ok_or_else(|| Error::UnknownType {
                name: type_name.to_string(),
            })?;
        ty.implement(interface)?;
        Ok(self)
    }

    /// Attach a behavior to a node.
    pub fn attach(mut self, node: NodeId, behavior: Behavior) -> Self {
        self.behaviors.attach(node, behavior);
        self
    }

    /// Set the behaviors of a node, dropping any attached before.
    pub fn with_behaviors(mut self, node: NodeId, behaviors: Vec<Behavior>) -> Self {
        self.behaviors.replace(node, behaviors);
        self
    }

    /// Behaviors attached to a node.
    pub fn behaviors(&self, node: &NodeId) -> &[Behavior] {
        self.behaviors.get(node)
    }

    pub fn behavior_table(&self) -> &Behaviors {
        &self.behaviors
    }

    /// The first type resolver attached to a type.
    pub fn type_resolver(&self, type_name: &str) -> Option<&TypeResolver> {
        self.behaviors
            .get(&NodeId::for_type(type_name))
            .iter()
            .find_map(|b| match b {
                Behavior::TypeResolver(resolver) => Some(resolver),
                _ => None,
            })
    }

    /// The first `is_type_of` check attached to a type.
    pub fn is_type_of(&self, type_name: &str) -> Option<&IsTypeOf> {
        self.behaviors
            .get(&NodeId::for_type(type_name))
            .iter()
            .find_map(|b| match b {
                Behavior::IsTypeOf(check) => Some(check),
                _ => None,
            })
    }
}
