//! Runtime behaviors attached to blueprint nodes.
//!
//! Behaviors live in a side table keyed by [`NodeId`]. They never take part in
//! the structural equality of a node, and they are not serialized.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::NodeId;

type ResolveFn = dyn Fn(&serde_json::Value) -> Option<String> + Send + Sync;
type IsTypeOfFn = dyn Fn(&serde_json::Value) -> bool + Send + Sync;

/// Picks the concrete object type for an abstract (interface or union) value.
#[derive(Clone)]
pub struct TypeResolver(Arc<ResolveFn>);

impl TypeResolver {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&serde_json::Value) -> Option<String> + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Resolve the concrete type name of `value`.
    pub fn resolve(&self, value: &serde_json::Value) -> Option<String> {
        (self.0)(value)
    }
}

impl fmt::Debug for TypeResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TypeResolver(..)")
    }
}

impl PartialEq for TypeResolver {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// Checks whether a value belongs to an object type.
#[derive(Clone)]
pub struct IsTypeOf(Arc<IsTypeOfFn>);

impl IsTypeOf {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&serde_json::Value) -> bool + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    pub fn check(&self, value: &serde_json::Value) -> bool {
        (self.0)(value)
    }
}

impl fmt::Debug for IsTypeOf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("IsTypeOf(..)")
    }
}

impl PartialEq for IsTypeOf {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// A behavior attached to a node during hydration.
#[derive(Debug, Clone, PartialEq)]
pub enum Behavior {
    TypeResolver(TypeResolver),
    IsTypeOf(IsTypeOf),
    /// Static cost of resolving a field.
    Complexity(u64),
}

impl Behavior {
    pub fn name(&self) -> &'static str {
        match self {
            Behavior::TypeResolver(_) => "type_resolver",
            Behavior::IsTypeOf(_) => "is_type_of",
            Behavior::Complexity(_) => "complexity",
        }
    }
}

/// Side table of node id to attached behaviors, in attachment order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Behaviors {
    entries: IndexMap<NodeId, Vec<Behavior>>,
}

impl Behaviors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a behavior to a node.
    pub fn attach(&mut self, node: NodeId, behavior: Behavior) {
        self.entries.entry(node).or_default().push(behavior);
    }

    /// Replace everything attached to a node.
    pub fn replace(&mut self, node: NodeId, behaviors: Vec<Behavior>) {
        self.entries.insert(node, behaviors);
    }

    /// Behaviors attached to a node, empty if none.
    pub fn get(&self, node: &NodeId) -> &[Behavior] {
        self.entries.get(node).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&NodeId, &[Behavior])> {
        self.entries.iter().map(|(id, list)| (id, list.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
