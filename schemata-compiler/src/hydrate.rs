//! Hydration - attaching runtime behavior to blueprint nodes.
//!
//! Hydrators are consulted for every node, top-down, with the chain of
//! ancestors from the schema root. Whatever behaviors they return replace
//! the node's entry in the blueprint's behavior table, so hydrating twice
//! leaves the same table. The SDL printer never looks at behaviors.

use std::{fmt, sync::Arc};

use schemata_blueprint::{Behavior, Blueprint, Node, NodeId, TypeDefinition};
use tracing::debug;

use crate::pipeline::{Phase, PhaseResult};

/// Supplies runtime behaviors for blueprint nodes.
pub trait Hydrator: Send + Sync {
    /// Behaviors for `node`. `ancestors` runs from the schema root down to
    /// the node's parent. An empty result attaches nothing.
    fn hydrate(&self, node: Node<'_>, ancestors: &[Node<'_>]) -> Vec<Behavior>;
}

impl<F> Hydrator for F
where
    F: Fn(Node<'_>, &[Node<'_>]) -> Vec<Behavior> + Send + Sync,
{
    fn hydrate(&self, node: Node<'_>, ancestors: &[Node<'_>]) -> Vec<Behavior> {
        self(node, ancestors)
    }
}

/// An ordered set of hydrators.
#[derive(Clone, Default)]
pub struct Hydration {
    hydrators: Vec<Arc<dyn Hydrator>>,
}

impl Hydration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a hydrator. Hydrators run in the order they were added.
    pub fn with(mut self, hydrator: impl Hydrator + 'static) -> Self {
        self.hydrators.push(Arc::new(hydrator));
        self
    }

    /// Add a closure as a hydrator.
    pub fn with_fn<F>(self, f: F) -> Self
    where
        F: Fn(Node<'_>, &[Node<'_>]) -> Vec<Behavior> + Send + Sync + 'static,
    {
        self.with(f)
    }

    pub fn len(&self) -> usize {
        self.hydrators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hydrators.is_empty()
    }

    fn visit(
        &self,
        node: Node<'_>,
        ancestors: &[Node<'_>],
        id: impl FnOnce() -> NodeId,
        out: &mut Vec<(NodeId, Vec<Behavior>)>,
    ) {
        let behaviors: Vec<Behavior> = self
            .hydrators
            .iter()
            .flat_map(|h| h.hydrate(node, ancestors))
            .collect();
        if behaviors.is_empty() {
            return;
        }

        out.push((id(), behaviors));
    }
}

impl fmt::Debug for Hydration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hydration")
            .field("hydrators", &self.hydrators.len())
            .finish()
    }
}

/// The last structural phase: runs a [`Hydration`] over the blueprint.
///
/// Traversal order is the schema node, then each type in registration
/// order. Within a type come its fields each followed by their arguments,
/// or its enum values.
pub struct HydratePhase {
    hydration: Hydration,
}

impl HydratePhase {
    pub const NAME: &'static str = "hydrate";

    pub fn new(hydration: Hydration) -> Self {
        Self { hydration }
    }
}

impl Phase for HydratePhase {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn description(&self) -> &str {
        "Attach runtime behaviors to schema nodes"
    }

    fn run(&self, blueprint: Blueprint) -> PhaseResult {
        if self.hydration.is_empty() {
            return Ok(blueprint);
        }

        let attached = collect(&self.hydration, &blueprint);
        debug!(nodes = attached.len(), "hydrated blueprint");

        Ok(attached
            .into_iter()
            .fold(blueprint, |bp, (id, behaviors)| bp.with_behaviors(id, behaviors)))
    }
}

fn collect(hydration: &Hydration, blueprint: &Blueprint) -> Vec<(NodeId, Vec<Behavior>)> {
    let mut out = Vec::new();
    let schema = Node::Schema(blueprint.schema());
    hydration.visit(schema, &[], || NodeId::Schema, &mut out);

    for ty in blueprint.types() {
        let type_node = Node::Type(ty);
        hydration.visit(type_node, &[schema], || NodeId::for_type(ty.name()), &mut out);

        if let TypeDefinition::Enum(enum_type) = ty {
            for value in enum_type.values.values() {
                hydration.visit(
                    Node::EnumValue(value),
                    &[schema, type_node],
                    || NodeId::for_enum_value(ty.name(), &value.key),
                    &mut out,
                );
            }
            continue;
        }

        for field in ty.fields().into_iter().flat_map(|f| f.values()) {
            let field_node = Node::Field(field);
            hydration.visit(
                field_node,
                &[schema, type_node],
                || NodeId::for_field(ty.name(), &field.name),
                &mut out,
            );

            for arg in field.arguments.values() {
                hydration.visit(
                    Node::Argument(arg),
                    &[schema, type_node, field_node],
                    || NodeId::for_argument(ty.name(), &field.name, &arg.name),
                    &mut out,
                );
            }
        }
    }

    out
}
