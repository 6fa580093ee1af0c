//! Lint for GraphQL name syntax.

use schemata_blueprint::{Blueprint, NodeId};
use schemata_core::invalid_name_reason;

use super::{super::Lint, describe, named_nodes};
use crate::Error;

/// Lint that errors on names outside `[_A-Za-z][_0-9A-Za-z]*`.
pub struct NamingLint;

impl Lint for NamingLint {
    fn name(&self) -> &'static str {
        "naming"
    }

    fn description(&self) -> &'static str {
        "Type, field, and argument names must be valid GraphQL names"
    }

    fn check(&self, blueprint: &Blueprint, errors: &mut Vec<Error>) {
        for (name, node) in named_nodes(blueprint) {
            // Enum value keys are internal; only their aliases are printed.
            if matches!(node, NodeId::EnumValue { .. }) {
                continue;
            }
            if let Some(reason) = invalid_name_reason(name) {
                errors.push(Error::InvalidName {
                    name: name.to_string(),
                    location: describe(&node),
                    reason: reason.to_string(),
                });
            }
        }
    }
}
