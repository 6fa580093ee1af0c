//! Lint for the reserved `__` prefix.

use schemata_blueprint::Blueprint;

use super::{super::Lint, describe, named_nodes};
use crate::Error;

/// Lint that errors on user names starting with `__`.
pub struct ReservedPrefixLint;

impl Lint for ReservedPrefixLint {
    fn name(&self) -> &'static str {
        "reserved-prefix"
    }

    fn description(&self) -> &'static str {
        "Names beginning with \"__\" are reserved for introspection"
    }

    fn check(&self, blueprint: &Blueprint, errors: &mut Vec<Error>) {
        for (name, node) in named_nodes(blueprint) {
            if name.starts_with("__") {
                errors.push(Error::ReservedName {
                    name: name.to_string(),
                    location: describe(&node),
                });
            }
        }
    }
}
