//! Lint for enum values that print the same.

use std::collections::HashSet;

use schemata_blueprint::{Blueprint, TypeDefinition};

use super::super::Lint;
use crate::Error;

/// Lint that errors when two values of one enum share an alias.
pub struct DuplicateEnumAliasLint;

impl Lint for DuplicateEnumAliasLint {
    fn name(&self) -> &'static str {
        "duplicate-enum-alias"
    }

    fn description(&self) -> &'static str {
        "Enum values must print distinct names"
    }

    fn check(&self, blueprint: &Blueprint, errors: &mut Vec<Error>) {
        for ty in blueprint.types() {
            let TypeDefinition::Enum(enum_type) = ty else {
                continue;
            };

            let mut seen = HashSet::new();
            for value in enum_type.values.values() {
                if !seen.insert(value.alias.as_str()) {
                    errors.push(Error::DuplicateEnumAlias {
                        enum_name: enum_type.name.clone(),
                        alias: value.alias.clone(),
                    });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use schemata_blueprint::{EnumType, EnumValueDefinition};

    use super::*;

    #[test]
    fn test_distinct_aliases() {
        let bp = Blueprint::new()
            .add_type(
                EnumType::new("Channel")
                    .with_value(EnumValueDefinition::new("red"))
                    .with_value(EnumValueDefinition::new("first").with_alias("FiRsT  x")),
            )
            .unwrap();

        let mut errors = Vec::new();
        DuplicateEnumAliasLint.check(&bp, &mut errors);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_alias_clash() {
        // `red` prints as RED by default.
        let bp = Blueprint::new()
            .add_type(
                EnumType::new("Channel")
                    .with_value(EnumValueDefinition::new("red"))
                    .with_value(EnumValueDefinition::new("crimson").with_alias("RED")),
            )
            .unwrap();

        let mut errors = Vec::new();
        DuplicateEnumAliasLint.check(&bp, &mut errors);
        assert_eq!(
            errors,
            [Error::DuplicateEnumAlias {
                enum_name: "Channel".into(),
                alias: "RED".into(),
            }]
        );
    }
}
