//! Lint for field and argument names that print the same.

use std::collections::HashMap;

use schemata_blueprint::Blueprint;

use super::super::Lint;
use crate::{
    Error,
    sdl::{Adapter, LanguageConventions},
};

/// Lint that errors when two fields of a type, or two arguments of a field,
/// map to one SDL name under the naming adapter.
///
/// `hello_world` and `helloWorld` are distinct in the blueprint but both
/// print as `helloWorld` with [`LanguageConventions`].
pub struct PrintedNameLint {
    adapter: &'static dyn Adapter,
}

impl PrintedNameLint {
    pub fn new(adapter: &'static dyn Adapter) -> Self {
        Self { adapter }
    }
}

impl Default for PrintedNameLint {
    fn default() -> Self {
        Self::new(&LanguageConventions)
    }
}

impl Lint for PrintedNameLint {
    fn name(&self) -> &'static str {
        "printed-name"
    }

    fn description(&self) -> &'static str {
        "Fields and arguments must print distinct names"
    }

    fn check(&self, blueprint: &Blueprint, errors: &mut Vec<Error>) {
        for ty in blueprint.types().filter(|ty| !ty.is_builtin()) {
            let Some(fields) = ty.fields() else {
                continue;
            };

            let location = format!("type `{}`", ty.name());
            collisions(
                fields.values().map(|f| f.name.as_str()),
                |name| self.adapter.field_name(name),
                &location,
                errors,
            );

            for field in fields.values() {
                let location = format!("field `{}.{}`", ty.name(), field.name);
                collisions(
                    field.arguments.values().map(|a| a.name.as_str()),
                    |name| self.adapter.argument_name(name),
                    &location,
                    errors,
                );
            }
        }
    }
}

fn collisions<'a>(
    names: impl Iterator<Item = &'a str>,
    print: impl Fn(&str) -> String,
    location: &str,
    errors: &mut Vec<Error>,
) {
    let mut seen: HashMap<String, &str> = HashMap::new();
    for name in names {
        let printed = print(name);
        match seen.get(&printed) {
            Some(first) => errors.push(Error::PrintedNameCollision {
                location: location.to_string(),
                printed,
                first: first.to_string(),
                second: name.to_string(),
            }),
            None => {
                seen.insert(printed, name);
            }
        }
    }
}
