//! Imports phase - copies borrowed fields into their importing types.

use std::collections::HashSet;

use schemata_blueprint::{Blueprint, FieldDefinition, FieldImport};

use crate::{
    Error, PhaseErrors, Result,
    pipeline::{Phase, PhaseResult},
};

/// Phase that resolves every pending [`FieldImport`].
///
/// Fields already present on the importing type win over imported ones, and
/// an earlier import wins over a later one. Imports of the source type are
/// resolved first, so borrowing is transitive.
pub struct ImportsPhase;

impl Phase for ImportsPhase {
    fn name(&self) -> &str {
        "imports"
    }

    fn description(&self) -> &str {
        "Copy imported fields into their target types"
    }

    fn run(&self, mut blueprint: Blueprint) -> PhaseResult {
        let pending: Vec<String> = blueprint
            .types()
            .filter(|ty| !ty.imports().is_empty())
            .map(|ty| ty.name().to_string())
            .collect();

        let mut errors = PhaseErrors::new();
        let mut done = HashSet::new();
        for name in pending {
            let mut stack = Vec::new();
            if let Err(err) = resolve(&mut blueprint, &name, &mut stack, &mut done) {
                errors.push(err);
                // Types on a failed chain are not reported twice.
                done.extend(stack);
            }
        }

        errors.into_result(blueprint)
    }
}

fn resolve(
    blueprint: &mut Blueprint,
    name: &str,
    stack: &mut Vec<String>,
    done: &mut HashSet<String>,
) -> Result<()> {
    if done.contains(name) {
        return Ok(());
    }

    if let Some(start) = stack.iter().position(|n| n == name) {
        let mut path = stack[start..].to_vec();
        path.push(name.to_string());
        return Err(Error::ImportCycle { path });
    }

    let imports = blueprint
        .find_type(name)
        .map(|ty| ty.imports().to_vec())
        .unwrap_or_default();

    stack.push(name.to_string());
    let mut borrowed: Vec<FieldDefinition> = Vec::new();
    for import in &imports {
        let source = find_source(blueprint, name, import)?;
        resolve(blueprint, &source, stack, done)?;
        borrowed.extend(copy_fields(blueprint, &source, import)?);
    }
    stack.pop();

    if let Some(ty) = blueprint.type_mut(name) {
        ty.take_imports();
        if let Some(fields) = ty.fields_mut() {
            for mut field in borrowed {
                if fields.contains_key(&field.name) {
                    continue;
                }
                field.parent = name.to_string();
                fields.insert(field.name.clone(), field);
            }
        }
    }

    done.insert(name.to_string());
    Ok(())
}

/// Name of the type an import reads from.
fn find_source(blueprint: &Blueprint, importer: &str, import: &FieldImport) -> Result<String> {
    let found = match &import.module {
        Some(module) => blueprint
            .types_by_name(module)
            .get(import.source.as_str())
            .map(|ty| ty.name().to_string()),
        None => blueprint
            .find_type(&import.source)
            .map(|ty| ty.name().to_string()),
    };

    found.ok_or_else(|| Error::UnknownType {
        name: import.source.clone(),
        location: match &import.module {
            Some(module) => format!("field import of `{importer}` from module `{module}`"),
            None => format!("field import of `{importer}`"),
        },
    })
}

fn copy_fields(
    blueprint: &Blueprint,
    source: &str,
    import: &FieldImport,
) -> Result<Vec<FieldDefinition>> {
    let ty = blueprint
        .find_type(source)
        .ok_or_else(|| schemata_blueprint::Error::UnknownType {
            name: source.to_string(),
        })?;
    let fields = ty
        .fields()
        .ok_or_else(|| schemata_blueprint::Error::NotAFieldContainer {
            name: source.to_string(),
            kind: ty.kind(),
        })?;

    Ok(fields
        .values()
        .filter(|field| !import.except.contains(&field.name))
        .cloned()
        .collect())
}

#[cfg(test)]
mod tests {
    use schemata_blueprint::{EnumType, EnumValueDefinition, ObjectType, TypeKind, TypeRef};

    use super::*;

    fn field(name: &str) -> FieldDefinition {
        FieldDefinition::new(name, TypeRef::named("String"))
    }

    fn field_names(bp: &Blueprint, ty: &str) -> Vec<String> {
        bp.find_type(ty)
            .and_then(|ty| ty.fields())
            .map(|fields| fields.keys().cloned().collect())
            .unwrap_or_default()
    }

    #[test]
    fn test_copies_fields_except_excluded() {
        let bp = Blueprint::new()
            .add_type(
                ObjectType::new("Audit")
                    .with_field(field("created_at"))
                    .with_field(field("secret")),
            )
            .unwrap()
            .add_type(
                ObjectType::new("User")
                    .with_field(field("name"))
                    .with_import(FieldImport::new("Audit").except(["secret"])),
            )
            .unwrap();

        let bp = ImportsPhase.run(bp).unwrap();

        assert_eq!(field_names(&bp, "User"), ["name", "created_at"]);
        assert_eq!(bp.find_field("User", "created_at").unwrap().parent, "User");
        assert!(bp.find_type("User").unwrap().imports().is_empty());
    }

    #[test]
    fn test_existing_fields_win() {
        let bp = Blueprint::new()
            .add_type(ObjectType::new("Base").with_field(field("name").with_description("base")))
            .unwrap()
            .add_type(
                ObjectType::new("User")
                    .with_field(field("name").with_description("own"))
                    .with_import(FieldImport::new("Base")),
            )
            .unwrap();

        let bp = ImportsPhase.run(bp).unwrap();
        let name = bp.find_field("User", "name").unwrap();
        assert_eq!(name.description.as_deref(), Some("own"));
    }

    #[test]
    fn test_transitive_imports() {
        let bp = Blueprint::new()
            .add_type(
                ObjectType::new("A")
                    .with_field(field("a"))
                    .with_import(FieldImport::new("B")),
            )
            .unwrap()
            .add_type(
                ObjectType::new("B")
                    .with_field(field("b"))
                    .with_import(FieldImport::new("C")),
            )
            .unwrap()
            .add_type(ObjectType::new("C").with_field(field("c")))
            .unwrap();

        let bp = ImportsPhase.run(bp).unwrap();
        assert_eq!(field_names(&bp, "A"), ["a", "b", "c"]);
        assert_eq!(field_names(&bp, "B"), ["b", "c"]);
    }

    #[test]
    fn test_cycle_is_reported_once() {
        let bp = Blueprint::new()
            .add_type(ObjectType::new("A").with_import(FieldImport::new("B")))
            .unwrap()
            .add_type(ObjectType::new("B").with_import(FieldImport::new("A")))
            .unwrap();

        let errors = ImportsPhase.run(bp).unwrap_err();
        assert_eq!(
            errors.into_vec(),
            [Error::ImportCycle {
                path: vec!["A".into(), "B".into(), "A".into()],
            }]
        );
    }

    #[test]
    fn test_module_restricted_source() {
        let bp = Blueprint::new()
            .add_type(
                ObjectType::new("Audit")
                    .with_module("shared")
                    .with_field(field("created_at")),
            )
            .unwrap()
            .add_type(ObjectType::new("User").with_import(FieldImport::new("Audit").from_module("app")))
            .unwrap();

        let errors = ImportsPhase.run(bp).unwrap_err();
        assert_eq!(
            errors.into_vec(),
            [Error::UnknownType {
                name: "Audit".into(),
                location: "field import of `User` from module `app`".into(),
            }]
        );
    }

    #[test]
    fn test_source_must_hold_fields() {
        let bp = Blueprint::new()
            .add_type(EnumType::new("Color").with_value(EnumValueDefinition::new("red")))
            .unwrap()
            .add_type(ObjectType::new("User").with_import(FieldImport::new("Color")))
            .unwrap();

        let errors = ImportsPhase.run(bp).unwrap_err();
        assert_eq!(
            errors.into_vec(),
            [Error::Blueprint(schemata_blueprint::Error::NotAFieldContainer {
                name: "Color".into(),
                kind: TypeKind::Enum,
            })]
        );
    }
}
