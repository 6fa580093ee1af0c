//! Manifest parsing from files and strings.

use std::{collections::HashSet, path::Path, str::FromStr};

use super::{Manifest, validate::ParseContext};
use crate::{Error, ImportDef, ObjectDef, Result, error::SourceContext};

impl FromStr for Manifest {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        parse_manifest(s, "schema.toml")
    }
}

impl Manifest {
    /// Parse a schema module from the given path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        parse_manifest(&content, &path.display().to_string())
    }

    /// Parse a schema module from a string with a custom filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        parse_manifest(content, filename)
    }
}

/// Parse a manifest from content with the given filename for error reporting.
pub fn parse_manifest(content: &str, filename: &str) -> Result<Manifest> {
    let source_ctx = SourceContext::new(content, filename);
    let manifest: Manifest = toml::from_str(content).map_err(|e| source_ctx.parse_error(e))?;
    validate_manifest(&manifest, content, filename)?;
    Ok(manifest)
}

/// Validate the manifest after parsing.
fn validate_manifest(manifest: &Manifest, src: &str, filename: &str) -> Result<()> {
    let ctx = ParseContext::new(src, filename);

    ctx.validate_name(manifest.name(), "module")?;

    for (op, name) in manifest.schema.roots() {
        ctx.push("schema").validate_name(name, op)?;
    }

    let mut seen = HashSet::new();
    for (kind, name) in manifest.declarations() {
        ctx.validate_name(name, kind)?;
        if !seen.insert(name) {
            return Err(ctx.error_at(format!("type '{name}' is declared more than once"), name));
        }
    }

    for (name, object) in &manifest.objects {
        validate_composite(&ctx.push(name), object)?;
    }

    for (name, interface) in &manifest.interfaces {
        validate_composite(&ctx.push(name), interface)?;
    }

    for (name, union) in &manifest.unions {
        if union.types.is_empty() {
            return Err(ctx.error_at(format!("union '{name}' must declare at least one member"), name));
        }
        let union_ctx = ctx.push(name);
        for member in &union.types {
            union_ctx.validate_name(member, "union member")?;
        }
    }

    for (name, enum_def) in &manifest.enums {
        if enum_def.values.is_empty() {
            return Err(ctx.error_at(format!("enum '{name}' must declare at least one value"), name));
        }

        let enum_ctx = ctx.push(name);
        let mut keys = HashSet::new();
        for value in &enum_def.values {
            enum_ctx.validate_name(value.key(), "enum value")?;
            if !keys.insert(value.key()) {
                return Err(enum_ctx.error_at(
                    format!("enum value '{}' is declared more than once in '{name}'", value.key()),
                    value.key(),
                ));
            }
        }
    }

    for (name, input) in &manifest.inputs {
        let input_ctx = ctx.push(name);
        validate_imports(&input_ctx, &input.import_fields)?;
        for (field_name, field) in &input.fields {
            input_ctx.validate_name(field_name, "input field")?;
            input_ctx.validate_name(field.field_type.base_name(), "type")?;
        }
    }

    Ok(())
}

fn validate_composite(ctx: &ParseContext<'_>, def: &ObjectDef) -> Result<()> {
    for interface in &def.interfaces {
        ctx.validate_name(interface, "interface")?;
    }

    validate_imports(ctx, &def.import_fields)?;

    for (field_name, field) in &def.fields {
        ctx.validate_name(field_name, "field")?;

        let field_ctx = ctx.push(field_name);
        for arg_name in field.args.keys() {
            field_ctx.validate_name(arg_name, "argument")?;
        }
    }
    Ok(())
}

fn validate_imports(ctx: &ParseContext<'_>, imports: &[ImportDef]) -> Result<()> {
    for import in imports {
        ctx.validate_name(import.source(), "import source")?;
        if let Some(module) = import.module() {
            ctx.validate_name(module, "module")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::{Deprecated, EnumValueDef, TypeExpr};

    const APP: &str = r#"
[module]
name = "app"

[schema]
query = "query"

[objects.query]
interfaces = ["node"]
import_fields = ["timestamps", { from = "audit", module = "shared", except = ["secret"] }]

[objects.query.fields.hello_world]
type = "string"
description = "Greets"
deprecated = "use hi"

[objects.query.fields.hello_world.args.name]
type = "string!"
default = "world"

[interfaces.node.fields.id]
type = "id!"

[unions.search_result]
types = ["user", "post"]

[enums.channel]
values = ["red", { key = "first", as = "FiRsT  x" }]

[inputs.filter.fields.limit]
type = "integer"
default = 10

[scalars.date_time]
description = "ISO-8601"
"#;

    #[test]
    fn test_parse_full_module() {
        let manifest: Manifest = APP.parse().unwrap();
        assert_eq!(manifest.name(), "app");
        assert_eq!(manifest.schema.query.as_deref(), Some("query"));

        let query = &manifest.objects["query"];
        assert_eq!(query.interfaces, ["node"]);
        assert_eq!(query.import_fields.len(), 2);
        assert_eq!(query.import_fields[0].source(), "timestamps");
        assert_eq!(query.import_fields[1].module(), Some("shared"));
        assert_eq!(query.import_fields[1].except(), ["secret".to_string()]);

        let field = &query.fields["hello_world"];
        assert_eq!(field.field_type, TypeExpr::Named("string".into()));
        assert_eq!(field.deprecated, Some(Deprecated::Reason("use hi".into())));
        let arg = &field.args["name"];
        assert_eq!(arg.arg_type.to_string(), "string!");
        assert_eq!(arg.default, Some(toml::Value::String("world".into())));

        let values = &manifest.enums["channel"].values;
        assert!(matches!(&values[0], EnumValueDef::Key(key) if key == "red"));
        assert_eq!(values[1].key(), "first");
        assert_eq!(values[1].alias(), Some("FiRsT  x"));

        assert_eq!(
            manifest.inputs["filter"].fields["limit"].default,
            Some(toml::Value::Integer(10))
        );
        assert_eq!(
            manifest.scalars["date_time"].description.as_deref(),
            Some("ISO-8601")
        );
    }

    #[test]
    fn test_declarations_keep_order() {
        let manifest: Manifest = APP.parse().unwrap();
        let names: Vec<_> = manifest.declarations().collect();
        assert_eq!(
            names,
            [
                ("object", "query"),
                ("interface", "node"),
                ("union", "search_result"),
                ("enum", "channel"),
                ("input", "filter"),
                ("scalar", "date_time"),
            ]
        );
    }

    #[test]
    fn test_fields_keep_declaration_order() {
        let src = r#"
[module]
name = "app"

[objects.user.fields.zeta]
type = "string"

[objects.user.fields.alpha]
type = "string"

[objects.user.fields.mid]
type = "string"
"#;
        let manifest: Manifest = src.parse().unwrap();
        let fields: Vec<_> = manifest.objects["user"].fields.keys().collect();
        assert_eq!(fields, ["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_parse_error_has_span() {
        let src = r#"
[module]
name = "app"

[objects.user.fields.name]
type = "[string"
"#;
        let err = Manifest::from_str_with_filename(src, "app.toml").unwrap_err();
        assert!(matches!(*err, Error::Parse { .. }));
        let span = err.span().unwrap();
        assert!(span.offset() > 0);
    }

    #[test]
    fn test_missing_module_is_parse_error() {
        let err = "[objects.user]".parse::<Manifest>().unwrap_err();
        assert!(matches!(*err, Error::Parse { .. }));
    }

    #[test]
    fn test_invalid_identifier() {
        let src = r#"
[module]
name = "app"

[objects."user-profile".fields.name]
type = "string"
"#;
        let err = src.parse::<Manifest>().unwrap_err();
        match *err {
            Error::InvalidIdentifier { name, context, .. } => {
                assert_eq!(name, "user-profile");
                assert_eq!(context, "object");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_empty_enum_rejected() {
        let src = r#"
[module]
name = "app"

[enums.color]
values = []
"#;
        let err = src.parse::<Manifest>().unwrap_err();
        assert!(matches!(*err, Error::Validation { .. }));
        assert_eq!(err.to_string(), "enum 'color' must declare at least one value");
        assert!(err.span().is_some());
    }

    #[test]
    fn test_empty_union_rejected() {
        let src = r#"
[module]
name = "app"

[unions.search]
types = []
"#;
        let err = src.parse::<Manifest>().unwrap_err();
        assert_eq!(err.to_string(), "union 'search' must declare at least one member");
    }

    #[test]
    fn test_duplicate_type_across_sections() {
        let src = r#"
[module]
name = "app"

[objects.user]

[scalars.user]
"#;
        let err = src.parse::<Manifest>().unwrap_err();
        assert_eq!(err.to_string(), "type 'user' is declared more than once");
    }

    #[test]
    fn test_duplicate_enum_key() {
        let src = r#"
[module]
name = "app"

[enums.color]
values = ["red", { key = "red", as = "CRIMSON" }]
"#;
        let err = src.parse::<Manifest>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "enum value 'red' is declared more than once in 'color'"
        );
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(APP.as_bytes()).unwrap();

        let manifest = Manifest::from_file(file.path()).unwrap();
        assert_eq!(manifest.name(), "app");
    }

    #[test]
    fn test_from_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let err = Manifest::from_file(dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(*err, Error::Io { .. }));
    }
}
