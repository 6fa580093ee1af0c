//! Blueprint to SDL text.

use schemata_blueprint::{
    ArgumentDefinition, Blueprint, Deprecation, EnumType, FieldDefinition, FieldMap,
    SchemaDefinition, TypeDefinition, TypeRef, UnionType,
};

use super::{Adapter, LanguageConventions};
use crate::{
    Error, LiteralRenderer, Result,
    builder::{CodeBuilder, Indent},
    literal::quote,
};

/// Prints a compiled [`Blueprint`] as SDL.
///
/// # Example
///
/// ```
/// use schemata_blueprint::{Blueprint, FieldDefinition, ObjectType, SchemaDefinition, TypeRef};
/// use schemata_compiler::sdl::SdlPrinter;
///
/// let blueprint = Blueprint::new()
///     .with_schema(SchemaDefinition::default().with_query("Query"))
///     .add_type(
///         ObjectType::new("Query")
///             .with_field(FieldDefinition::new("hello_world", TypeRef::named("String"))),
///     )
///     .unwrap();
///
/// let sdl = SdlPrinter::new(&blueprint).print().unwrap();
/// assert_eq!(
///     sdl,
///     "schema {\n  query: Query\n}\n\ntype Query {\n  helloWorld: String\n}\n"
/// );
/// ```
pub struct SdlPrinter<'a> {
    blueprint: &'a Blueprint,
    adapter: &'a dyn Adapter,
    indent: Indent,
}

impl<'a> SdlPrinter<'a> {
    pub fn new(blueprint: &'a Blueprint) -> Self {
        Self {
            blueprint,
            adapter: &LanguageConventions,
            indent: Indent::SDL,
        }
    }

    /// Use a different naming adapter for fields and arguments.
    pub fn adapter(mut self, adapter: &'a dyn Adapter) -> Self {
        self.adapter = adapter;
        self
    }

    pub fn indent(mut self, indent: Indent) -> Self {
        self.indent = indent;
        self
    }

    /// Print the whole schema.
    ///
    /// # Errors
    ///
    /// Fails if a field references an undefined type or a default value
    /// cannot be rendered.
    pub fn print(&self) -> Result<String> {
        let mut b = CodeBuilder::new(self.indent);

        let schema = self.blueprint.schema();
        if !schema.is_empty() {
            print_schema(&mut b, schema);
        }

        for ty in self.blueprint.types().filter(|ty| !ty.is_builtin()) {
            if !b.is_empty() {
                b.push_blank();
            }
            self.print_type(&mut b, ty)?;
        }

        Ok(b.build())
    }

    fn print_type(&self, b: &mut CodeBuilder, ty: &TypeDefinition) -> Result<()> {
        push_description(b, ty.description());

        match ty {
            TypeDefinition::Object(object) => {
                let header = format!("type {}{}", object.name, implements(&object.interfaces));
                self.print_fields(b, &header, &object.fields, false)
            }
            TypeDefinition::Interface(interface) => {
                let header = format!(
                    "interface {}{}",
                    interface.name,
                    implements(&interface.interfaces)
                );
                self.print_fields(b, &header, &interface.fields, false)
            }
            TypeDefinition::InputObject(input) => {
                let header = format!("input {}", input.name);
                self.print_fields(b, &header, &input.fields, true)
            }
            TypeDefinition::Union(union) => {
                print_union(b, union);
                Ok(())
            }
            TypeDefinition::Enum(enum_type) => {
                print_enum(b, enum_type);
                Ok(())
            }
            TypeDefinition::Scalar(scalar) => {
                b.push_line(&format!("scalar {}", scalar.name));
                Ok(())
            }
        }
    }

    fn print_fields(
        &self,
        b: &mut CodeBuilder,
        header: &str,
        fields: &FieldMap,
        input: bool,
    ) -> Result<()> {
        if fields.is_empty() {
            b.push_line(header);
            return Ok(());
        }

        b.push_line(&format!("{header} {{"));
        b.push_indent();
        for field in fields.values() {
            push_description(b, field.description.as_deref());
            if input {
                self.print_input_field(b, field)?;
            } else {
                self.print_field(b, field)?;
            }
        }
        b.push_dedent();
        b.push_line("}");
        Ok(())
    }

    fn print_field(&self, b: &mut CodeBuilder, field: &FieldDefinition) -> Result<()> {
        let location = || format!("field `{}.{}`", field.parent, field.name);
        let name = self.adapter.field_name(&field.name);
        let ty = self.type_ref(&field.type_ref, location)?;
        let directive = deprecated(field.deprecation.as_ref());

        if field.arguments.is_empty() {
            b.push_line(&format!("{name}: {ty}{directive}"));
            return Ok(());
        }

        let multiline = field.arguments.values().any(|arg| arg.description.is_some());
        if !multiline {
            let args = field
                .arguments
                .values()
                .map(|arg| self.argument(field, arg))
                .collect::<Result<Vec<_>>>()?;
            b.push_line(&format!("{name}({}): {ty}{directive}", args.join(", ")));
            return Ok(());
        }

        b.push_line(&format!("{name}("));
        b.push_indent();
        for arg in field.arguments.values() {
            push_description(b, arg.description.as_deref());
            b.push_line(&self.argument(field, arg)?);
        }
        b.push_dedent();
        b.push_line(&format!("): {ty}{directive}"));
        Ok(())
    }

    fn argument(&self, field: &FieldDefinition, arg: &ArgumentDefinition) -> Result<String> {
        let location = || format!("argument `{}.{}({})`", field.parent, field.name, arg.name);
        let name = self.adapter.argument_name(&arg.name);
        let ty = self.type_ref(&arg.type_ref, location)?;
        let default = self.default(&arg.type_ref, arg.default_value.as_ref())?;
        Ok(format!("{name}: {ty}{default}"))
    }

    fn print_input_field(&self, b: &mut CodeBuilder, field: &FieldDefinition) -> Result<()> {
        let location = || format!("input field `{}.{}`", field.parent, field.name);
        let name = self.adapter.field_name(&field.name);
        let ty = self.type_ref(&field.type_ref, location)?;
        let default = self.default(&field.type_ref, field.default_value.as_ref())?;
        let directive = deprecated(field.deprecation.as_ref());
        b.push_line(&format!("{name}: {ty}{default}{directive}"));
        Ok(())
    }

    fn type_ref(&self, type_ref: &TypeRef, location: impl FnOnce() -> String) -> Result<String> {
        let name = type_ref.base_name();
        if !self.blueprint.contains_type(name) {
            return Err(Error::UnknownType {
                name: name.to_string(),
                location: location(),
            });
        }
        Ok(type_ref.to_string())
    }

    fn default(
        &self,
        type_ref: &TypeRef,
        value: Option<&schemata_blueprint::Value>,
    ) -> Result<String> {
        let Some(value) = value else {
            return Ok(String::new());
        };
        let literal = LiteralRenderer::new(self.blueprint)
            .with_adapter(self.adapter)
            .render(type_ref, value)?;
        Ok(format!(" = {literal}"))
    }
}

/// Print a blueprint with the default naming conventions.
pub fn print_sdl(blueprint: &Blueprint) -> Result<String> {
    SdlPrinter::new(blueprint).print()
}

fn print_schema(b: &mut CodeBuilder, schema: &SchemaDefinition) {
    b.push_block("schema {", "}", |b| {
        for (operation, name) in schema.roots() {
            b.push_line(&format!("{operation}: {name}"));
        }
    });
}

fn print_union(b: &mut CodeBuilder, union: &UnionType) {
    if union.types.is_empty() {
        b.push_line(&format!("union {}", union.name));
    } else {
        b.push_line(&format!("union {} = {}", union.name, union.types.join(" | ")));
    }
}

fn print_enum(b: &mut CodeBuilder, enum_type: &EnumType) {
    let header = format!("enum {}", enum_type.name);
    if enum_type.values.is_empty() {
        b.push_line(&header);
        return;
    }

    b.push_block(&format!("{header} {{"), "}", |b| {
        for value in enum_type.values.values() {
            push_description(b, value.description.as_deref());
            b.push_line(&format!(
                "{}{}",
                value.alias,
                deprecated(value.deprecation.as_ref())
            ));
        }
    });
}

fn implements(interfaces: &[String]) -> String {
    if interfaces.is_empty() {
        String::new()
    } else {
        format!(" implements {}", interfaces.join(" & "))
    }
}

fn deprecated(deprecation: Option<&Deprecation>) -> String {
    match deprecation {
        None => String::new(),
        Some(Deprecation { reason: None }) => " @deprecated".to_string(),
        Some(Deprecation {
            reason: Some(reason),
        }) => format!(" @deprecated(reason: {})", quote(reason)),
    }
}

fn push_description(b: &mut CodeBuilder, description: Option<&str>) {
    let Some(description) = description else {
        return;
    };
    b.push_line("\"\"\"");
    b.push_lines(&description.replace("\"\"\"", "\\\"\"\""));
    b.push_line("\"\"\"");
}

#[cfg(test)]
mod tests {
    use schemata_blueprint::{
        EnumValueDefinition, InputObjectType, InterfaceType, ObjectType, ScalarType, Value,
    };

    use super::*;
    use crate::sdl::Passthrough;

    fn query(field: FieldDefinition) -> Blueprint {
        Blueprint::new()
            .with_schema(SchemaDefinition::default().with_query("Query"))
            .add_type(ObjectType::new("Query").with_field(field))
            .unwrap()
    }

    #[test]
    fn test_empty_blueprint_prints_nothing() {
        assert_eq!(print_sdl(&Blueprint::new()).unwrap(), "");
    }

    #[test]
    fn test_field_with_arguments() {
        let field = FieldDefinition::new("hello_world", TypeRef::named("String")).with_argument(
            ArgumentDefinition::new("name", TypeRef::non_null(TypeRef::named("String"))),
        );
        let sdl = print_sdl(&query(field)).unwrap();
        assert!(sdl.contains("  helloWorld(name: String!): String\n"));
    }

    #[test]
    fn test_passthrough_adapter() {
        let field = FieldDefinition::new("hello_world", TypeRef::named("String"));
        let bp = query(field);
        let sdl = SdlPrinter::new(&bp).adapter(&Passthrough).print().unwrap();
        assert!(sdl.contains("  hello_world: String\n"));
    }

    #[test]
    fn test_argument_default() {
        let field = FieldDefinition::new("items", TypeRef::list(TypeRef::named("Int")))
            .with_argument(ArgumentDefinition::new("first", TypeRef::named("Int")).with_default(10_i64));
        let sdl = print_sdl(&query(field)).unwrap();
        assert!(sdl.contains("  items(first: Int = 10): [Int]\n"));
    }

    #[test]
    fn test_described_arguments_print_one_per_line() {
        let field = FieldDefinition::new("user", TypeRef::named("String"))
            .with_argument(ArgumentDefinition::new("id", TypeRef::named("ID")).with_description("Who"))
            .with_argument(ArgumentDefinition::new("active", TypeRef::named("Boolean")));
        let sdl = print_sdl(&query(field)).unwrap();
        assert!(sdl.contains(
            "  user(\n    \"\"\"\n    Who\n    \"\"\"\n    id: ID\n    active: Boolean\n  ): String\n"
        ));
    }

    #[test]
    fn test_deprecations() {
        let field = FieldDefinition::new("old", TypeRef::named("String")).deprecated(Some("use \"new\""));
        let sdl = print_sdl(&query(field)).unwrap();
        assert!(sdl.contains("  old: String @deprecated(reason: \"use \\\"new\\\"\")\n"));

        let field = FieldDefinition::new("older", TypeRef::named("String")).deprecated(None);
        let sdl = print_sdl(&query(field)).unwrap();
        assert!(sdl.contains("  older: String @deprecated\n"));
    }

    #[test]
    fn test_types_in_registration_order() {
        let bp = Blueprint::new()
            .add_type(ScalarType::new("Date").with_description("ISO-8601"))
            .unwrap()
            .add_type(
                InterfaceType::new("Node")
                    .with_field(FieldDefinition::new("id", TypeRef::non_null(TypeRef::named("ID")))),
            )
            .unwrap()
            .add_type(
                ObjectType::new("User")
                    .with_interface("Node")
                    .with_field(FieldDefinition::new("id", TypeRef::non_null(TypeRef::named("ID")))),
            )
            .unwrap()
            .add_type(UnionType::new("Search").with_member("User"))
            .unwrap()
            .add_type(
                EnumType::new("Channel")
                    .with_value(EnumValueDefinition::new("red"))
                    .with_value(EnumValueDefinition::new("first").with_alias("FiRsT  x")),
            )
            .unwrap()
            .add_type(
                InputObjectType::new("Filter").with_field(
                    FieldDefinition::new("channel", TypeRef::named("Channel"))
                        .with_default(Value::Enum("first".into())),
                ),
            )
            .unwrap();

        let expected = r#""""
ISO-8601
"""
scalar Date

interface Node {
  id: ID!
}

type User implements Node {
  id: ID!
}

union Search = User

enum Channel {
  RED
  FiRsT  x
}

input Filter {
  channel: Channel = FiRsT  x
}
"#;
        assert_eq!(print_sdl(&bp).unwrap(), expected);
    }

    #[test]
    fn test_type_without_fields_has_no_braces() {
        let bp = Blueprint::new().add_type(ObjectType::new("Empty")).unwrap();
        assert_eq!(print_sdl(&bp).unwrap(), "type Empty\n");
    }

    #[test]
    fn test_unknown_field_type_is_an_error() {
        let field = FieldDefinition::new("user", TypeRef::named("User"));
        let err = print_sdl(&query(field)).unwrap_err();
        assert_eq!(
            err,
            Error::UnknownType {
                name: "User".into(),
                location: "field `Query.user`".into(),
            }
        );
    }

    #[test]
    fn test_unrenderable_default_is_an_error() {
        let field = FieldDefinition::new("ok", TypeRef::named("Boolean"))
            .with_argument(ArgumentDefinition::new("flag", TypeRef::named("Boolean")).with_default("x"));
        let err = print_sdl(&query(field)).unwrap_err();
        assert!(matches!(err, Error::InvalidDefault { .. }));
    }
}
