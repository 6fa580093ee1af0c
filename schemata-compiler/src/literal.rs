//! Rendering of default values as SDL literals.
//!
//! The declared type decides how a raw [`Value`] prints: an `Int` under `ID`
//! is quoted, an enum default prints the value's alias, and non-null wrappers
//! never change the literal.

use std::fmt::Write;

use schemata_blueprint::{
    Blueprint, EnumType, InputObjectType, ScalarType, TypeDefinition, TypeRef, Value,
};

use crate::{
    Error, Result,
    sdl::{Adapter, LanguageConventions},
};

/// Renders raw default values against their declared types.
pub struct LiteralRenderer<'a> {
    blueprint: &'a Blueprint,
    adapter: &'a dyn Adapter,
}

impl<'a> LiteralRenderer<'a> {
    /// Create a renderer using the default naming conventions.
    pub fn new(blueprint: &'a Blueprint) -> Self {
        Self {
            blueprint,
            adapter: &LanguageConventions,
        }
    }

    /// Use a different naming adapter for input object field names.
    pub fn with_adapter(mut self, adapter: &'a dyn Adapter) -> Self {
        self.adapter = adapter;
        self
    }

    /// Render `value` as a literal of type `type_ref`.
    ///
    /// # Errors
    ///
    /// - [`Error::UnknownType`] if the type is not defined
    /// - [`Error::InvalidDefault`] if the value does not fit the type
    /// - [`Error::UnknownEnumValue`] if no enum value matches
    /// - [`Error::UnsupportedDefaultType`] for output types and compound input objects
    pub fn render(&self, type_ref: &TypeRef, value: &Value) -> Result<String> {
        if matches!(value, Value::Null) {
            return Ok("null".to_string());
        }

        match type_ref {
            TypeRef::NonNull(inner) => self.render(inner, value),
            TypeRef::List(item) => match value {
                Value::List(items) => {
                    let rendered = items
                        .iter()
                        .map(|item_value| self.render(item, item_value))
                        .collect::<Result<Vec<_>>>()?;
                    Ok(format!("[{}]", rendered.join(", ")))
                }
                // A single value is coerced to a one-element list.
                other => self.render(item, other),
            },
            TypeRef::Named(name) => self.render_named(name, value),
        }
    }

    fn render_named(&self, name: &str, value: &Value) -> Result<String> {
        let ty = self
            .blueprint
            .find_type(name)
            .ok_or_else(|| Error::UnknownType {
                name: name.to_string(),
                location: "a default value".to_string(),
            })?;

        match ty {
            TypeDefinition::Scalar(scalar) => render_scalar(scalar, value),
            TypeDefinition::Enum(enum_type) => render_enum(enum_type, value),
            TypeDefinition::InputObject(input) => self.render_input(input, value),
            TypeDefinition::Object(_) | TypeDefinition::Interface(_) | TypeDefinition::Union(_) => {
                Err(Error::UnsupportedDefaultType {
                    type_name: name.to_string(),
                    reason: format!("{} types cannot have default values", ty.kind()),
                })
            }
        }
    }

    fn render_input(&self, input: &InputObjectType, value: &Value) -> Result<String> {
        let Value::Object(entries) = value else {
            return Err(invalid(&input.name, "an input object", value));
        };

        let mut iter = entries.iter();
        let (key, field_value) = match (iter.next(), iter.next()) {
            (Some(entry), None) => entry,
            _ => {
                return Err(Error::UnsupportedDefaultType {
                    type_name: input.name.clone(),
                    reason: format!(
                        "input object defaults must set exactly one field, found {}",
                        entries.len()
                    ),
                });
            }
        };

        if !field_value.is_scalar() {
            return Err(Error::UnsupportedDefaultType {
                type_name: input.name.clone(),
                reason: format!("field `{key}` holds a nested {} value", field_value.kind_name()),
            });
        }

        let field = input.fields.get(key).ok_or_else(|| Error::InvalidDefault {
            type_name: input.name.clone(),
            expected: "one of its fields".to_string(),
            found: format!("`{key}`"),
        })?;

        let literal = self.render(&field.type_ref, field_value)?;
        Ok(format!("{{{}: {}}}", self.adapter.field_name(key), literal))
    }
}

/// Render a literal without a custom naming adapter.
pub fn render_literal(blueprint: &Blueprint, type_ref: &TypeRef, value: &Value) -> Result<String> {
    LiteralRenderer::new(blueprint).render(type_ref, value)
}

fn render_scalar(scalar: &ScalarType, value: &Value) -> Result<String> {
    if !scalar.builtin {
        return natural_literal(value).ok_or_else(|| Error::UnsupportedDefaultType {
            type_name: scalar.name.clone(),
            reason: format!("{} values are not supported for custom scalars", value.kind_name()),
        });
    }

    let name = scalar.name.as_str();
    match (name, value) {
        ("String", Value::String(s)) => Ok(quote(s)),
        ("Int", Value::Int(i)) => i32::try_from(*i)
            .map(|i| i.to_string())
            .map_err(|_| Error::InvalidDefault {
                type_name: name.to_string(),
                expected: "a 32-bit integer".to_string(),
                found: i.to_string(),
            }),
        ("Float", Value::Int(i)) => Ok(i.to_string()),
        ("Float", Value::Float(f)) => format_float(*f).ok_or_else(|| invalid(name, "a finite float", value)),
        ("Boolean", Value::Boolean(b)) => Ok(b.to_string()),
        ("ID", _) => match value {
            Value::String(s) | Value::Enum(s) => Ok(quote(s)),
            Value::Int(i) => Ok(quote(&i.to_string())),
            Value::Boolean(b) => Ok(quote(&b.to_string())),
            Value::Float(f) => format_float(*f)
                .map(|s| quote(&s))
                .ok_or_else(|| invalid(name, "a finite float", value)),
            _ => Err(invalid(name, "a scalar", value)),
        },
        _ => Err(invalid(name, expected_for(name), value)),
    }
}

fn render_enum(enum_type: &EnumType, value: &Value) -> Result<String> {
    let (Value::String(raw) | Value::Enum(raw)) = value else {
        return Err(invalid(&enum_type.name, "an enum value", value));
    };

    enum_type
        .find_value(raw)
        .map(|v| v.alias.clone())
        .ok_or_else(|| Error::UnknownEnumValue {
            enum_name: enum_type.name.clone(),
            value: raw.clone(),
        })
}

/// The literal a custom scalar prints for a single value.
fn natural_literal(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(quote(s)),
        Value::Int(i) => Some(i.to_string()),
        Value::Float(f) => format_float(*f),
        Value::Boolean(b) => Some(b.to_string()),
        Value::Enum(e) => Some(e.clone()),
        Value::Null => Some("null".to_string()),
        Value::List(_) | Value::Object(_) => None,
    }
}

/// Magnitudes outside `[EXP_BELOW, EXP_FROM)` print in exponent form.
const EXP_FROM: f64 = 1e15;
const EXP_BELOW: f64 = 1e-5;

/// Format a float so that it always reads as a float literal.
fn format_float(f: f64) -> Option<String> {
    if !f.is_finite() {
        return None;
    }
    let magnitude = f.abs();
    if magnitude >= EXP_FROM || (magnitude != 0.0 && magnitude < EXP_BELOW) {
        return Some(format!("{f:e}"));
    }
    let mut s = f.to_string();
    if !s.contains(['.', 'e', 'E']) {
        s.push_str(".0");
    }
    Some(s)
}

fn expected_for(scalar: &str) -> &'static str {
    match scalar {
        "String" => "a string",
        "Int" => "an integer",
        "Float" => "a number",
        "Boolean" => "a boolean",
        _ => "a scalar",
    }
}

fn invalid(type_name: &str, expected: &str, found: &Value) -> Error {
    Error::InvalidDefault {
        type_name: type_name.to_string(),
        expected: expected.to_string(),
        found: found.kind_name().to_string(),
    }
}

/// Quote and escape a string as an SDL string literal.
pub fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '\r' => out.push_str("\\r"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            c if c.is_control() => {
                let _ = write!(out, "\\u{:04X}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
