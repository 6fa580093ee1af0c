//! Type expressions such as `string!` or `[user!]!`.

use std::{fmt, str::FromStr};

use serde::Deserialize;
use thiserror::Error;

/// A parsed type expression.
///
/// Grammar: `ty := ident '!'? | '[' ty ']' '!'?`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum TypeExpr {
    Named(String),
    NonNull(Box<TypeExpr>),
    List(Box<TypeExpr>),
}

/// A type expression that does not follow the grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid type expression `{expr}`: {reason}")]
pub struct TypeExprError {
    pub expr: String,
    pub reason: &'static str,
}

impl TypeExpr {
    /// The innermost identifier.
    pub fn base_name(&self) -> &str {
        match self {
            TypeExpr::Named(name) => name,
            TypeExpr::NonNull(inner) | TypeExpr::List(inner) => inner.base_name(),
        }
    }
}

impl FromStr for TypeExpr {
    type Err = TypeExprError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s.trim()).map_err(|reason| TypeExprError {
            expr: s.to_string(),
            reason,
        })
    }
}

impl TryFrom<String> for TypeExpr {
    type Error = TypeExprError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

fn parse(s: &str) -> Result<TypeExpr, &'static str> {
    let (body, non_null) = match s.strip_suffix('!') {
        Some(body) => (body.trim_end(), true),
        None => (s, false),
    };

    if non_null && body.ends_with('!') {
        return Err("a type can only be marked non-null once");
    }

    let base = if let Some(inner) = body.strip_prefix('[') {
        let inner = inner.strip_suffix(']').ok_or("unclosed list bracket")?;
        TypeExpr::List(Box::new(parse(inner.trim())?))
    } else {
        if let Some(reason) = schemata_core::invalid_name_reason(body) {
            return Err(reason);
        }
        TypeExpr::Named(body.to_string())
    };

    Ok(if non_null {
        TypeExpr::NonNull(Box::new(base))
    } else {
        base
    })
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeExpr::Named(name) => f.write_str(name),
            TypeExpr::NonNull(inner) => write!(f, "{inner}!"),
            TypeExpr::List(inner) => write!(f, "[{inner}]"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str) -> TypeExpr {
        TypeExpr::Named(name.to_string())
    }

    #[test]
    fn test_parse_named() {
        assert_eq!("string".parse::<TypeExpr>().unwrap(), named("string"));
        assert_eq!(
            "string!".parse::<TypeExpr>().unwrap(),
            TypeExpr::NonNull(Box::new(named("string")))
        );
    }

    #[test]
    fn test_parse_list() {
        let expr: TypeExpr = "[user!]!".parse().unwrap();
        assert_eq!(
            expr,
            TypeExpr::NonNull(Box::new(TypeExpr::List(Box::new(TypeExpr::NonNull(
                Box::new(named("user"))
            )))))
        );
        assert_eq!(expr.base_name(), "user");
        assert_eq!(expr.to_string(), "[user!]!");
    }

    #[test]
    fn test_parse_nested_list() {
        let expr: TypeExpr = "[[int]]".parse().unwrap();
        assert_eq!(expr.to_string(), "[[int]]");
    }

    #[test]
    fn test_parse_errors() {
        assert!("".parse::<TypeExpr>().is_err());
        assert!("string!!".parse::<TypeExpr>().is_err());
        assert!("[string".parse::<TypeExpr>().is_err());
        assert!("1st".parse::<TypeExpr>().is_err());
        assert!("big int".parse::<TypeExpr>().is_err());
    }

    #[test]
    fn test_error_message() {
        let err = "[string".parse::<TypeExpr>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid type expression `[string`: unclosed list bracket"
        );
    }
}
