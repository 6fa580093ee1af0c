//! Type references with non-null and list wrappers.

use std::fmt;

use serde::{Serialize, Serializer};

/// A reference to a named type, possibly wrapped in non-null or list markers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
    Named(String),
    NonNull(Box<TypeRef>),
    List(Box<TypeRef>),
}

impl TypeRef {
    /// Reference a named type.
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    /// Wrap a type in a non-null marker.
    pub fn non_null(inner: TypeRef) -> Self {
        Self::NonNull(Box::new(inner))
    }

    /// Wrap a type in a list.
    pub fn list(inner: TypeRef) -> Self {
        Self::List(Box::new(inner))
    }

    /// The innermost named type.
    pub fn base_name(&self) -> &str {
        match self {
            Self::Named(name) => name,
            Self::NonNull(inner) | Self::List(inner) => inner.base_name(),
        }
    }

    /// Returns true if the outermost wrapper is non-null.
    pub fn is_non_null(&self) -> bool {
        matches!(self, Self::NonNull(_))
    }

    /// The type with its outermost non-null wrapper removed.
    pub fn nullable(&self) -> &TypeRef {
        match self {
            Self::NonNull(inner) => inner,
            other => other,
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => f.write_str(name),
            Self::NonNull(inner) => write!(f, "{}!", inner),
            Self::List(inner) => write!(f, "[{}]", inner),
        }
    }
}

impl Serialize for TypeRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
