//! Compiler errors.

use std::fmt;

use schemata_blueprint::TypeKind;
use thiserror::Error;

/// Result type for compiler operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// A single compile error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("unknown type `{name}` referenced by {location}")]
    UnknownType { name: String, location: String },

    #[error("cannot insert `{phase}`: no phase named `{anchor}`")]
    AnchorNotFound { anchor: String, phase: String },

    #[error("phase `{name}` is already in the pipeline")]
    DuplicatePhase { name: String },

    #[error("no phase named `{name}`")]
    PhaseNotFound { name: String },

    #[error("`{type_name}` implements `{interface}` but does not define field `{field}`")]
    InterfaceConformanceViolation {
        type_name: String,
        interface: String,
        field: String,
    },

    #[error("cannot render a default value for `{type_name}`: {reason}")]
    UnsupportedDefaultType { type_name: String, reason: String },

    #[error("invalid default value for `{type_name}`: expected {expected}, found {found}")]
    InvalidDefault {
        type_name: String,
        expected: String,
        found: String,
    },

    #[error("`{value}` is not a value of enum `{enum_name}`")]
    UnknownEnumValue { enum_name: String, value: String },

    #[error("field imports form a cycle: {}", .path.join(" -> "))]
    ImportCycle { path: Vec<String> },

    #[error("schema has no query root type")]
    MissingQueryRoot,

    #[error("{operation} root must be an object type, but `{name}` is {}", .kind.article())]
    InvalidRootType {
        operation: String,
        name: String,
        kind: TypeKind,
    },

    #[error("union `{union_name}` member `{member}` is not an object type")]
    InvalidUnionMember { union_name: String, member: String },

    #[error("`{type_name}` implements `{name}`, which is not an interface")]
    NotAnInterface { type_name: String, name: String },

    #[error("invalid name `{name}` at {location}: {reason}")]
    InvalidName {
        name: String,
        location: String,
        reason: String,
    },

    #[error("name `{name}` at {location} must not begin with \"__\"")]
    ReservedName { name: String, location: String },

    #[error("enum `{enum_name}` declares more than one value named `{alias}`")]
    DuplicateEnumAlias { enum_name: String, alias: String },

    #[error("`{first}` and `{second}` both print as `{printed}` in {location}")]
    PrintedNameCollision {
        location: String,
        printed: String,
        first: String,
        second: String,
    },

    #[error("{operation} root is declared as `{first}` and again as `{second}`")]
    DuplicateRootOperation {
        operation: String,
        first: String,
        second: String,
    },

    #[error("plugin `{plugin}` failed: {message}")]
    Plugin { plugin: String, message: String },

    #[error("{0}")]
    Custom(String),

    #[error(transparent)]
    Blueprint(#[from] schemata_blueprint::Error),
}

impl Error {
    /// Create an error from any message, for use in custom phases.
    pub fn custom(message: impl fmt::Display) -> Self {
        Error::Custom(message.to_string())
    }
}

/// Every error found by one phase.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhaseErrors(Vec<Error>);

impl PhaseErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: impl Into<Error>) {
        self.0.push(error.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Error> {
        self.0.iter()
    }

    pub fn into_vec(self) -> Vec<Error> {
        self.0
    }

    /// `Ok(value)` if no errors were collected.
    pub fn into_result<T>(self, value: T) -> Result<T, PhaseErrors> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

impl From<Error> for PhaseErrors {
    fn from(error: Error) -> Self {
        Self(vec![error])
    }
}

impl From<schemata_blueprint::Error> for PhaseErrors {
    fn from(error: schemata_blueprint::Error) -> Self {
        Self(vec![Error::Blueprint(error)])
    }
}

impl From<Vec<Error>> for PhaseErrors {
    fn from(errors: Vec<Error>) -> Self {
        Self(errors)
    }
}

impl Extend<Error> for PhaseErrors {
    fn extend<I: IntoIterator<Item = Error>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl IntoIterator for PhaseErrors {
    type Item = Error;
    type IntoIter = std::vec::IntoIter<Error>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a PhaseErrors {
    type Item = &'a Error;
    type IntoIter = std::slice::Iter<'a, Error>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for PhaseErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_joined(f, &self.0)
    }
}

impl std::error::Error for PhaseErrors {}

/// A pipeline run stopped at a failing phase.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("phase `{phase}` failed: {}", Joined(.errors))]
pub struct PipelineError {
    /// Name of the phase that failed.
    pub phase: String,
    /// Every error that phase reported.
    pub errors: Vec<Error>,
}

impl PipelineError {
    pub fn new(phase: impl Into<String>, errors: impl Into<PhaseErrors>) -> Self {
        Self {
            phase: phase.into(),
            errors: errors.into().into_vec(),
        }
    }
}

/// Failure to produce a compiled blueprint.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    #[error("failed to load schema `{identity}`: {message}")]
    Source { identity: String, message: String },

    #[error(transparent)]
    Compile(#[from] PipelineError),

    #[error("blueprint store failed for `{identity}`: {message}")]
    Store { identity: String, message: String },
}

struct Joined<'a>(&'a [Error]);

impl fmt::Display for Joined<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_joined(f, self.0)
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, errors: &[Error]) -> fmt::Result {
    for (i, error) in errors.iter().enumerate() {
        if i > 0 {
            f.write_str("; ")?;
        }
        write!(f, "{error}")?;
    }
    Ok(())
}
