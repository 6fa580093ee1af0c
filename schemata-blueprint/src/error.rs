use thiserror::Error;

use crate::TypeKind;

/// Result type for blueprint operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors raised by structural blueprint operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("unknown type `{name}`")]
    UnknownType { name: String },

    #[error("type `{name}` is already defined")]
    DuplicateType { name: String },

    #[error("field `{field}` is already defined on `{type_name}`")]
    DuplicateField { type_name: String, field: String },

    #[error("`{name}` is {} type and cannot hold fields", .kind.article())]
    NotAFieldContainer { name: String, kind: TypeKind },

    #[error("`{name}` is {} type and cannot implement interfaces", .kind.article())]
    CannotImplement { name: String, kind: TypeKind },
}
