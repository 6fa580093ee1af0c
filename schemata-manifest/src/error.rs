use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for manifest operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// Source content and filename of the manifest being parsed.
#[derive(Debug, Clone)]
pub struct SourceContext {
    src: String,
    filename: String,
}

impl SourceContext {
    pub fn new(src: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            filename: filename.into(),
        }
    }

    pub fn src(&self) -> &str {
        &self.src
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Create a NamedSource for miette error reporting.
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.filename, self.src.clone())
    }

    /// Create a parse error from a toml error.
    pub fn parse_error(&self, source: toml::de::Error) -> Box<Error> {
        let span = source.span().map(SourceSpan::from);
        Box::new(Error::Parse {
            src: self.named_source(),
            span,
            source,
        })
    }

    /// Create a validation error with an optional span.
    pub fn validation_error(
        &self,
        message: impl Into<String>,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::Validation {
            src: self.named_source(),
            span,
            message: message.into(),
        })
    }

    /// Create an invalid identifier error.
    pub fn invalid_identifier_error(
        &self,
        name: impl Into<String>,
        context: impl Into<String>,
        reason: impl Into<String>,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::InvalidIdentifier {
            src: self.named_source(),
            span,
            name: name.into(),
            context: context.into(),
            reason: reason.into(),
        })
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    #[diagnostic(code(schemata::io_error))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse schema module")]
    #[diagnostic(code(schemata::parse_error))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },

    #[error("{message}")]
    #[diagnostic(code(schemata::validation_error))]
    Validation {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: Option<SourceSpan>,
        message: String,
    },

    #[error("invalid {context} name '{name}'")]
    #[diagnostic(
        code(schemata::invalid_identifier),
        help(
            "{reason}. Use only letters, numbers, and underscores, starting with a letter or underscore."
        )
    )]
    InvalidIdentifier {
        #[source_code]
        src: NamedSource<String>,
        #[label("invalid identifier")]
        span: Option<SourceSpan>,
        name: String,
        context: String,
        reason: String,
    },
}

impl Error {
    /// The labelled span, if the error points into the source.
    pub fn span(&self) -> Option<SourceSpan> {
        match self {
            Error::Io { .. } => None,
            Error::Parse { span, .. }
            | Error::Validation { span, .. }
            | Error::InvalidIdentifier { span, .. } => *span,
        }
    }
}
