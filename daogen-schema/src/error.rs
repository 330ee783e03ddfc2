use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for schema operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    #[diagnostic(help("pass the schema file with --schema <path>"))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse schema file")]
    #[diagnostic(code(daogen::parse_error))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },

    #[error("{message}")]
    #[diagnostic(code(daogen::validation_error))]
    Validation {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: Option<SourceSpan>,
        message: String,
    },

    #[error("'{name}' is a Rust reserved keyword")]
    #[diagnostic(
        code(daogen::reserved_keyword),
        help("rename the {context} '{name}', e.g. '{name}s' or '{name}_table'")
    )]
    ReservedKeyword {
        #[source_code]
        src: NamedSource<String>,
        #[label("reserved keyword used here")]
        span: Option<SourceSpan>,
        name: String,
        context: String,
    },

    #[error("invalid {context} name '{name}'")]
    #[diagnostic(
        code(daogen::invalid_identifier),
        help(
            "{reason}. Use only letters, numbers, underscores and dashes, starting with a letter or underscore."
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

    #[error("key of table '{table}' references unknown column '{column}'")]
    #[diagnostic(
        code(daogen::unknown_key_column),
        help("key columns must be declared in [[tables.columns]] of the same table")
    )]
    UnknownKeyColumn {
        #[source_code]
        src: NamedSource<String>,
        #[label("unknown column")]
        span: Option<SourceSpan>,
        table: String,
        column: String,
    },

    #[error("column '{column}' references undefined enum '{enum_name}'")]
    #[diagnostic(
        code(daogen::unknown_enum),
        help("declare it as [enums.{enum_name}] with a list of literals")
    )]
    UnknownEnum {
        #[source_code]
        src: NamedSource<String>,
        #[label("undefined enum")]
        span: Option<SourceSpan>,
        column: String,
        enum_name: String,
    },

    #[error("column '{column}' of table '{table}' collides with column '{existing}'")]
    #[diagnostic(
        code(daogen::duplicate_column),
        help("column names must stay distinct after conversion to snake_case")
    )]
    DuplicateColumn {
        #[source_code]
        src: NamedSource<String>,
        #[label("collides with '{existing}'")]
        span: Option<SourceSpan>,
        table: String,
        column: String,
        existing: String,
    },
}

impl Error {
    /// Create a parse error from a toml error with source context
    pub fn parse(source: toml::de::Error, src: &str, filename: &str) -> Box<Self> {
        let span = source.span().map(SourceSpan::from);
        Box::new(Error::Parse {
            src: NamedSource::new(filename, src.to_string()),
            span,
            source,
        })
    }

    /// Create a validation error with source context
    pub fn validation(
        message: impl Into<String>,
        src: &str,
        filename: &str,
        span: Option<SourceSpan>,
    ) -> Box<Self> {
        Box::new(Error::Validation {
            src: NamedSource::new(filename, src.to_string()),
            span,
            message: message.into(),
        })
    }
}
