//! Validation utilities for schema identifiers

use daogen_core::is_rust_keyword;
use miette::{NamedSource, SourceSpan};

use crate::{Error, Result};

/// Parsing and validation context that carries source information.
///
/// Encapsulates the raw TOML content and filename so that descriptor
/// assembly can point errors at the offending name.
#[derive(Debug, Clone)]
pub struct ParseContext<'a> {
    /// The raw TOML source content
    src: &'a str,
    /// The filename for error reporting
    filename: &'a str,
    /// Path segments for nested validation (e.g., ["tables", "something"])
    path: Vec<&'a str>,
}

impl<'a> ParseContext<'a> {
    /// Create a new parse context with the given source and filename.
    pub fn new(src: &'a str, filename: &'a str) -> Self {
        Self {
            src,
            filename,
            path: Vec::new(),
        }
    }

    /// Push a path segment and return a new context.
    pub fn push(&self, segment: &'a str) -> Self {
        let mut path = self.path.clone();
        path.push(segment);
        Self {
            src: self.src,
            filename: self.filename,
            path,
        }
    }

    /// Get the current path as a dot-separated string.
    pub fn path_string(&self) -> String {
        self.path.join(".")
    }

    /// Get a context description for error messages, e.g. "column in 'something'".
    pub fn context_for(&self, kind: &str) -> String {
        if self.path.is_empty() {
            kind.to_string()
        } else {
            format!("{} in '{}'", kind, self.path_string())
        }
    }

    fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(self.filename, self.src.to_string())
    }

    /// Find the span of a name in the source.
    pub fn find_span(&self, name: &str) -> Option<SourceSpan> {
        find_name_span(self.src, name)
    }

    /// Create a validation error pointing at `name`.
    pub fn validation_error(&self, message: impl Into<String>, name: &str) -> Box<Error> {
        Error::validation(message, self.src, self.filename, self.find_span(name))
    }

    pub fn unknown_key_column_error(&self, table: &str, column: &str) -> Box<Error> {
        Box::new(Error::UnknownKeyColumn {
            src: self.named_source(),
            span: self.find_span(column),
            table: table.to_string(),
            column: column.to_string(),
        })
    }

    pub fn unknown_enum_error(&self, column: &str, enum_name: &str) -> Box<Error> {
        Box::new(Error::UnknownEnum {
            src: self.named_source(),
            span: self.find_span(enum_name),
            column: column.to_string(),
            enum_name: enum_name.to_string(),
        })
    }

    pub fn duplicate_column_error(&self, table: &str, column: &str, existing: &str) -> Box<Error> {
        Box::new(Error::DuplicateColumn {
            src: self.named_source(),
            span: find_last_name_span(self.src, column),
            table: table.to_string(),
            column: column.to_string(),
            existing: existing.to_string(),
        })
    }

    /// Validate that a name is usable as an identifier.
    ///
    /// When `reject_keywords` is set, names that are Rust keywords are refused
    /// (table names become type names and cannot be escaped).
    pub fn validate_name(&self, name: &str, kind: &str, reject_keywords: bool) -> Result<()> {
        if reject_keywords && is_rust_keyword(name) {
            return Err(Box::new(Error::ReservedKeyword {
                src: self.named_source(),
                span: self.find_span(name),
                name: name.to_string(),
                context: self.context_for(kind),
            }));
        }

        if let Some(reason) = validate_identifier(name) {
            return Err(Box::new(Error::InvalidIdentifier {
                src: self.named_source(),
                span: self.find_span(name),
                name: name.to_string(),
                context: self.context_for(kind),
                reason: reason.to_string(),
            }));
        }

        Ok(())
    }
}

/// Find the span of a name in the TOML source.
///
/// Prefers the quoted form (`"name"`) used by `name = "..."` and key lists.
pub(crate) fn find_name_span(src: &str, name: &str) -> Option<SourceSpan> {
    let quoted = format!("\"{}\"", name);
    if let Some(pos) = src.find(&quoted) {
        // +1 to skip the opening quote
        return Some(SourceSpan::from((pos + 1, name.len())));
    }

    // Fallback: just find the name anywhere (less precise)
    src.find(name)
        .map(|pos| SourceSpan::from((pos, name.len())))
}

/// Like [`find_name_span`] but for the last occurrence, used for duplicates.
fn find_last_name_span(src: &str, name: &str) -> Option<SourceSpan> {
    let quoted = format!("\"{}\"", name);
    src.rfind(&quoted)
        .map(|pos| SourceSpan::from((pos + 1, name.len())))
        .or_else(|| find_name_span(src, name))
}

/// Validate that a name is a valid identifier.
/// Returns None if valid, Some(reason) if invalid
pub(crate) fn validate_identifier(name: &str) -> Option<&'static str> {
    let mut chars = name.chars();

    // First character must be a letter or underscore
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        Some(_) => return Some("name must start with a letter or underscore"),
        None => return Some("name cannot be empty"),
    }

    if chars.any(|c| !(c.is_ascii_alphanumeric() || c == '_' || c == '-')) {
        return Some("name must contain only letters, numbers, underscores, and dashes");
    }

    if name.ends_with('-') {
        return Some("name cannot end with a dash");
    }

    None
}
