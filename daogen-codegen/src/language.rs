//! Language-agnostic code generation traits.

use std::path::Path;

use daogen_schema::ColumnDescriptor;
use eyre::Result;

use crate::diagnostic::Diagnostic;

/// Trait for language-specific generators.
pub trait LanguageCodegen {
    /// Language identifier (e.g., "rust")
    fn language(&self) -> &'static str;

    /// File extension for generated source files
    fn file_extension(&self) -> &'static str;

    /// Preview generated files without writing to disk
    fn preview(&self) -> Vec<PreviewFile>;

    /// Generate all files into the specified output directory
    fn generate(&self, output_dir: &Path) -> Result<GenerateResult>;
}

/// Result of code generation
#[derive(Debug, Default)]
pub struct GenerateResult {
    /// Files written, relative to the output directory
    pub written: Vec<String>,
    /// Files left untouched because their rules forbid overwriting
    pub skipped: Vec<String>,
    /// Diagnostics recorded during emission
    pub diagnostics: Vec<Diagnostic>,
}

/// A generated file for preview
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewFile {
    /// Relative path from output directory
    pub path: String,
    /// File content
    pub content: String,
}

/// Maps column types to target-language type expressions.
pub trait TypeMapper {
    fn language(&self) -> &'static str;

    /// Type of the column's value, ignoring nullability.
    fn column_type(&self, column: &ColumnDescriptor) -> String;

    /// Type used when the value may be absent.
    fn optional_type(&self, column: &ColumnDescriptor) -> String {
        format!("Option<{}>", self.column_type(column))
    }
}
