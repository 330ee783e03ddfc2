//! Naming strategy for wire fields, identifiers and method fragments.

use daogen_core::{is_rust_keyword, to_pascal_case, to_snake_case};
use daogen_schema::{ColumnDescriptor, TableDescriptor};

/// Maps descriptor names to generated names.
///
/// The defaults keep wire field names equal to column names and derive Rust
/// identifiers by case conversion. Implementors override only what they need.
pub trait NamingStrategy {
    /// Wire field name used in JSON objects.
    fn json_field(&self, column: &ColumnDescriptor) -> String {
        column.name.clone()
    }

    /// Struct field / getter identifier, escaped when it is a keyword.
    fn field_name(&self, column: &ColumnDescriptor) -> String {
        escape_identifier(&to_snake_case(&column.name))
    }

    /// Fragment used in derived method names (`set_x`, `find_one_by_x`).
    fn method_fragment(&self, column: &ColumnDescriptor) -> String {
        to_snake_case(&column.name)
    }

    /// Type name of the plain entity struct.
    fn type_name(&self, table: &TableDescriptor) -> String {
        to_pascal_case(&table.name)
    }

    /// Module / file stem for a table.
    fn module_name(&self, table: &TableDescriptor) -> String {
        to_snake_case(&table.name)
    }

    /// Type name for a database enum.
    fn enum_name(&self, name: &str) -> String {
        to_pascal_case(name)
    }

    /// Variant name for an enum literal.
    fn variant_name(&self, literal: &str) -> String {
        let name = to_pascal_case(literal);
        if name.starts_with(|c: char| c.is_ascii_digit()) {
            format!("V{}", name)
        } else {
            escape_identifier(&name)
        }
    }
}

/// The default naming strategy.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultNaming;

impl NamingStrategy for DefaultNaming {}

/// Wire field a column is read from and written to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonFieldMapping<'a> {
    pub column: &'a ColumnDescriptor,
    pub field: String,
}

/// One mapping per column, in declared order.
pub fn json_mappings<'a>(
    table: &'a TableDescriptor,
    naming: &dyn NamingStrategy,
) -> Vec<JsonFieldMapping<'a>> {
    table
        .columns
        .iter()
        .map(|column| JsonFieldMapping {
            column,
            field: naming.json_field(column),
        })
        .collect()
}

/// Escape a keyword as a raw identifier.
///
/// `self`, `Self`, `super` and `crate` cannot be raw identifiers and get a
/// trailing underscore instead.
pub fn escape_identifier(name: &str) -> String {
    match name {
        "self" | "Self" | "super" | "crate" => format!("{}_", name),
        _ if is_rust_keyword(name) => format!("r#{}", name),
        _ => name.to_string(),
    }
}
