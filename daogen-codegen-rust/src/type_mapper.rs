//! Rust types for schema columns.

use daogen_codegen::{NamingStrategy, TypeMapper};
use daogen_schema::{ColumnDescriptor, ConverterKind, DataType, SchemaDescriptor};

/// How a getter hands out a column's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// `Option<T>` by copy.
    Copy,
    /// `Option<&str>` from an owned `String`.
    Str,
    /// `Option<&[u8]>` from an owned `Vec<u8>`.
    Bytes,
    /// `Option<&T>`.
    Ref,
}

/// Maps columns to Rust types used in generated code.
///
/// JSON and timestamp types are written relative to the runtime's `json`
/// module, which every generated table file imports.
pub struct RustTypeMapper<'a> {
    schema: &'a SchemaDescriptor,
    naming: &'a dyn NamingStrategy,
}

impl<'a> RustTypeMapper<'a> {
    pub fn new(schema: &'a SchemaDescriptor, naming: &'a dyn NamingStrategy) -> Self {
        Self { schema, naming }
    }

    /// Name of the generated enum a column refers to, if any.
    pub fn enum_type(&self, column: &ColumnDescriptor) -> Option<String> {
        self.schema
            .enum_of(column)
            .map(|e| self.naming.enum_name(&e.name))
    }

    pub fn access(&self, column: &ColumnDescriptor) -> Access {
        if column.converter.is_some() {
            return Access::Ref;
        }
        if self.enum_type(column).is_some() {
            return Access::Copy;
        }
        match column.data_type {
            DataType::String => Access::Str,
            DataType::Binary => Access::Bytes,
            DataType::Other(_) => Access::Ref,
            _ => Access::Copy,
        }
    }

    /// Return type of the column's getter.
    pub fn getter_type(&self, column: &ColumnDescriptor) -> String {
        match self.access(column) {
            Access::Copy => format!("Option<{}>", self.column_type(column)),
            Access::Str => "Option<&str>".to_string(),
            Access::Bytes => "Option<&[u8]>".to_string(),
            Access::Ref => format!("Option<&{}>", self.column_type(column)),
        }
    }

    /// Getter body reading the field `field` of `self`.
    pub fn getter_body(&self, column: &ColumnDescriptor, field: &str) -> String {
        match self.access(column) {
            Access::Copy => format!("self.{}", field),
            Access::Str | Access::Bytes => format!("self.{}.as_deref()", field),
            Access::Ref => format!("self.{}.as_ref()", field),
        }
    }

    /// Expression producing an owned copy of `value`, which has the field's type.
    pub fn owned(&self, column: &ColumnDescriptor, value: &str) -> String {
        match self.access(column) {
            Access::Copy => value.to_string(),
            _ => format!("{}.clone()", value),
        }
    }
}

impl TypeMapper for RustTypeMapper<'_> {
    fn language(&self) -> &'static str {
        "rust"
    }

    fn column_type(&self, column: &ColumnDescriptor) -> String {
        match &column.converter {
            Some(ConverterKind::JsonObject) => return "json::JsonObject".to_string(),
            Some(ConverterKind::JsonArray) => return "json::JsonArray".to_string(),
            Some(ConverterKind::Custom(ty)) => return ty.clone(),
            None => {}
        }
        if let Some(name) = self.enum_type(column) {
            return name;
        }
        match &column.data_type {
            DataType::Integer => "i32",
            DataType::Short => "i16",
            DataType::Byte => "i8",
            DataType::Long => "i64",
            DataType::Float => "f32",
            DataType::Double => "f64",
            DataType::Boolean => "bool",
            DataType::String => "String",
            DataType::Binary => "Vec<u8>",
            DataType::Timestamp => "json::Timestamp",
            DataType::Other(path) => path.as_str(),
        }
        .to_string()
    }
}
