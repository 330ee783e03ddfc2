//! Immutable descriptor model for tables, columns, keys and enums.
//!
//! Descriptors are built once per generation run and never mutated afterwards.
//! Keys own copies of their columns; a column refers back to its table by name.

use indexmap::IndexMap;
use serde::Deserialize;

use crate::GeneratorConfig;

/// Declared type of a column, as seen by application code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "String")]
pub enum DataType {
    Integer,
    Short,
    Byte,
    Long,
    Float,
    Double,
    Boolean,
    String,
    Binary,
    Timestamp,
    /// Any other type, kept verbatim (usually a Rust type path).
    Other(String),
}

impl DataType {
    /// Parse a type name from the schema file.
    pub fn parse(name: &str) -> Self {
        match name {
            "integer" | "int" => Self::Integer,
            "short" | "smallint" => Self::Short,
            "byte" | "tinyint" => Self::Byte,
            "long" | "bigint" => Self::Long,
            "float" | "real" => Self::Float,
            "double" => Self::Double,
            "boolean" | "bool" => Self::Boolean,
            "string" | "text" | "varchar" => Self::String,
            "binary" | "blob" | "bytes" => Self::Binary,
            "timestamp" | "instant" => Self::Timestamp,
            other => Self::Other(other.to_string()),
        }
    }

    /// Canonical name of this type.
    pub fn name(&self) -> &str {
        match self {
            Self::Integer => "integer",
            Self::Short => "short",
            Self::Byte => "byte",
            Self::Long => "long",
            Self::Float => "float",
            Self::Double => "double",
            Self::Boolean => "boolean",
            Self::String => "string",
            Self::Binary => "binary",
            Self::Timestamp => "timestamp",
            Self::Other(name) => name,
        }
    }
}

impl From<String> for DataType {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl std::fmt::Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Converter between a column's storage type and its application type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ConverterKind {
    /// Stored value is exposed as a JSON object.
    JsonObject,
    /// Stored value is exposed as a JSON array.
    JsonArray,
    /// User supplied converter exposing the given application type.
    Custom(String),
}

/// Membership of a column in a primary or unique key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyMembership {
    /// Key name.
    pub key: String,
    /// Number of columns in the key.
    pub degree: usize,
    /// Whether the key is the table's primary key.
    pub is_primary: bool,
}

/// A column of a table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnDescriptor {
    pub name: String,
    pub data_type: DataType,
    pub nullable: bool,
    /// Name of the enclosing table.
    pub table: String,
    /// Keys this column is part of, primary key first.
    pub unique_keys: Vec<KeyMembership>,
    pub converter: Option<ConverterKind>,
    /// Name of the enum type backing this column.
    pub enum_type: Option<String>,
}

impl ColumnDescriptor {
    /// Create a nullable column without converter or enum reference.
    pub fn new(table: impl Into<String>, name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            nullable: true,
            table: table.into(),
            unique_keys: Vec::new(),
            converter: None,
            enum_type: None,
        }
    }

    /// Whether this column alone forms a unique key that is not the primary key.
    pub fn is_single_column_unique(&self) -> bool {
        self.unique_keys
            .iter()
            .any(|key| key.degree == 1 && !key.is_primary)
    }

    /// Whether this column is part of the primary key.
    pub fn in_primary_key(&self) -> bool {
        self.unique_keys.iter().any(|key| key.is_primary)
    }

    /// Name of the type the column exposes to application code.
    ///
    /// Converters replace the storage type, so this is what diagnostics report.
    pub fn application_type_name(&self) -> String {
        match &self.converter {
            Some(ConverterKind::JsonObject) => "json-object".to_string(),
            Some(ConverterKind::JsonArray) => "json-array".to_string(),
            Some(ConverterKind::Custom(ty)) => ty.clone(),
            None => match &self.enum_type {
                Some(name) => format!("enum {}", name),
                None => self.data_type.name().to_string(),
            },
        }
    }
}

/// An ordered set of columns identifying a row.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyDescriptor {
    pub name: String,
    pub columns: Vec<ColumnDescriptor>,
    pub is_primary: bool,
}

impl KeyDescriptor {
    /// Number of columns in the key.
    pub fn degree(&self) -> usize {
        self.columns.len()
    }

    /// Whether the named column is part of this key.
    pub fn contains(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c.name == column)
    }
}

/// A table with its columns and keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableDescriptor {
    pub name: String,
    /// Columns in declared order.
    pub columns: Vec<ColumnDescriptor>,
    pub primary_key: Option<KeyDescriptor>,
    /// Unique keys other than the primary key.
    pub unique_keys: Vec<KeyDescriptor>,
}

impl TableDescriptor {
    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Whether the named column is part of the primary key.
    pub fn is_primary_key_column(&self, name: &str) -> bool {
        self.primary_key.as_ref().is_some_and(|pk| pk.contains(name))
    }
}

/// A database enum type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumDescriptor {
    pub name: String,
    /// Literals in declared order.
    pub literals: Vec<String>,
}

/// Everything a generation run reads: configuration, enums and tables.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaDescriptor {
    pub config: GeneratorConfig,
    pub enums: IndexMap<String, EnumDescriptor>,
    pub tables: Vec<TableDescriptor>,
}

impl SchemaDescriptor {
    /// Look up a table by name.
    pub fn table(&self, name: &str) -> Option<&TableDescriptor> {
        self.tables.iter().find(|t| t.name == name)
    }

    /// Resolve the enum backing a column, if any.
    pub fn enum_of(&self, column: &ColumnDescriptor) -> Option<&EnumDescriptor> {
        column
            .enum_type
            .as_ref()
            .and_then(|name| self.enums.get(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_type_parse_aliases() {
        assert_eq!(DataType::parse("int"), DataType::Integer);
        assert_eq!(DataType::parse("smallint"), DataType::Short);
        assert_eq!(DataType::parse("blob"), DataType::Binary);
        assert_eq!(
            DataType::parse("uuid::Uuid"),
            DataType::Other("uuid::Uuid".to_string())
        );
        assert_eq!(DataType::Timestamp.to_string(), "timestamp");
    }

    #[test]
    fn test_single_column_unique() {
        let mut column = ColumnDescriptor::new("something", "somestring", DataType::String);
        assert!(!column.is_single_column_unique());

        column.unique_keys.push(KeyMembership {
            key: "something_somestring_key".to_string(),
            degree: 1,
            is_primary: false,
        });
        assert!(column.is_single_column_unique());
        assert!(!column.in_primary_key());
    }

    #[test]
    fn test_primary_key_membership_is_not_unique_accessor() {
        let mut column = ColumnDescriptor::new("something", "someid", DataType::Integer);
        column.unique_keys.push(KeyMembership {
            key: "something_pkey".to_string(),
            degree: 1,
            is_primary: true,
        });
        assert!(!column.is_single_column_unique());
        assert!(column.in_primary_key());
    }

    #[test]
    fn test_application_type_name() {
        let mut column = ColumnDescriptor::new("t", "payload", DataType::String);
        assert_eq!(column.application_type_name(), "string");

        column.converter = Some(ConverterKind::Custom("my::Point".to_string()));
        assert_eq!(column.application_type_name(), "my::Point");
    }
}
