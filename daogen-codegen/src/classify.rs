//! Column type classification.
//!
//! Classification is an ordered table of rules evaluated first-match-wins.
//! A user supplied [`CustomTypeHandler`] is consulted before the table and
//! the result is total: every column ends up custom-handled, classified or
//! unsupported.

use daogen_schema::{ColumnDescriptor, ConverterKind, DataType, SchemaDescriptor};

use crate::diagnostic::{Diagnostic, DiagnosticSink};

/// How a classified column travels over the wire.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum JsonKind {
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
    /// Enum literal, carrying the enum's declared name.
    Enum(String),
    JsonObject,
    JsonArray,
}

/// Read and write expressions supplied by a custom handler.
///
/// `read` is an expression producing the column's optional value; `{json}`
/// and `{key}` are replaced by the source object and the quoted wire name.
/// `write` is an expression producing a `serde_json::Value`; `{value}` is
/// replaced by the getter call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomMapping {
    pub read: String,
    pub write: String,
}

impl CustomMapping {
    pub fn new(read: impl Into<String>, write: impl Into<String>) -> Self {
        Self {
            read: read.into(),
            write: write.into(),
        }
    }

    pub fn render_read(&self, json: &str, key: &str) -> String {
        self.read.replace("{json}", json).replace("{key}", key)
    }

    pub fn render_write(&self, value: &str) -> String {
        self.write.replace("{value}", value)
    }
}

/// Result of classifying one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// A custom handler claimed the column.
    Custom(CustomMapping),
    Classified(JsonKind),
    /// No rule matched. The column is left out of JSON mapping.
    Unsupported { type_name: String },
}

impl Classification {
    pub fn is_supported(&self) -> bool {
        !matches!(self, Classification::Unsupported { .. })
    }

    pub fn kind(&self) -> Option<&JsonKind> {
        match self {
            Classification::Classified(kind) => Some(kind),
            _ => None,
        }
    }
}

/// Hook that takes over classification for selected columns.
///
/// Returning `None` opts out and lets the built-in rules run.
pub trait CustomTypeHandler {
    fn handle(&self, column: &ColumnDescriptor) -> Option<CustomMapping>;
}

type RuleFn = fn(&ColumnDescriptor, &SchemaDescriptor) -> Option<JsonKind>;

/// A named classification rule.
pub struct Rule {
    pub name: &'static str,
    matches: RuleFn,
}

macro_rules! primitive_rule {
    ($name:literal, $data_type:ident, $kind:ident) => {
        Rule {
            name: $name,
            matches: |column, _| {
                (column.converter.is_none() && column.data_type == DataType::$data_type)
                    .then_some(JsonKind::$kind)
            },
        }
    };
}

/// Built-in rules in priority order.
pub const RULES: &[Rule] = &[
    Rule {
        name: "enum",
        matches: |column, schema| {
            schema
                .enum_of(column)
                .map(|e| JsonKind::Enum(e.name.clone()))
        },
    },
    primitive_rule!("integer", Integer, Integer),
    primitive_rule!("short", Short, Short),
    primitive_rule!("byte", Byte, Byte),
    primitive_rule!("long", Long, Long),
    primitive_rule!("float", Float, Float),
    primitive_rule!("double", Double, Double),
    primitive_rule!("boolean", Boolean, Boolean),
    primitive_rule!("string", String, String),
    primitive_rule!("binary", Binary, Binary),
    primitive_rule!("timestamp", Timestamp, Timestamp),
    Rule {
        name: "json-object",
        matches: |column, _| {
            matches!(column.converter, Some(ConverterKind::JsonObject))
                .then_some(JsonKind::JsonObject)
        },
    },
    Rule {
        name: "json-array",
        matches: |column, _| {
            matches!(column.converter, Some(ConverterKind::JsonArray))
                .then_some(JsonKind::JsonArray)
        },
    },
];

/// Classifies columns of one schema.
pub struct TypeClassifier<'a> {
    schema: &'a SchemaDescriptor,
    custom: Option<&'a dyn CustomTypeHandler>,
}

impl<'a> TypeClassifier<'a> {
    pub fn new(schema: &'a SchemaDescriptor) -> Self {
        Self {
            schema,
            custom: None,
        }
    }

    /// Install a custom handler consulted before every built-in rule.
    pub fn with_custom_handler(mut self, handler: &'a dyn CustomTypeHandler) -> Self {
        self.custom = Some(handler);
        self
    }

    /// Name of the first built-in rule matching the column.
    pub fn matching_rule(&self, column: &ColumnDescriptor) -> Option<&'static str> {
        RULES
            .iter()
            .find(|rule| (rule.matches)(column, self.schema).is_some())
            .map(|rule| rule.name)
    }

    /// Classify without side effects.
    pub fn classify(&self, column: &ColumnDescriptor) -> Classification {
        if let Some(mapping) = self.custom.and_then(|handler| handler.handle(column)) {
            return Classification::Custom(mapping);
        }

        RULES
            .iter()
            .find_map(|rule| (rule.matches)(column, self.schema))
            .map(Classification::Classified)
            .unwrap_or_else(|| Classification::Unsupported {
                type_name: column.application_type_name(),
            })
    }

    /// Classify, recording a warning for unsupported columns.
    pub fn classify_reporting(
        &self,
        column: &ColumnDescriptor,
        sink: &mut DiagnosticSink,
    ) -> Classification {
        let classification = self.classify(column);
        if let Classification::Unsupported { type_name } = &classification {
            sink.push(
                Diagnostic::warning(
                    "classify",
                    format!(
                        "Omitting unrecognized type {} for column {} in table {}",
                        type_name, column.name, column.table
                    ),
                )
                .table(&column.table)
                .column(&column.name),
            );
        }
        classification
    }
}
