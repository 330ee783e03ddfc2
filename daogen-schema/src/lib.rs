// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod config;
mod error;
mod model;
mod parse;
mod validate;

use std::path::Path;

pub use config::{GeneratorConfig, MAX_SUPPORTED_KEY_DEGREE};
pub use error::{Error, Result};
pub use model::*;
pub use validate::ParseContext;

use parse::RawSchema;

/// Parse a schema file from the given path
pub fn parse_file(path: impl AsRef<Path>) -> Result<SchemaDescriptor> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| {
        Box::new(Error::Io {
            path: path.to_path_buf(),
            source: e,
        })
    })?;
    let filename = path.display().to_string();
    parse_str_with_filename(&content, &filename)
}

/// Parse a schema from a string (uses "schema.toml" as default filename)
pub fn parse_str(content: &str) -> Result<SchemaDescriptor> {
    parse_str_with_filename(content, "schema.toml")
}

/// Parse a schema from a string with a custom filename for error reporting
pub fn parse_str_with_filename(content: &str, filename: &str) -> Result<SchemaDescriptor> {
    let raw: RawSchema =
        toml::from_str(content).map_err(|e| Error::parse(e, content, filename))?;

    let ctx = ParseContext::new(content, filename);
    raw.into_descriptor(&ctx)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOMETHING: &str = r#"
[enums.status]
literals = ["ACTIVE", "IN_PROGRESS"]

[[tables]]
name = "something"
primary_key = ["someid"]
unique_keys = [["somestring"]]

[[tables.columns]]
name = "someid"
type = "integer"
nullable = false

[[tables.columns]]
name = "somestring"
type = "string"

[[tables.columns]]
name = "someJsonObject"
type = "string"
converter = "json-object"

[[tables.columns]]
name = "someEnum"
type = "string"
enum = "status"

[[tables.columns]]
name = "somePoint"
type = "string"
converter = { custom = "crate::geo::Point" }
"#;

    #[test]
    fn test_parse_something_table() {
        let schema = parse_str(SOMETHING).unwrap();
        assert_eq!(schema.config, GeneratorConfig::default());
        assert_eq!(schema.tables.len(), 1);

        let table = schema.table("something").unwrap();
        assert_eq!(table.columns.len(), 5);

        let pk = table.primary_key.as_ref().unwrap();
        assert_eq!(pk.name, "something_pkey");
        assert_eq!(pk.degree(), 1);
        assert!(pk.columns[0].in_primary_key());

        let someid = table.column("someid").unwrap();
        assert!(!someid.nullable);
        assert!(someid.in_primary_key());
        assert!(!someid.is_single_column_unique());

        let somestring = table.column("somestring").unwrap();
        assert!(somestring.nullable);
        assert!(somestring.is_single_column_unique());
        assert_eq!(
            somestring.unique_keys[0].key,
            "something_somestring_key".to_string()
        );

        assert_eq!(
            table.column("someJsonObject").unwrap().converter,
            Some(ConverterKind::JsonObject)
        );
        assert_eq!(
            table.column("somePoint").unwrap().converter,
            Some(ConverterKind::Custom("crate::geo::Point".to_string()))
        );

        let some_enum = table.column("someEnum").unwrap();
        let status = schema.enum_of(some_enum).unwrap();
        assert_eq!(status.literals, vec!["ACTIVE", "IN_PROGRESS"]);
    }

    #[test]
    fn test_table_without_primary_key() {
        let schema = parse_str(
            r#"
[[tables]]
name = "audit_log"

[[tables.columns]]
name = "message"
type = "text"
"#,
        )
        .unwrap();
        let table = schema.table("audit_log").unwrap();
        assert!(table.primary_key.is_none());
        assert_eq!(table.columns[0].data_type, DataType::String);
    }

    #[test]
    fn test_composite_key_memberships() {
        let schema = parse_str(
            r#"
[[tables]]
name = "membership"
primary_key = ["user_id", "group_id"]

[[tables.columns]]
name = "user_id"
type = "long"

[[tables.columns]]
name = "group_id"
type = "long"

[[tables.columns]]
name = "role"
type = "string"
"#,
        )
        .unwrap();
        let table = schema.table("membership").unwrap();
        let pk = table.primary_key.as_ref().unwrap();
        assert_eq!(pk.degree(), 2);
        assert_eq!(pk.columns[1].unique_keys[0].degree, 2);
        assert!(table.is_primary_key_column("group_id"));
        assert!(!table.is_primary_key_column("role"));
        assert!(!table.column("user_id").unwrap().is_single_column_unique());
    }

    #[test]
    fn test_unknown_key_column() {
        let err = parse_str(
            r#"
[[tables]]
name = "something"
primary_key = ["missing"]

[[tables.columns]]
name = "someid"
type = "integer"
"#,
        )
        .unwrap_err();
        assert!(matches!(*err, Error::UnknownKeyColumn { ref column, .. } if column == "missing"));
    }

    #[test]
    fn test_unknown_enum() {
        let err = parse_str(
            r#"
[[tables]]
name = "something"

[[tables.columns]]
name = "state"
type = "string"
enum = "mood"
"#,
        )
        .unwrap_err();
        assert!(matches!(*err, Error::UnknownEnum { ref enum_name, .. } if enum_name == "mood"));
    }

    #[test]
    fn test_enum_without_literals() {
        let err = parse_str("[enums.mood]\nliterals = []\n").unwrap_err();
        assert!(matches!(*err, Error::Validation { .. }));
    }

    #[test]
    fn test_snake_case_collision() {
        let err = parse_str(
            r#"
[[tables]]
name = "something"

[[tables.columns]]
name = "someString"
type = "string"

[[tables.columns]]
name = "some_string"
type = "string"
"#,
        )
        .unwrap_err();
        assert!(
            matches!(*err, Error::DuplicateColumn { ref existing, .. } if existing == "someString")
        );
    }

    fn validation_message(source: &str) -> String {
        match *parse_str(source).unwrap_err() {
            Error::Validation { message, .. } => message,
            other => panic!("expected a validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_table_module_collision() {
        let message = validation_message(
            r#"
[[tables]]
name = "some_thing"

[[tables]]
name = "someThing"
"#,
        );
        assert_eq!(
            message,
            "table 'someThing' generates `some_thing`, which table 'some_thing' also generates"
        );
    }

    #[test]
    fn test_enum_variant_collision() {
        let message = validation_message(
            r#"
[enums.status]
literals = ["ACTIVE", "active"]
"#,
        );
        assert!(message.contains("literal 'active' generates `Active`"));

        let message = validation_message(
            r#"
[enums.level]
literals = ["1st", "V1st"]
"#,
        );
        assert!(message.contains("`V1st`"));
    }

    #[test]
    fn test_enum_name_collision() {
        let message = validation_message(
            r#"
[enums.order_status]
literals = ["OPEN"]

[enums.orderStatus]
literals = ["OPEN"]
"#,
        );
        assert!(message.contains("enum 'orderStatus' generates `OrderStatus`"));
    }

    #[test]
    fn test_table_and_enum_type_collision() {
        let message = validation_message(
            r#"
[enums.status]
literals = ["ACTIVE"]

[[tables]]
name = "status"
"#,
        );
        assert_eq!(
            message,
            "table 'status' generates `Status`, which enum 'status' also generates"
        );

        let message = validation_message(
            r#"
[enums.ticketRecord]
literals = ["OPEN"]

[[tables]]
name = "ticket"
"#,
        );
        assert!(message.contains("`TicketRecord`"));
    }

    #[test]
    fn test_distinct_names_are_accepted() {
        let schema = parse_str(
            r#"
[enums.status]
literals = ["ACTIVE", "IN_PROGRESS", "2nd"]

[[tables]]
name = "ticket"

[[tables]]
name = "ticket_status"
"#,
        )
        .unwrap();
        assert_eq!(schema.tables.len(), 2);
    }

    #[test]
    fn test_duplicate_table() {
        let message = validation_message(
            r#"
[[tables]]
name = "something"

[[tables]]
name = "something"
"#,
        );
        assert!(message.contains("more than once"));
    }

    #[test]
    fn test_keyword_table_rejected() {
        let err = parse_str("[[tables]]\nname = \"struct\"\n").unwrap_err();
        assert!(matches!(*err, Error::ReservedKeyword { .. }));
    }

    #[test]
    fn test_unknown_converter() {
        let err = parse_str(
            r#"
[[tables]]
name = "something"

[[tables.columns]]
name = "payload"
type = "string"
converter = "xml"
"#,
        )
        .unwrap_err();
        assert!(matches!(*err, Error::Validation { ref message, .. } if message.contains("xml")));
    }

    #[test]
    fn test_max_key_degree_bounds() {
        let err = parse_str("[generator]\nmax_key_degree = 0\n").unwrap_err();
        assert!(matches!(*err, Error::Validation { .. }));

        let schema = parse_str("[generator]\nmax_key_degree = 2\n").unwrap();
        assert_eq!(schema.config.max_key_degree, 2);
    }

    #[test]
    fn test_parse_error_has_span() {
        let err = parse_str("[[tables]]\nname = ").unwrap_err();
        assert!(matches!(*err, Error::Parse { span: Some(_), .. }));
    }

    #[test]
    fn test_parse_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let err = parse_file(dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(*err, Error::Io { .. }));
    }

    #[test]
    fn test_parse_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schema.toml");
        std::fs::write(&path, SOMETHING).unwrap();
        let schema = parse_file(&path).unwrap();
        assert!(schema.table("something").is_some());
    }
}
