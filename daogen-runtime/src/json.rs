//! Wire helpers called from generated `from_json` / `to_json` bodies.
//!
//! Readers are tolerant: a missing key, a `null` or a value of the wrong
//! shape all read as `None`. Writers never omit a key; absent values are
//! written as `null`.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
pub use serde_json::Value;

use crate::traits::EnumLiteral;

pub type JsonObject = serde_json::Map<String, Value>;
pub type JsonArray = Vec<Value>;
/// UTC instant used for timestamp columns.
pub type Timestamp = DateTime<Utc>;

fn get<'a>(json: &'a JsonObject, key: &str) -> Option<&'a Value> {
    json.get(key).filter(|v| !v.is_null())
}

pub fn read_i64(json: &JsonObject, key: &str) -> Option<i64> {
    get(json, key).and_then(Value::as_i64)
}

pub fn read_i32(json: &JsonObject, key: &str) -> Option<i32> {
    read_i64(json, key).and_then(|v| i32::try_from(v).ok())
}

pub fn read_f64(json: &JsonObject, key: &str) -> Option<f64> {
    get(json, key).and_then(Value::as_f64)
}

pub fn read_f32(json: &JsonObject, key: &str) -> Option<f32> {
    read_f64(json, key).map(|v| v as f32)
}

/// Booleans also accept the integers 0 and 1 stored by SQLite.
pub fn read_bool(json: &JsonObject, key: &str) -> Option<bool> {
    match get(json, key)? {
        Value::Bool(v) => Some(*v),
        Value::Number(n) => match n.as_i64() {
            Some(0) => Some(false),
            Some(1) => Some(true),
            _ => None,
        },
        _ => None,
    }
}

pub fn read_string(json: &JsonObject, key: &str) -> Option<String> {
    get(json, key).and_then(Value::as_str).map(str::to_string)
}

/// Binary values travel as base64 strings.
pub fn read_binary(json: &JsonObject, key: &str) -> Option<Vec<u8>> {
    get(json, key)
        .and_then(Value::as_str)
        .and_then(|s| STANDARD.decode(s).ok())
}

/// Accepts RFC 3339 or `YYYY-MM-DD HH:MM:SS[.fff]` (taken as UTC).
pub fn read_timestamp(json: &JsonObject, key: &str) -> Option<Timestamp> {
    get(json, key).and_then(Value::as_str).and_then(parse_timestamp)
}

fn parse_timestamp(s: &str) -> Option<Timestamp> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

/// Objects may also arrive as serialized text (JSON stored in a TEXT column).
pub fn read_object(json: &JsonObject, key: &str) -> Option<JsonObject> {
    match get(json, key)? {
        Value::Object(map) => Some(map.clone()),
        Value::String(text) => match serde_json::from_str(text) {
            Ok(Value::Object(map)) => Some(map),
            _ => None,
        },
        _ => None,
    }
}

pub fn read_array(json: &JsonObject, key: &str) -> Option<JsonArray> {
    match get(json, key)? {
        Value::Array(items) => Some(items.clone()),
        Value::String(text) => match serde_json::from_str(text) {
            Ok(Value::Array(items)) => Some(items),
            _ => None,
        },
        _ => None,
    }
}

/// Unknown literals read as `None`, never as an error.
pub fn read_enum<E: EnumLiteral>(json: &JsonObject, key: &str) -> Option<E> {
    get(json, key)
        .and_then(Value::as_str)
        .and_then(E::from_literal)
}

pub fn binary_value(value: Option<&[u8]>) -> Value {
    value
        .map(|bytes| Value::String(STANDARD.encode(bytes)))
        .unwrap_or(Value::Null)
}

pub fn timestamp_value(value: Option<Timestamp>) -> Value {
    value
        .map(|ts| Value::String(ts.to_rfc3339_opts(SecondsFormat::AutoSi, true)))
        .unwrap_or(Value::Null)
}

pub fn enum_value<E: EnumLiteral>(value: Option<E>) -> Value {
    value
        .map(|e| Value::String(e.literal().to_string()))
        .unwrap_or(Value::Null)
}

pub fn object_value(value: Option<&JsonObject>) -> Value {
    value
        .map(|map| Value::Object(map.clone()))
        .unwrap_or(Value::Null)
}

pub fn array_value(value: Option<&JsonArray>) -> Value {
    value
        .map(|items| Value::Array(items.clone()))
        .unwrap_or(Value::Null)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use serde_json::json;

    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Mood {
        Happy,
    }

    impl EnumLiteral for Mood {
        const LITERALS: &'static [&'static str] = &["HAPPY"];

        fn literal(&self) -> &'static str {
            "HAPPY"
        }

        fn from_literal(literal: &str) -> Option<Self> {
            (literal == "HAPPY").then_some(Mood::Happy)
        }
    }

    fn object(value: Value) -> JsonObject {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_null_and_missing_read_as_none() {
        let json = object(json!({ "a": null }));
        assert_eq!(read_i32(&json, "a"), None);
        assert_eq!(read_i32(&json, "missing"), None);
        assert_eq!(read_string(&json, "a"), None);
    }

    #[test]
    fn test_integer_narrowing() {
        let json = object(json!({ "small": 7, "big": 40000_i64 }));
        assert_eq!(
            read_i64(&json, "small").and_then(|v| i16::try_from(v).ok()),
            Some(7)
        );
        assert_eq!(
            read_i64(&json, "big").and_then(|v| i16::try_from(v).ok()),
            None
        );
        assert_eq!(read_i32(&json, "big"), Some(40000));
    }

    #[test]
    fn test_bool_accepts_integers() {
        let json = object(json!({ "t": 1, "f": false, "x": 2 }));
        assert_eq!(read_bool(&json, "t"), Some(true));
        assert_eq!(read_bool(&json, "f"), Some(false));
        assert_eq!(read_bool(&json, "x"), None);
    }

    #[test]
    fn test_binary_is_base64() {
        let value = binary_value(Some(&[1u8, 2, 3][..]));
        assert_eq!(value, json!("AQID"));
        let json = object(json!({ "b": "AQID" }));
        assert_eq!(read_binary(&json, "b"), Some(vec![1, 2, 3]));
        assert_eq!(binary_value(None), Value::Null);
    }

    #[test]
    fn test_timestamp_formats() {
        let ts = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap();
        assert_eq!(timestamp_value(Some(ts)), json!("2024-05-01T12:30:00Z"));

        let json = object(json!({
            "iso": "2024-05-01T12:30:00Z",
            "sqlite": "2024-05-01 12:30:00",
            "offset": "2024-05-01T14:30:00+02:00",
            "junk": "yesterday",
        }));
        assert_eq!(read_timestamp(&json, "iso"), Some(ts));
        assert_eq!(read_timestamp(&json, "sqlite"), Some(ts));
        assert_eq!(read_timestamp(&json, "offset"), Some(ts));
        assert_eq!(read_timestamp(&json, "junk"), None);
    }

    #[test]
    fn test_structured_values_accept_text() {
        let json = object(json!({
            "obj": { "k": 1 },
            "obj_text": "{\"k\":1}",
            "arr_text": "[1,2]",
            "not_obj": "[1]",
        }));
        assert_eq!(read_object(&json, "obj"), read_object(&json, "obj_text"));
        assert_eq!(read_array(&json, "arr_text"), Some(vec![json!(1), json!(2)]));
        assert_eq!(read_object(&json, "not_obj"), None);
    }

    #[test]
    fn test_enum_policy() {
        let json = object(json!({ "known": "HAPPY", "unknown": "UNKNOWN_LITERAL" }));
        assert_eq!(read_enum::<Mood>(&json, "known"), Some(Mood::Happy));
        assert_eq!(read_enum::<Mood>(&json, "unknown"), None);
        assert_eq!(enum_value(Some(Mood::Happy)), json!("HAPPY"));
        assert_eq!(enum_value::<Mood>(None), Value::Null);
    }
}
