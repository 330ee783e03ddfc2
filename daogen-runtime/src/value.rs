//! Values bound as statement parameters.

use serde_json::Value;

use crate::json::{JsonArray, JsonObject, Timestamp};

/// A parameter value, independent of the backend.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Bool(bool),
    Int(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
    Timestamp(Timestamp),
    /// Structured value, stored as its serialized text.
    Json(Value),
}

impl SqlValue {
    pub fn is_null(&self) -> bool {
        matches!(self, SqlValue::Null)
    }

    /// Convert a wire value, used for columns mapped by custom handlers.
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Null => SqlValue::Null,
            Value::Bool(v) => SqlValue::Bool(v),
            Value::Number(n) => match n.as_i64() {
                Some(v) => SqlValue::Int(v),
                None => n.as_f64().map(SqlValue::Real).unwrap_or(SqlValue::Null),
            },
            Value::String(s) => SqlValue::Text(s),
            other => SqlValue::Json(other),
        }
    }
}

macro_rules! from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for SqlValue {
                fn from(value: $ty) -> Self {
                    SqlValue::Int(i64::from(value))
                }
            }
        )*
    };
}

from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<bool> for SqlValue {
    fn from(value: bool) -> Self {
        SqlValue::Bool(value)
    }
}

impl From<f32> for SqlValue {
    fn from(value: f32) -> Self {
        SqlValue::Real(f64::from(value))
    }
}

impl From<f64> for SqlValue {
    fn from(value: f64) -> Self {
        SqlValue::Real(value)
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        SqlValue::Text(value)
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        SqlValue::Text(value.to_string())
    }
}

impl From<Vec<u8>> for SqlValue {
    fn from(value: Vec<u8>) -> Self {
        SqlValue::Blob(value)
    }
}

impl From<&[u8]> for SqlValue {
    fn from(value: &[u8]) -> Self {
        SqlValue::Blob(value.to_vec())
    }
}

impl From<Timestamp> for SqlValue {
    fn from(value: Timestamp) -> Self {
        SqlValue::Timestamp(value)
    }
}

impl From<JsonObject> for SqlValue {
    fn from(value: JsonObject) -> Self {
        SqlValue::Json(Value::Object(value))
    }
}

impl From<JsonArray> for SqlValue {
    fn from(value: JsonArray) -> Self {
        SqlValue::Json(Value::Array(value))
    }
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(SqlValue::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_none_is_null() {
        assert_eq!(SqlValue::from(None::<i32>), SqlValue::Null);
        assert_eq!(SqlValue::from(Some(5i16)), SqlValue::Int(5));
        assert_eq!(SqlValue::from(Some("x")), SqlValue::Text("x".to_string()));
    }

    #[test]
    fn test_structured_values() {
        let mut object = JsonObject::new();
        object.insert("a".to_string(), Value::from(1));
        assert_eq!(
            SqlValue::from(object.clone()),
            SqlValue::Json(Value::Object(object))
        );
        assert_eq!(
            SqlValue::from(vec![1u8, 2]),
            SqlValue::Blob(vec![1, 2])
        );
    }

    #[test]
    fn test_from_json() {
        assert_eq!(SqlValue::from_json(Value::from(3)), SqlValue::Int(3));
        assert_eq!(SqlValue::from_json(Value::from(1.5)), SqlValue::Real(1.5));
        assert_eq!(
            SqlValue::from_json(Value::from("p")),
            SqlValue::Text("p".to_string())
        );
        assert!(SqlValue::from_json(Value::Null).is_null());
        assert!(matches!(
            SqlValue::from_json(serde_json::json!([1])),
            SqlValue::Json(_)
        ));
    }
}
