//! Wire mapping of an entity covering every classified column type, written
//! the way the generator emits `from_json` / `to_json`.

use chrono::{TimeZone, Utc};
use daogen_runtime::json::{self, JsonArray, JsonObject, Timestamp};
use daogen_runtime::{EnumLiteral, JsonConvertible};
use serde_json::json;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Status {
    Active,
    Inactive,
}

impl EnumLiteral for Status {
    const LITERALS: &'static [&'static str] = &["ACTIVE", "INACTIVE"];

    fn literal(&self) -> &'static str {
        match self {
            Status::Active => "ACTIVE",
            Status::Inactive => "INACTIVE",
        }
    }

    fn from_literal(literal: &str) -> Option<Self> {
        match literal {
            "ACTIVE" => Some(Status::Active),
            "INACTIVE" => Some(Status::Inactive),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
struct Sample {
    id: Option<i32>,
    small: Option<i16>,
    tiny: Option<i8>,
    big: Option<i64>,
    ratio: Option<f32>,
    score: Option<f64>,
    flag: Option<bool>,
    name: Option<String>,
    data: Option<Vec<u8>>,
    created: Option<Timestamp>,
    status: Option<Status>,
    meta: Option<JsonObject>,
    tags: Option<JsonArray>,
}

impl JsonConvertible for Sample {
    fn from_json(&mut self, json: &JsonObject) -> &mut Self {
        self.id = json::read_i32(json, "id");
        self.small = json::read_i64(json, "small").and_then(|v| i16::try_from(v).ok());
        self.tiny = json::read_i64(json, "tiny").and_then(|v| i8::try_from(v).ok());
        self.big = json::read_i64(json, "big");
        self.ratio = json::read_f32(json, "ratio");
        self.score = json::read_f64(json, "score");
        self.flag = json::read_bool(json, "flag");
        self.name = json::read_string(json, "name");
        self.data = json::read_binary(json, "data");
        self.created = json::read_timestamp(json, "created");
        self.status = json::read_enum::<Status>(json, "status");
        self.meta = json::read_object(json, "meta");
        self.tags = json::read_array(json, "tags");
        self
    }

    fn to_json(&self) -> JsonObject {
        let mut json = JsonObject::new();
        json.insert("id".to_string(), json::Value::from(self.id));
        json.insert("small".to_string(), json::Value::from(self.small));
        json.insert("tiny".to_string(), json::Value::from(self.tiny));
        json.insert("big".to_string(), json::Value::from(self.big));
        json.insert("ratio".to_string(), json::Value::from(self.ratio));
        json.insert("score".to_string(), json::Value::from(self.score));
        json.insert("flag".to_string(), json::Value::from(self.flag));
        json.insert("name".to_string(), json::Value::from(self.name.as_deref()));
        json.insert("data".to_string(), json::binary_value(self.data.as_deref()));
        json.insert("created".to_string(), json::timestamp_value(self.created));
        json.insert("status".to_string(), json::enum_value(self.status));
        json.insert("meta".to_string(), json::object_value(self.meta.as_ref()));
        json.insert("tags".to_string(), json::array_value(self.tags.as_ref()));
        json
    }
}

fn object(value: json::Value) -> JsonObject {
    match value {
        json::Value::Object(map) => map,
        other => panic!("expected an object, got {other}"),
    }
}

fn decode(json: &JsonObject) -> Sample {
    let mut sample = Sample::default();
    sample.from_json(json);
    sample
}

fn populated() -> Sample {
    Sample {
        id: Some(7),
        small: Some(-300),
        tiny: Some(12),
        big: Some(9_000_000_000),
        ratio: Some(0.5),
        score: Some(98.25),
        flag: Some(true),
        name: Some("something".to_string()),
        data: Some(vec![0, 1, 2, 254, 255]),
        created: Some(Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap()),
        status: Some(Status::Inactive),
        meta: Some(object(json!({"nested": {"a": 1}}))),
        tags: Some(vec![json!("x"), json!(2)]),
    }
}

#[test]
fn test_round_trip_every_type() {
    let original = populated();
    assert_eq!(decode(&original.to_json()), original);
}

#[test]
fn test_nulls_round_trip() {
    let empty = Sample::default();
    let wire = empty.to_json();

    assert_eq!(wire.len(), 13);
    assert!(wire.values().all(json::Value::is_null));
    assert_eq!(decode(&wire), empty);
}

#[test]
fn test_wire_values() {
    let wire = populated().to_json();
    assert_eq!(wire["status"], json!("INACTIVE"));
    assert_eq!(wire["data"], json!("AAEC/v8="));
    assert_eq!(wire["created"], json!("2024-05-01T12:30:00Z"));
    assert_eq!(wire["meta"], json!({"nested": {"a": 1}}));
}

#[test]
fn test_from_json_is_idempotent() {
    let wire = populated().to_json();
    let mut sample = Sample::default();
    sample.from_json(&wire);
    let once = sample.clone();
    sample.from_json(&wire);
    assert_eq!(sample, once);
}

#[test]
fn test_unknown_enum_literal_reads_as_null() {
    let sample = decode(&object(json!({"status": "UNKNOWN_LITERAL"})));
    assert_eq!(sample.status, None);
}

#[test]
fn test_out_of_range_narrowing_reads_as_null() {
    let sample = decode(&object(json!({"small": 70000, "tiny": -129, "id": 1})));
    assert_eq!(sample.small, None);
    assert_eq!(sample.tiny, None);
    assert_eq!(sample.id, Some(1));
}
