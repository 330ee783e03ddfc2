//! `from_json` / `to_json` bodies.
//!
//! Bodies call the column setters and getters rather than touching fields,
//! so the same text works as a trait default body and as an inherent impl.

use daogen_codegen::{Classification, CodeFragment, JsonKind};

use super::{ColumnPlan, TablePlan};
use crate::ast::{Fn, Param};

/// Expression reading the column's optional value from the object `json`.
pub(crate) fn read_expr(column: &ColumnPlan<'_>) -> Option<String> {
    let key = column.key_literal();
    let kind = match &column.classification {
        Classification::Custom(mapping) => return Some(mapping.render_read("json", &key)),
        Classification::Unsupported { .. } => return None,
        Classification::Classified(kind) => kind,
    };
    let expr = match kind {
        JsonKind::Integer => format!("json::read_i32(json, {})", key),
        JsonKind::Short => narrowed(&key, "i16"),
        JsonKind::Byte => narrowed(&key, "i8"),
        JsonKind::Long => format!("json::read_i64(json, {})", key),
        JsonKind::Float => format!("json::read_f32(json, {})", key),
        JsonKind::Double => format!("json::read_f64(json, {})", key),
        JsonKind::Boolean => format!("json::read_bool(json, {})", key),
        JsonKind::String => format!("json::read_string(json, {})", key),
        JsonKind::Binary => format!("json::read_binary(json, {})", key),
        JsonKind::Timestamp => format!("json::read_timestamp(json, {})", key),
        JsonKind::Enum(_) => format!(
            "json::read_enum::<{}>(json, {})",
            column.ty, key
        ),
        JsonKind::JsonObject => format!("json::read_object(json, {})", key),
        JsonKind::JsonArray => format!("json::read_array(json, {})", key),
    };
    Some(expr)
}

/// Short and byte columns travel as JSON integers and narrow only when present.
fn narrowed(key: &str, ty: &str) -> String {
    format!(
        "json::read_i64(json, {}).and_then(|v| {}::try_from(v).ok())",
        key, ty
    )
}

/// Expression turning the getter result `value` into a `json::Value`.
pub(crate) fn write_expr(column: &ColumnPlan<'_>, value: &str) -> Option<String> {
    let kind = match &column.classification {
        Classification::Custom(mapping) => return Some(mapping.render_write(value)),
        Classification::Unsupported { .. } => return None,
        Classification::Classified(kind) => kind,
    };
    let expr = match kind {
        JsonKind::Integer
        | JsonKind::Short
        | JsonKind::Byte
        | JsonKind::Long
        | JsonKind::Float
        | JsonKind::Double
        | JsonKind::Boolean
        | JsonKind::String => format!("json::Value::from({})", value),
        JsonKind::Binary => format!("json::binary_value({})", value),
        JsonKind::Timestamp => format!("json::timestamp_value({})", value),
        JsonKind::Enum(_) => format!("json::enum_value({})", value),
        JsonKind::JsonObject => format!("json::object_value({})", value),
        JsonKind::JsonArray => format!("json::array_value({})", value),
    };
    Some(expr)
}

fn from_json_body(plan: &TablePlan<'_>) -> Vec<CodeFragment> {
    let mut body = Vec::new();
    for column in &plan.columns {
        match (read_expr(column), column.placeholder()) {
            (Some(expr), _) => {
                body.push(CodeFragment::Line(format!("self.{}({});", column.setter(), expr)))
            }
            (None, Some(placeholder)) => body.push(CodeFragment::comment(placeholder)),
            (None, None) => {}
        }
    }
    body.push(CodeFragment::line("self"));
    body
}

fn to_json_body(plan: &TablePlan<'_>) -> Vec<CodeFragment> {
    let mut body = vec![CodeFragment::line("let mut json = json::JsonObject::new();")];
    for column in &plan.columns {
        let getter = format!("self.{}()", column.field);
        match (write_expr(column, &getter), column.placeholder()) {
            (Some(expr), _) => body.push(CodeFragment::Line(format!(
                "json.insert({}.to_string(), {});",
                column.key_literal(),
                expr
            ))),
            (None, Some(placeholder)) => body.push(CodeFragment::comment(placeholder)),
            (None, None) => {}
        }
    }
    body.push(CodeFragment::line("json"));
    body
}

/// `from_json(&mut self, json) -> &mut Self`, reading every mapped column.
pub(crate) fn from_json_fn(plan: &TablePlan<'_>) -> Fn {
    Fn::new("from_json")
        .param(Param::receiver("&mut self"))
        .param(Param::new("json", "&json::JsonObject"))
        .returns("&mut Self")
        .body_fragments(from_json_body(plan))
}

/// `to_json(&self)`, writing one key per mapped column.
pub(crate) fn to_json_fn(plan: &TablePlan<'_>) -> Fn {
    Fn::new("to_json")
        .param(Param::receiver("&self"))
        .returns("json::JsonObject")
        .body_fragments(to_json_body(plan))
}

/// `JsonConvertible` methods forwarding to the interface's default bodies.
pub(crate) fn delegating_fns(plan: &TablePlan<'_>) -> [Fn; 2] {
    let interface = plan.interface_name();
    [
        Fn::new("from_json")
            .param(Param::receiver("&mut self"))
            .param(Param::new("json", "&json::JsonObject"))
            .returns("&mut Self")
            .body_line(format!("<Self as {}>::from_json(self, json)", interface)),
        Fn::new("to_json")
            .param(Param::receiver("&self"))
            .returns("json::JsonObject")
            .body_line(format!("<Self as {}>::to_json(self)", interface)),
    ]
}
