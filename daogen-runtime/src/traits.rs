//! Capabilities implemented by generated entity types.

use crate::json::JsonObject;
use crate::key::KeyValues;
use crate::query::TableMeta;
use crate::value::SqlValue;

/// Bidirectional mapping between an entity and its wire object.
pub trait JsonConvertible {
    /// Overwrite every mapped field from `json` and return the receiver.
    ///
    /// Calling this twice with the same input leaves the same field values.
    fn from_json(&mut self, json: &JsonObject) -> &mut Self;

    /// Wire object with one key per mapped column.
    fn to_json(&self) -> JsonObject;
}

/// Projection of an entity onto its primary key.
pub trait Identifiable {
    type Id: KeyValues + Clone + Send + Sync;

    /// `None` while any key column is unset.
    fn id(&self) -> Option<Self::Id>;
}

/// A row of a table with a primary key.
pub trait Entity: JsonConvertible + Identifiable + Default + Send + Sync + Sized {
    const TABLE: TableMeta;

    /// Values of the persisted columns, in [`TableMeta::columns`] order.
    fn values(&self) -> Vec<SqlValue>;

    /// Decode a row fetched as a wire object.
    fn from_row(row: &JsonObject) -> Self {
        let mut entity = Self::default();
        entity.from_json(row);
        entity
    }
}

/// A generated enum backed by string literals.
pub trait EnumLiteral: Sized + Copy {
    /// All literals in declared order.
    const LITERALS: &'static [&'static str];

    fn literal(&self) -> &'static str;

    fn from_literal(literal: &str) -> Option<Self>;
}
