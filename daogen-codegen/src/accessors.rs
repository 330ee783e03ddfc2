//! Lookup accessor planning for DAOs.
//!
//! Every column outside the primary key gets a find-many-by-membership
//! accessor. A column that alone forms a non-primary unique key also gets a
//! find-one-by-equality accessor. Primary key columns get neither; the DAO
//! already exposes lookups by id.

use daogen_schema::{ColumnDescriptor, TableDescriptor};

use crate::naming::NamingStrategy;

/// Shape of the accessor's argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamShape {
    Scalar,
    Collection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    One,
    Many,
}

/// Predicate the accessor hands to the query layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Predicate {
    Equality,
    Membership,
}

/// A lookup method to synthesize on a DAO.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedAccessor<'a> {
    pub method_name: String,
    pub column: &'a ColumnDescriptor,
    pub param: ParamShape,
    pub cardinality: Cardinality,
    pub predicate: Predicate,
}

impl GeneratedAccessor<'_> {
    /// Plural or singular parameter name.
    pub fn param_name(&self) -> &'static str {
        match self.param {
            ParamShape::Scalar => "value",
            ParamShape::Collection => "values",
        }
    }
}

/// Plan the lookup accessors for a table, in column order.
///
/// Tables without a primary key get no DAO and therefore no accessors.
pub fn plan_accessors<'a>(
    table: &'a TableDescriptor,
    naming: &dyn NamingStrategy,
) -> Vec<GeneratedAccessor<'a>> {
    if table.primary_key.is_none() {
        return Vec::new();
    }

    let mut accessors = Vec::new();
    for column in &table.columns {
        if table.is_primary_key_column(&column.name) {
            continue;
        }
        let fragment = naming.method_fragment(column);

        if column.is_single_column_unique() {
            accessors.push(GeneratedAccessor {
                method_name: format!("find_one_by_{}", fragment),
                column,
                param: ParamShape::Scalar,
                cardinality: Cardinality::One,
                predicate: Predicate::Equality,
            });
        }

        accessors.push(GeneratedAccessor {
            method_name: format!("find_many_by_{}", fragment),
            column,
            param: ParamShape::Collection,
            cardinality: Cardinality::Many,
            predicate: Predicate::Membership,
        });
    }
    accessors
}
