//! Identity shapes derived from primary keys.

use daogen_schema::{ColumnDescriptor, KeyDescriptor, TableDescriptor};

/// Shape of an entity's identity type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyShape<'a> {
    /// Single-column key; the identity is that column's type.
    Scalar(&'a ColumnDescriptor),
    /// Ordered tuple of the key columns' types.
    Tuple(Vec<&'a ColumnDescriptor>),
    /// Key too wide for a typed tuple; the identity is an untyped record.
    Record(Vec<&'a ColumnDescriptor>),
}

impl<'a> KeyShape<'a> {
    /// Key columns in key order.
    pub fn columns(&self) -> Vec<&'a ColumnDescriptor> {
        match self {
            KeyShape::Scalar(column) => vec![*column],
            KeyShape::Tuple(columns) | KeyShape::Record(columns) => columns.clone(),
        }
    }

    pub fn degree(&self) -> usize {
        match self {
            KeyShape::Scalar(_) => 1,
            KeyShape::Tuple(columns) | KeyShape::Record(columns) => columns.len(),
        }
    }

    /// Whether per-column typing was lost.
    pub fn is_degraded(&self) -> bool {
        matches!(self, KeyShape::Record(_))
    }
}

/// Resolves identity shapes with a fixed maximum tuple degree.
#[derive(Debug, Clone, Copy)]
pub struct KeyResolver {
    max_degree: usize,
}

impl KeyResolver {
    pub fn new(max_degree: usize) -> Self {
        Self { max_degree }
    }

    pub fn max_degree(&self) -> usize {
        self.max_degree
    }

    pub fn resolve<'a>(&self, key: &'a KeyDescriptor) -> KeyShape<'a> {
        let columns: Vec<&ColumnDescriptor> = key.columns.iter().collect();
        match columns.len() {
            1 => KeyShape::Scalar(columns[0]),
            n if n <= self.max_degree => KeyShape::Tuple(columns),
            _ => KeyShape::Record(columns),
        }
    }

    /// Identity of a table, or `None` when it has no primary key and gets no DAO.
    pub fn identity<'a>(&self, table: &'a TableDescriptor) -> Option<KeyShape<'a>> {
        table.primary_key.as_ref().map(|pk| self.resolve(pk))
    }
}
