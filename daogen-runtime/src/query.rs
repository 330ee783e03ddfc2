//! Statements, conditions and SQL rendering.
//!
//! SQL uses `?` placeholders and double-quoted identifiers, which SQLite
//! and MySQL (in ANSI mode) both accept.

use crate::error::{DaoError, DaoResult};
use crate::value::SqlValue;

/// A single SQL statement with its parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub sql: String,
    pub params: Vec<SqlValue>,
}

impl Statement {
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: Vec::new(),
        }
    }

    pub fn bind(mut self, value: impl Into<SqlValue>) -> Self {
        self.params.push(value.into());
        self
    }
}

/// Row predicate.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// Column equals value (`IS NULL` for a null value).
    Eq(String, SqlValue),
    /// Column is one of the values. Never empty.
    In(String, Vec<SqlValue>),
    And(Vec<Condition>),
    Or(Vec<Condition>),
    /// Matches no row.
    Never,
}

impl Condition {
    pub fn eq(column: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        Condition::Eq(column.into(), value.into())
    }

    /// Membership predicate; an empty candidate list matches nothing.
    pub fn is_in<I, V>(column: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<SqlValue>,
    {
        let values: Vec<SqlValue> = values.into_iter().map(Into::into).collect();
        if values.is_empty() {
            Condition::Never
        } else {
            Condition::In(column.into(), values)
        }
    }

    pub fn and(conditions: Vec<Condition>) -> Self {
        Condition::And(conditions)
    }

    pub fn or(conditions: Vec<Condition>) -> Self {
        Condition::Or(conditions)
    }

    /// Whether the condition can be decided as matching nothing without a query.
    pub fn is_never(&self) -> bool {
        match self {
            Condition::Never => true,
            Condition::And(parts) => parts.iter().any(Condition::is_never),
            Condition::Or(parts) => parts.iter().all(Condition::is_never),
            Condition::Eq(..) | Condition::In(..) => false,
        }
    }

    /// Render to SQL, appending parameters in placeholder order.
    pub fn render(&self, params: &mut Vec<SqlValue>) -> String {
        match self {
            Condition::Eq(column, SqlValue::Null) => format!("{} IS NULL", quote_ident(column)),
            Condition::Eq(column, value) => {
                params.push(value.clone());
                format!("{} = ?", quote_ident(column))
            }
            Condition::In(column, values) => {
                params.extend(values.iter().cloned());
                format!("{} IN ({})", quote_ident(column), placeholders(values.len()))
            }
            Condition::And(parts) if parts.is_empty() => "1 = 1".to_string(),
            Condition::Or(parts) if parts.is_empty() => "1 = 0".to_string(),
            Condition::And(parts) => join(parts, " AND ", params),
            Condition::Or(parts) => join(parts, " OR ", params),
            Condition::Never => "1 = 0".to_string(),
        }
    }
}

fn join(parts: &[Condition], separator: &str, params: &mut Vec<SqlValue>) -> String {
    let rendered: Vec<String> = parts.iter().map(|p| p.render(params)).collect();
    if rendered.len() == 1 {
        rendered.concat()
    } else {
        format!("({})", rendered.join(separator))
    }
}

fn placeholders(count: usize) -> String {
    vec!["?"; count].join(", ")
}

/// Quote an identifier, doubling embedded quotes.
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Static description of a table emitted alongside each entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableMeta {
    pub name: &'static str,
    /// Persisted columns, in entity value order.
    pub columns: &'static [&'static str],
    /// Wire field for each entry of `columns`.
    pub fields: &'static [&'static str],
    pub primary_key: &'static [&'static str],
}

impl TableMeta {
    fn projection(&self) -> String {
        self.columns
            .iter()
            .zip(self.fields)
            .map(|(column, field)| {
                if column == field {
                    quote_ident(column)
                } else {
                    format!("{} AS {}", quote_ident(column), quote_ident(field))
                }
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Condition matching the row with the given key values.
    ///
    /// Fails unless there is exactly one value per key column.
    pub fn key_condition(&self, values: Vec<SqlValue>) -> DaoResult<Condition> {
        if self.primary_key.is_empty() || values.len() != self.primary_key.len() {
            return Err(DaoError::key_arity(
                self.name,
                self.primary_key.len(),
                values.len(),
            ));
        }
        let mut parts: Vec<Condition> = self
            .primary_key
            .iter()
            .zip(values)
            .map(|(column, value)| Condition::eq(*column, value))
            .collect();
        Ok(if parts.len() == 1 {
            parts.remove(0)
        } else {
            Condition::and(parts)
        })
    }

    /// Condition matching any of the given keys.
    pub fn keys_condition(&self, keys: Vec<Vec<SqlValue>>) -> DaoResult<Condition> {
        let parts = keys
            .into_iter()
            .map(|k| self.key_condition(k))
            .collect::<DaoResult<Vec<_>>>()?;
        if parts.is_empty() {
            return Ok(Condition::Never);
        }
        if let [column] = self.primary_key {
            let values = parts.into_iter().filter_map(|part| match part {
                Condition::Eq(_, value) => Some(value),
                _ => None,
            });
            return Ok(Condition::is_in(*column, values));
        }
        Ok(Condition::or(parts))
    }

    pub fn select(&self, condition: &Condition) -> Statement {
        let mut params = Vec::new();
        let predicate = condition.render(&mut params);
        Statement {
            sql: format!(
                "SELECT {} FROM {} WHERE {}",
                self.projection(),
                quote_ident(self.name),
                predicate
            ),
            params,
        }
    }

    pub fn select_all(&self) -> Statement {
        Statement::new(format!(
            "SELECT {} FROM {}",
            self.projection(),
            quote_ident(self.name)
        ))
    }

    /// `SELECT COUNT(*) AS "count"`, optionally filtered.
    pub fn count(&self, condition: Option<&Condition>) -> Statement {
        let mut params = Vec::new();
        let mut sql = format!("SELECT COUNT(*) AS \"count\" FROM {}", quote_ident(self.name));
        if let Some(condition) = condition {
            sql.push_str(" WHERE ");
            sql.push_str(&condition.render(&mut params));
        }
        Statement { sql, params }
    }

    pub fn insert(&self, values: Vec<SqlValue>) -> Statement {
        Statement {
            sql: format!(
                "INSERT INTO {} ({}) VALUES ({})",
                quote_ident(self.name),
                self.column_list(),
                placeholders(self.columns.len())
            ),
            params: values,
        }
    }

    /// Insert that yields the stored key columns as a single row.
    pub fn insert_returning(&self, values: Vec<SqlValue>) -> Statement {
        let returning: Vec<String> = self
            .primary_key
            .iter()
            .map(|key| {
                let field = self
                    .columns
                    .iter()
                    .position(|c| c == key)
                    .and_then(|i| self.fields.get(i))
                    .copied()
                    .unwrap_or(*key);
                if field == *key {
                    quote_ident(key)
                } else {
                    format!("{} AS {}", quote_ident(key), quote_ident(field))
                }
            })
            .collect();
        let mut statement = self.insert(values);
        statement.sql.push_str(" RETURNING ");
        statement.sql.push_str(&returning.join(", "));
        statement
    }

    /// Multi-row insert; `None` for an empty batch.
    pub fn insert_many(&self, rows: Vec<Vec<SqlValue>>) -> Option<Statement> {
        if rows.is_empty() {
            return None;
        }
        let row = format!("({})", placeholders(self.columns.len()));
        let tuples = vec![row.as_str(); rows.len()].join(", ");
        Some(Statement {
            sql: format!(
                "INSERT INTO {} ({}) VALUES {}",
                quote_ident(self.name),
                self.column_list(),
                tuples
            ),
            params: rows.into_iter().flatten().collect(),
        })
    }

    fn column_list(&self) -> String {
        self.columns
            .iter()
            .map(|c| quote_ident(c))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Update the non-key columns of the matching rows.
    ///
    /// Returns `None` when every column is part of the key.
    pub fn update(&self, values: Vec<SqlValue>, condition: &Condition) -> Option<Statement> {
        let (assignments, mut params): (Vec<String>, Vec<SqlValue>) = self
            .columns
            .iter()
            .zip(values)
            .filter(|(column, _)| !self.primary_key.contains(*column))
            .map(|(column, value)| (format!("{} = ?", quote_ident(column)), value))
            .unzip();
        if assignments.is_empty() {
            return None;
        }
        let predicate = condition.render(&mut params);
        Some(Statement {
            sql: format!(
                "UPDATE {} SET {} WHERE {}",
                quote_ident(self.name),
                assignments.join(", "),
                predicate
            ),
            params,
        })
    }

    pub fn delete(&self, condition: &Condition) -> Statement {
        let mut params = Vec::new();
        let predicate = condition.render(&mut params);
        Statement {
            sql: format!("DELETE FROM {} WHERE {}", quote_ident(self.name), predicate),
            params,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOMETHING: TableMeta = TableMeta {
        name: "something",
        columns: &["someid", "somestring"],
        fields: &["someid", "somestring"],
        primary_key: &["someid"],
    };

    const PAIR: TableMeta = TableMeta {
        name: "pair",
        columns: &["a", "b"],
        fields: &["a", "b"],
        primary_key: &["a", "b"],
    };

    #[test]
    fn test_empty_membership_is_never() {
        let condition = Condition::is_in("somestring", Vec::<String>::new());
        assert_eq!(condition, Condition::Never);
        assert!(condition.is_never());
        assert!(Condition::and(vec![Condition::eq("a", 1), Condition::Never]).is_never());
        assert!(!Condition::or(vec![Condition::eq("a", 1), Condition::Never]).is_never());
    }

    #[test]
    fn test_select_membership() {
        let stmt = SOMETHING.select(&Condition::is_in("somestring", ["a", "b"]));
        assert_eq!(
            stmt.sql,
            "SELECT \"someid\", \"somestring\" FROM \"something\" WHERE \"somestring\" IN (?, ?)"
        );
        assert_eq!(stmt.params.len(), 2);
    }

    #[test]
    fn test_eq_null_renders_is_null() {
        let mut params = Vec::new();
        let sql = Condition::eq("somestring", None::<String>).render(&mut params);
        assert_eq!(sql, "\"somestring\" IS NULL");
        assert!(params.is_empty());
    }

    #[test]
    fn test_composite_key_condition() {
        let condition = PAIR
            .key_condition(vec![SqlValue::Int(5), SqlValue::from("x")])
            .unwrap();
        let stmt = PAIR.delete(&condition);
        assert_eq!(
            stmt.sql,
            "DELETE FROM \"pair\" WHERE (\"a\" = ? AND \"b\" = ?)"
        );
        assert_eq!(stmt.params, vec![SqlValue::Int(5), SqlValue::from("x")]);
    }

    #[test]
    fn test_keys_condition_single_column_uses_in() {
        let keys = vec![vec![SqlValue::Int(1)], vec![SqlValue::Int(2)]];
        let condition = SOMETHING.keys_condition(keys).unwrap();
        assert_eq!(
            condition,
            Condition::In(
                "someid".to_string(),
                vec![SqlValue::Int(1), SqlValue::Int(2)]
            )
        );
        assert!(PAIR.keys_condition(Vec::new()).unwrap().is_never());
    }

    #[test]
    fn test_short_key_is_rejected() {
        assert!(matches!(
            PAIR.key_condition(Vec::new()),
            Err(DaoError::KeyArity {
                table: "pair",
                expected: 2,
                actual: 0
            })
        ));
        assert!(PAIR.key_condition(vec![SqlValue::Int(1)]).is_err());
        assert!(
            SOMETHING
                .key_condition(vec![SqlValue::Int(1), SqlValue::Int(2)])
                .is_err()
        );

        let keys = vec![vec![SqlValue::Int(1), SqlValue::from("x")], Vec::new()];
        assert!(PAIR.keys_condition(keys).is_err());
        assert!(SOMETHING.keys_condition(vec![Vec::new()]).is_err());
    }

    #[test]
    fn test_keyless_table_has_no_key_condition() {
        let table = TableMeta {
            name: "log",
            columns: &["line"],
            fields: &["line"],
            primary_key: &[],
        };
        assert!(table.key_condition(Vec::new()).is_err());
    }

    #[test]
    fn test_insert_and_update() {
        let values = vec![SqlValue::Int(1), SqlValue::from("x")];
        let insert = SOMETHING.insert(values.clone());
        assert_eq!(
            insert.sql,
            "INSERT INTO \"something\" (\"someid\", \"somestring\") VALUES (?, ?)"
        );

        let key = SOMETHING.key_condition(vec![SqlValue::Int(1)]).unwrap();
        let update = SOMETHING.update(values.clone(), &key).unwrap();
        assert_eq!(
            update.sql,
            "UPDATE \"something\" SET \"somestring\" = ? WHERE \"someid\" = ?"
        );
        assert_eq!(update.params, vec![SqlValue::from("x"), SqlValue::Int(1)]);

        assert!(PAIR.update(values, &Condition::Never).is_none());
    }

    #[test]
    fn test_insert_returning_key() {
        let table = TableMeta {
            name: "t",
            columns: &["some_id", "label"],
            fields: &["someId", "label"],
            primary_key: &["some_id"],
        };
        let stmt = table.insert_returning(vec![SqlValue::Null, SqlValue::from("x")]);
        assert_eq!(
            stmt.sql,
            "INSERT INTO \"t\" (\"some_id\", \"label\") VALUES (?, ?) \
             RETURNING \"some_id\" AS \"someId\""
        );
    }

    #[test]
    fn test_insert_many() {
        let rows = vec![
            vec![SqlValue::Int(1), SqlValue::from("x")],
            vec![SqlValue::Int(2), SqlValue::from("y")],
        ];
        let stmt = SOMETHING.insert_many(rows).unwrap();
        assert_eq!(
            stmt.sql,
            "INSERT INTO \"something\" (\"someid\", \"somestring\") VALUES (?, ?), (?, ?)"
        );
        assert_eq!(stmt.params.len(), 4);
        assert!(SOMETHING.insert_many(Vec::new()).is_none());
    }

    #[test]
    fn test_projection_aliases_renamed_fields() {
        let table = TableMeta {
            name: "t",
            columns: &["some_id"],
            fields: &["someId"],
            primary_key: &["some_id"],
        };
        assert_eq!(
            table.select_all().sql,
            "SELECT \"some_id\" AS \"someId\" FROM \"t\""
        );
    }

    #[test]
    fn test_quote_ident_escapes() {
        assert_eq!(quote_ident("we\"ird"), "\"we\"\"ird\"");
    }

    #[test]
    fn test_count() {
        assert_eq!(
            SOMETHING.count(None).sql,
            "SELECT COUNT(*) AS \"count\" FROM \"something\""
        );
    }
}
