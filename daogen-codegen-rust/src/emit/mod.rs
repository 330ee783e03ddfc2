//! Emitters for the generated files.
//!
//! A [`TablePlan`] is computed once per table: it fixes names, Rust types and
//! the classification of every column, recording diagnostics as it goes. The
//! emitters only read plans, so each diagnostic is reported exactly once no
//! matter how many variants reuse a column.

mod dao;
mod entity;
mod enums;
mod modules;
mod serialization;

use daogen_codegen::{
    Classification, Diagnostic, DiagnosticSink, JsonKind, KeyResolver, KeyShape, NamingStrategy,
    TypeClassifier, TypeMapper,
};
use daogen_schema::{ColumnDescriptor, GeneratorConfig, SchemaDescriptor, TableDescriptor};

use crate::rust_file::Use;
use crate::type_mapper::RustTypeMapper;

pub(crate) use dao::dao_file;
pub(crate) use entity::table_file;
pub(crate) use enums::enums_file;
pub(crate) use modules::{daos_mod, root_mod, tables_mod};

/// Everything the emitters need for one run.
pub(crate) struct EmitContext<'a> {
    pub schema: &'a SchemaDescriptor,
    pub config: &'a GeneratorConfig,
    pub naming: &'a dyn NamingStrategy,
    pub types: RustTypeMapper<'a>,
    pub classifier: TypeClassifier<'a>,
    pub keys: KeyResolver,
}

impl<'a> EmitContext<'a> {
    pub fn runtime(&self) -> &str {
        &self.config.runtime_crate
    }

    pub fn runtime_use(&self, symbols: &[&str]) -> Use {
        Use::new(self.runtime()).symbols(symbols.iter().copied())
    }

    pub fn plan_table(
        &self,
        table: &'a TableDescriptor,
        sink: &mut DiagnosticSink,
    ) -> TablePlan<'a> {
        let columns: Vec<ColumnPlan<'a>> = table
            .columns
            .iter()
            .map(|column| ColumnPlan {
                column,
                field: self.naming.field_name(column),
                fragment: self.naming.method_fragment(column),
                json_field: self.naming.json_field(column),
                ty: self.types.column_type(column),
                getter_type: self.types.getter_type(column),
                enum_type: self.types.enum_type(column),
                classification: self.classifier.classify_reporting(column, sink),
            })
            .collect();

        let identity = self.keys.identity(table);
        let mut plan = TablePlan {
            table,
            type_name: self.naming.type_name(table),
            module: self.naming.module_name(table),
            columns,
            identity,
            persistable: false,
        };
        plan.persistable = self.check_persistable(&plan, sink);
        plan
    }

    /// Whether `Identifiable`, `Entity` and a DAO can be emitted for the table.
    fn check_persistable(&self, plan: &TablePlan<'_>, sink: &mut DiagnosticSink) -> bool {
        let report = self.config.daos;
        let table = &plan.table.name;

        let Some(identity) = &plan.identity else {
            if report {
                sink.push(
                    Diagnostic::info(
                        "dao",
                        format!("Table {} has no primary key, skipping DAO generation", table),
                    )
                    .table(table),
                );
            }
            return false;
        };

        if !self.config.json {
            if report {
                sink.push(
                    Diagnostic::info(
                        "dao",
                        format!(
                            "JSON mapping is disabled, skipping DAO generation for table {}",
                            table
                        ),
                    )
                    .table(table),
                );
            }
            return false;
        }

        for key_column in identity.columns() {
            // Structured JSON values cannot form a key
            let has_sql_mapping = plan.column(&key_column.name).is_some_and(|c| {
                matches!(
                    c.classification.kind(),
                    Some(kind) if !matches!(kind, JsonKind::JsonObject | JsonKind::JsonArray)
                )
            });
            if !has_sql_mapping {
                if report {
                    sink.push(
                        Diagnostic::warning(
                            "dao",
                            format!(
                                "Primary key column {} of table {} has no SQL mapping, skipping DAO generation",
                                key_column.name, table
                            ),
                        )
                        .table(table)
                        .column(&key_column.name),
                    );
                }
                return false;
            }
        }

        if identity.is_degraded() {
            sink.push(
                Diagnostic::info(
                    "keys",
                    format!(
                        "Primary key of table {} has {} columns, more than {}; its identity is an untyped RecordKey",
                        table,
                        identity.degree(),
                        self.keys.max_degree()
                    ),
                )
                .table(table),
            );
        }
        true
    }
}

/// Resolved generation data for one column.
pub(crate) struct ColumnPlan<'a> {
    pub column: &'a ColumnDescriptor,
    /// Struct field, getter and parameter identifier.
    pub field: String,
    /// Fragment of derived method names.
    pub fragment: String,
    pub json_field: String,
    /// Rust value type, without `Option`.
    pub ty: String,
    pub getter_type: String,
    pub enum_type: Option<String>,
    pub classification: Classification,
}

impl ColumnPlan<'_> {
    /// Wire name as a Rust string literal.
    pub fn key_literal(&self) -> String {
        format!("{:?}", self.json_field)
    }

    pub fn column_literal(&self) -> String {
        format!("{:?}", self.column.name)
    }

    pub fn setter(&self) -> String {
        format!("set_{}", self.fragment)
    }

    /// Whether the column is read, written and persisted.
    pub fn is_mapped(&self) -> bool {
        self.classification.is_supported()
    }

    /// Placeholder left in generated bodies for an unsupported column.
    pub fn placeholder(&self) -> Option<String> {
        match &self.classification {
            Classification::Unsupported { type_name } => Some(format!(
                "Omitting unrecognized type {} for column {}!",
                type_name, self.column.name
            )),
            _ => None,
        }
    }
}

/// Resolved generation data for one table.
pub(crate) struct TablePlan<'a> {
    pub table: &'a TableDescriptor,
    pub type_name: String,
    pub module: String,
    pub columns: Vec<ColumnPlan<'a>>,
    pub identity: Option<KeyShape<'a>>,
    pub persistable: bool,
}

impl TablePlan<'_> {
    pub fn column(&self, name: &str) -> Option<&ColumnPlan<'_>> {
        self.columns.iter().find(|c| c.column.name == name)
    }

    pub fn interface_name(&self) -> String {
        format!("I{}", self.type_name)
    }

    pub fn record_name(&self) -> String {
        format!("{}Record", self.type_name)
    }

    pub fn id_name(&self) -> String {
        format!("{}Id", self.type_name)
    }

    pub fn dao_name(&self) -> String {
        format!("{}Dao", self.type_name)
    }

    pub fn dao_module(&self) -> String {
        format!("{}_dao", self.module)
    }

    pub fn table_literal(&self) -> String {
        format!("{:?}", self.table.name)
    }

    /// Key columns in key order.
    pub fn key_columns(&self) -> Vec<&ColumnPlan<'_>> {
        self.identity
            .as_ref()
            .map(|identity| {
                identity
                    .columns()
                    .into_iter()
                    .filter_map(|key| self.column(&key.name))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Rust type of the identity.
    pub fn id_type(&self) -> Option<String> {
        match self.identity.as_ref()? {
            KeyShape::Scalar(_) => self.key_columns().first().map(|c| c.ty.clone()),
            KeyShape::Tuple(_) => Some(format!(
                "({})",
                self.key_columns()
                    .iter()
                    .map(|c| c.ty.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            )),
            KeyShape::Record(_) => Some("RecordKey".to_string()),
        }
    }
}

/// Generated enums referenced by the given columns, first use first.
pub(crate) fn enums_in<'c, 'a: 'c>(
    columns: impl IntoIterator<Item = &'c ColumnPlan<'a>>,
) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for column in columns {
        if let Some(name) = &column.enum_type {
            if !names.contains(name) {
                names.push(name.clone());
            }
        }
    }
    names
}

/// Whether any of the types is written relative to the runtime `json` module.
pub(crate) fn mentions_json<'t>(types: impl IntoIterator<Item = &'t str>) -> bool {
    types.into_iter().any(|ty| ty.contains("json::"))
}
