//! Raw TOML structures and their assembly into descriptors.

use std::collections::HashMap;

use daogen_core::{to_pascal_case, to_snake_case};
use indexmap::IndexMap;
use serde::Deserialize;

use crate::{
    ColumnDescriptor, ConverterKind, DataType, EnumDescriptor, GeneratorConfig, KeyDescriptor,
    KeyMembership, MAX_SUPPORTED_KEY_DEGREE, Result, SchemaDescriptor, TableDescriptor,
    validate::ParseContext,
};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct RawSchema {
    #[serde(default)]
    generator: GeneratorConfig,
    #[serde(default)]
    enums: IndexMap<String, RawEnum>,
    #[serde(default)]
    tables: Vec<RawTable>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawEnum {
    literals: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawTable {
    name: String,
    #[serde(default)]
    primary_key: Vec<String>,
    #[serde(default)]
    unique_keys: Vec<Vec<String>>,
    #[serde(default)]
    columns: Vec<RawColumn>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawColumn {
    name: String,
    #[serde(rename = "type")]
    data_type: DataType,
    #[serde(default = "default_nullable")]
    nullable: bool,
    #[serde(default)]
    converter: Option<RawConverter>,
    #[serde(default, rename = "enum")]
    enum_type: Option<String>,
}

fn default_nullable() -> bool {
    true
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawConverter {
    Named(String),
    Custom { custom: String },
}

impl RawSchema {
    /// Validate the raw schema and assemble the descriptor graph.
    pub(crate) fn into_descriptor(self, ctx: &ParseContext<'_>) -> Result<SchemaDescriptor> {
        if !(1..=MAX_SUPPORTED_KEY_DEGREE).contains(&self.generator.max_key_degree) {
            return Err(ctx.validation_error(
                format!(
                    "max_key_degree must be between 1 and {}",
                    MAX_SUPPORTED_KEY_DEGREE
                ),
                "max_key_degree",
            ));
        }

        // Generated names are case conversions, so distinct inputs can collide
        let mut enum_types = Claims::default();
        let mut enums = IndexMap::new();
        for (name, raw) in self.enums {
            let enum_ctx = ctx.push("enums");
            enum_ctx.validate_name(&name, "enum", true)?;
            if raw.literals.is_empty() {
                return Err(ctx.validation_error(
                    format!("enum '{}' must declare at least one literal", name),
                    &name,
                ));
            }
            enum_types.claim(ctx, to_pascal_case(&name), "enum", &name)?;
            let mut variants = Claims::default();
            for literal in &raw.literals {
                variants.claim(ctx, variant_ident(literal), "literal", literal)?;
            }
            enums.insert(
                name.clone(),
                EnumDescriptor {
                    name,
                    literals: raw.literals,
                },
            );
        }

        let mut modules = Claims::default();
        let mut table_types = Claims::default();
        let mut tables: Vec<TableDescriptor> = Vec::with_capacity(self.tables.len());
        for raw in self.tables {
            if tables.iter().any(|t| t.name == raw.name) {
                return Err(ctx.validation_error(
                    format!("table '{}' is declared more than once", raw.name),
                    &raw.name,
                ));
            }
            modules.claim(ctx, to_snake_case(&raw.name), "table", &raw.name)?;
            let type_name = to_pascal_case(&raw.name);
            // Table modules import the enums they use
            for derived in [
                type_name.clone(),
                format!("{}Record", type_name),
                format!("I{}", type_name),
                format!("{}Id", type_name),
                format!("{}Dao", type_name),
            ] {
                enum_types.check(ctx, &derived, "table", &raw.name)?;
            }
            table_types.claim(ctx, type_name, "table", &raw.name)?;
            tables.push(raw.assemble(ctx, &enums)?);
        }

        Ok(SchemaDescriptor {
            config: self.generator,
            enums,
            tables,
        })
    }
}

impl RawTable {
    fn assemble(
        self,
        ctx: &ParseContext<'_>,
        enums: &IndexMap<String, EnumDescriptor>,
    ) -> Result<TableDescriptor> {
        let RawTable {
            name,
            primary_key,
            unique_keys: raw_unique_keys,
            columns: raw_columns,
        } = self;

        ctx.validate_name(&name, "table", true)?;
        let table_ctx = ctx.push("tables");

        let mut seen: HashMap<String, String> = HashMap::new();
        let mut columns = Vec::with_capacity(raw_columns.len());
        for raw in raw_columns {
            table_ctx.validate_name(&raw.name, "column", false)?;

            // Identifiers are derived from the snake_case form, so those must not collide
            let ident = to_snake_case(&raw.name);
            if let Some(existing) = seen.get(&ident) {
                return Err(ctx.duplicate_column_error(&name, &raw.name, existing));
            }
            seen.insert(ident, raw.name.clone());

            columns.push(raw.into_column(&name, ctx, enums)?);
        }

        let primary_key = if primary_key.is_empty() {
            None
        } else {
            let key_name = format!("{}_pkey", name);
            Some(resolve_key(ctx, &name, &columns, &primary_key, key_name, true)?)
        };

        let mut unique_keys = Vec::with_capacity(raw_unique_keys.len());
        for key_columns in &raw_unique_keys {
            if key_columns.is_empty() {
                return Err(ctx.validation_error(
                    format!("table '{}' declares an empty unique key", name),
                    &name,
                ));
            }
            let key_name = format!("{}_{}_key", name, key_columns.join("_"));
            unique_keys.push(resolve_key(
                ctx,
                &name,
                &columns,
                key_columns,
                key_name,
                false,
            )?);
        }

        // Record memberships on the columns, primary key first
        for key in primary_key.iter().chain(unique_keys.iter()) {
            let membership = KeyMembership {
                key: key.name.clone(),
                degree: key.degree(),
                is_primary: key.is_primary,
            };
            for column in columns.iter_mut().filter(|c| key.contains(&c.name)) {
                column.unique_keys.push(membership.clone());
            }
        }

        // Keys carry copies of their columns, refreshed with the memberships
        let refresh = |key: KeyDescriptor| KeyDescriptor {
            columns: key
                .columns
                .iter()
                .filter_map(|kc| columns.iter().find(|c| c.name == kc.name).cloned())
                .collect(),
            ..key
        };
        let primary_key = primary_key.map(refresh);
        let unique_keys = unique_keys.into_iter().map(refresh).collect();

        Ok(TableDescriptor {
            name,
            columns,
            primary_key,
            unique_keys,
        })
    }
}

/// Generated identifiers already taken, with the declaration that took each.
#[derive(Default)]
struct Claims(HashMap<String, String>);

impl Claims {
    fn check(&self, ctx: &ParseContext<'_>, ident: &str, kind: &str, name: &str) -> Result<()> {
        match self.0.get(ident) {
            Some(owner) => Err(ctx.validation_error(
                format!(
                    "{} '{}' generates `{}`, which {} also generates",
                    kind, name, ident, owner
                ),
                name,
            )),
            None => Ok(()),
        }
    }

    fn claim(
        &mut self,
        ctx: &ParseContext<'_>,
        ident: String,
        kind: &str,
        name: &str,
    ) -> Result<()> {
        self.check(ctx, &ident, kind, name)?;
        self.0.insert(ident, format!("{} '{}'", kind, name));
        Ok(())
    }
}

/// Variant identifier for an enum literal, before keyword escaping.
fn variant_ident(literal: &str) -> String {
    let name = to_pascal_case(literal);
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        format!("V{}", name)
    } else {
        name
    }
}

fn resolve_key(
    ctx: &ParseContext<'_>,
    table: &str,
    columns: &[ColumnDescriptor],
    names: &[String],
    key_name: String,
    is_primary: bool,
) -> Result<KeyDescriptor> {
    let mut key_columns: Vec<ColumnDescriptor> = Vec::with_capacity(names.len());
    for name in names {
        let column = columns
            .iter()
            .find(|c| &c.name == name)
            .ok_or_else(|| ctx.unknown_key_column_error(table, name))?;
        if key_columns.iter().any(|c| &c.name == name) {
            return Err(ctx.validation_error(
                format!("column '{}' appears twice in key '{}'", name, key_name),
                name,
            ));
        }
        key_columns.push(column.clone());
    }
    Ok(KeyDescriptor {
        name: key_name,
        columns: key_columns,
        is_primary,
    })
}

impl RawColumn {
    fn into_column(
        self,
        table: &str,
        ctx: &ParseContext<'_>,
        enums: &IndexMap<String, EnumDescriptor>,
    ) -> Result<ColumnDescriptor> {
        let converter = match self.converter {
            None => None,
            Some(RawConverter::Named(name)) => match name.as_str() {
                "json-object" => Some(ConverterKind::JsonObject),
                "json-array" => Some(ConverterKind::JsonArray),
                other => {
                    return Err(ctx.validation_error(
                        format!(
                            "unknown converter '{}' on column '{}', expected \"json-object\", \"json-array\" or {{ custom = \"<type>\" }}",
                            other, self.name
                        ),
                        other,
                    ));
                }
            },
            Some(RawConverter::Custom { custom }) => Some(ConverterKind::Custom(custom)),
        };

        if let Some(enum_name) = &self.enum_type {
            if !enums.contains_key(enum_name) {
                return Err(ctx.unknown_enum_error(&self.name, enum_name));
            }
        }

        Ok(ColumnDescriptor {
            name: self.name,
            data_type: self.data_type,
            nullable: self.nullable,
            table: table.to_string(),
            unique_keys: Vec::new(),
            converter,
            enum_type: self.enum_type,
        })
    }
}
