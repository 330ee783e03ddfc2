//! Table files: the entity variants and their capability impls.

use daogen_codegen::{Classification, CodeFragment, KeyShape};

use super::serialization::{delegating_fns, from_json_fn, to_json_fn, write_expr};
use super::{ColumnPlan, EmitContext, TablePlan, enums_in, mentions_json};
use crate::ast::{Field, Fn, Impl, Param, Struct, Trait};
use crate::rust_file::{RustFile, Use};

const ENTITY_DERIVES: &[&str] = &["Debug", "Clone", "Default", "PartialEq"];

/// Render `tables/<table>.rs`.
pub(crate) fn table_file(ctx: &EmitContext<'_>, plan: &TablePlan<'_>) -> String {
    let config = ctx.config;
    let name = plan.type_name.as_str();
    let record = plan.record_name();

    let mut file = RustFile::new()
        .doc(format!("Entity types for the `{}` table.", plan.table.name))
        .use_stmts(imports(ctx, plan));

    file = file
        .add(data_struct(plan, name).doc(format!("Row of the `{}` table.", plan.table.name)))
        .add(inherent_impl(ctx, plan, name));

    if config.interfaces {
        file = file
            .add(interface(ctx, plan))
            .add(interface_impl(ctx, plan, name));
    }
    if config.json {
        file = file.add(json_impl(ctx, plan, name));
    }

    if plan.persistable {
        if let Some(id_type) = plan.id_type() {
            file = file
                .add(CodeFragment::Line(format!(
                    "pub type {} = {};",
                    plan.id_name(),
                    id_type
                )))
                .add(identifiable_impl(ctx, plan))
                .add(entity_impl(ctx, plan));
        }
    }

    if config.records {
        file = file
            .add(data_struct(plan, &record).doc(format!(
                "Backing record of the `{}` table.",
                plan.table.name
            )))
            .add(inherent_impl(ctx, plan, &record));
        if config.interfaces {
            file = file.add(interface_impl(ctx, plan, &record));
        }
        if config.json {
            file = file.add(json_impl(ctx, plan, &record));
        }
        file = file
            .add(conversion(plan, name, &record))
            .add(conversion(plan, &record, name));
    }

    file.render()
}

fn imports(ctx: &EmitContext<'_>, plan: &TablePlan<'_>) -> Vec<Use> {
    let mut uses = Vec::new();
    let config = ctx.config;

    if config.json || mentions_json(plan.columns.iter().map(|c| c.ty.as_str())) {
        uses.push(Use::new(ctx.runtime()).symbol("json"));
    }

    let degraded = plan.identity.as_ref().is_some_and(KeyShape::is_degraded);
    let symbols: Vec<&str> = [
        ("Entity", plan.persistable),
        ("Identifiable", plan.persistable),
        ("JsonConvertible", config.json),
        ("RecordKey", plan.persistable && degraded),
        ("SqlValue", plan.persistable),
        ("TableMeta", plan.persistable),
    ]
    .into_iter()
    .filter_map(|(symbol, needed)| needed.then_some(symbol))
    .collect();
    if !symbols.is_empty() {
        uses.push(ctx.runtime_use(&symbols));
    }

    let enums = enums_in(&plan.columns);
    if !enums.is_empty() {
        uses.push(Use::new("super::super::enums").symbols(enums));
    }
    uses
}

fn data_struct(plan: &TablePlan<'_>, name: &str) -> Struct {
    Struct::new(name).derives(ENTITY_DERIVES).fields(
        plan.columns
            .iter()
            .map(|column| Field::new(&column.field, format!("Option<{}>", column.ty)).private()),
    )
}

fn getter(ctx: &EmitContext<'_>, column: &ColumnPlan<'_>) -> Fn {
    Fn::new(&column.field)
        .param(Param::receiver("&self"))
        .returns(&column.getter_type)
        .body_line(ctx.types.getter_body(column.column, &column.field))
}

fn setter(column: &ColumnPlan<'_>) -> Fn {
    Fn::new(column.setter())
        .param(Param::receiver("&mut self"))
        .param(Param::new("value", format!("Option<{}>", column.ty)))
        .returns("&mut Self")
        .body_line(format!("self.{} = value;", column.field))
        .body_line("self")
}

fn inherent_impl(ctx: &EmitContext<'_>, plan: &TablePlan<'_>, name: &str) -> Impl {
    let mut with_values = Fn::new("with_values")
        .doc("Construct from every column, in declared order.")
        .returns("Self")
        .body_node(CodeFragment::braced(
            "Self {",
            plan.columns
                .iter()
                .map(|c| CodeFragment::Line(format!("{},", c.field)))
                .collect(),
        ));
    if plan.columns.len() > 7 {
        with_values = with_values.attr("allow(clippy::too_many_arguments)");
    }
    for column in &plan.columns {
        let ty = format!("Option<{}>", column.ty);
        with_values = with_values.param(Param::new(&column.field, ty));
    }

    let mut block = Impl::new(name)
        .method(
            Fn::new("new")
                .doc("An instance with every column unset.")
                .returns("Self")
                .body_line("Self::default()"),
        )
        .method(with_values);

    if ctx.config.json {
        block = block.method(
            Fn::new("from_json_object")
                .doc("Construct from a wire object; equivalent to `new` followed by `from_json`.")
                .param(Param::new("json", "&json::JsonObject"))
                .returns("Self")
                .body_line("let mut value = Self::new();")
                .body_line("JsonConvertible::from_json(&mut value, json);")
                .body_line("value"),
        );
    }

    plan.columns.iter().fold(block, |block, column| {
        block.method(getter(ctx, column)).method(setter(column))
    })
}

/// The interface implemented directly over the fields.
fn interface_impl(ctx: &EmitContext<'_>, plan: &TablePlan<'_>, name: &str) -> Impl {
    Impl::new(name).for_trait(plan.interface_name()).methods(
        plan.columns
            .iter()
            .flat_map(|column| [getter(ctx, column), setter(column)]),
    )
}

fn interface(ctx: &EmitContext<'_>, plan: &TablePlan<'_>) -> Trait {
    let doc = if ctx.config.records {
        format!(
            "Accessors shared by [`{}`] and [`{}`].",
            plan.type_name,
            plan.record_name()
        )
    } else {
        format!("Accessors of `{}` rows.", plan.table.name)
    };

    let mut interface = Trait::new(plan.interface_name()).doc(doc);
    for column in &plan.columns {
        interface = interface
            .required(
                Fn::new(&column.field)
                    .param(Param::receiver("&self"))
                    .returns(&column.getter_type),
            )
            .required(
                Fn::new(column.setter())
                    .param(Param::receiver("&mut self"))
                    .param(Param::new("value", format!("Option<{}>", column.ty)))
                    .returns("&mut Self"),
            );
    }
    if ctx.config.json {
        interface = interface
            .provided(from_json_fn(plan).doc("Overwrite every mapped column from `json`."))
            .provided(to_json_fn(plan).doc("Wire object with one key per mapped column."));
    }
    interface
}

fn json_impl(ctx: &EmitContext<'_>, plan: &TablePlan<'_>, name: &str) -> Impl {
    let block = Impl::new(name).for_trait("JsonConvertible");
    if ctx.config.interfaces {
        block.methods(delegating_fns(plan))
    } else {
        block.method(from_json_fn(plan)).method(to_json_fn(plan))
    }
}

fn identifiable_impl(ctx: &EmitContext<'_>, plan: &TablePlan<'_>) -> Impl {
    let keys = plan.key_columns();
    let projection = match &plan.identity {
        Some(KeyShape::Scalar(_)) => keys
            .first()
            .map(|c| ctx.types.owned(c.column, &format!("self.{}", c.field)))
            .unwrap_or_default(),
        Some(KeyShape::Tuple(_)) => format!(
            "Some(({}))",
            keys.iter()
                .map(|c| format!("{}?", ctx.types.owned(c.column, &format!("self.{}", c.field))))
                .collect::<Vec<_>>()
                .join(", ")
        ),
        Some(KeyShape::Record(_)) => format!(
            "Some(RecordKey::new(vec![{}]))",
            keys.iter()
                .map(|c| format!(
                    "SqlValue::from({}?)",
                    ctx.types.owned(c.column, &format!("self.{}", c.field))
                ))
                .collect::<Vec<_>>()
                .join(", ")
        ),
        None => String::new(),
    };

    Impl::new(&plan.type_name)
        .for_trait("Identifiable")
        .assoc_type("Id", &plan.id_name())
        .method(
            Fn::new("id")
                .param(Param::receiver("&self"))
                .returns(format!("Option<{}>", plan.id_name()))
                .body_line(projection),
        )
}

fn string_slice<'s>(items: impl IntoIterator<Item = &'s str>) -> String {
    let literals: Vec<String> = items.into_iter().map(|s| format!("{:?}", s)).collect();
    format!("&[{}]", literals.join(", "))
}

fn entity_impl(ctx: &EmitContext<'_>, plan: &TablePlan<'_>) -> Impl {
    let mapped: Vec<&ColumnPlan<'_>> = plan.columns.iter().filter(|c| c.is_mapped()).collect();
    let primary_key: Vec<&str> = plan
        .key_columns()
        .iter()
        .map(|c| c.column.name.as_str())
        .collect();

    let table = CodeFragment::block(
        "const TABLE: TableMeta = TableMeta {",
        vec![
            CodeFragment::Line(format!("name: {},", plan.table_literal())),
            CodeFragment::Line(format!(
                "columns: {},",
                string_slice(mapped.iter().map(|c| c.column.name.as_str()))
            )),
            CodeFragment::Line(format!(
                "fields: {},",
                string_slice(mapped.iter().map(|c| c.json_field.as_str()))
            )),
            CodeFragment::Line(format!("primary_key: {},", string_slice(primary_key))),
        ],
        Some("};".to_string()),
    );

    let values = if mapped.is_empty() {
        CodeFragment::line("Vec::new()")
    } else {
        CodeFragment::block(
            "vec![",
            mapped
                .iter()
                .map(|c| CodeFragment::Line(format!("{},", sql_value(ctx, c))))
                .collect(),
            Some("]".to_string()),
        )
    };

    Impl::new(&plan.type_name)
        .for_trait("Entity")
        .item(vec![table])
        .method(
            Fn::new("values")
                .param(Param::receiver("&self"))
                .returns("Vec<SqlValue>")
                .body_node(values),
        )
}

/// The column's value as a statement parameter.
fn sql_value(ctx: &EmitContext<'_>, column: &ColumnPlan<'_>) -> String {
    match &column.classification {
        Classification::Custom(_) => {
            let getter = format!("self.{}()", column.field);
            let json = write_expr(column, &getter).unwrap_or_default();
            format!("SqlValue::from_json({})", json)
        }
        _ => format!(
            "SqlValue::from({})",
            ctx.types.owned(column.column, &format!("self.{}", column.field))
        ),
    }
}

fn conversion(plan: &TablePlan<'_>, from: &str, to: &str) -> Impl {
    Impl::new(to)
        .for_trait(format!("From<{}>", from))
        .method(
            Fn::new("from")
                .param(Param::new("value", from))
                .returns("Self")
                .body_node(CodeFragment::braced(
                    "Self {",
                    plan.columns
                        .iter()
                        .map(|c| CodeFragment::Line(format!("{}: value.{},", c.field, c.field)))
                        .collect(),
                )),
        )
}
