//! `daos/<table>_dao.rs`: a typed DAO per table with a primary key.

use daogen_codegen::{
    Cardinality, Classification, CodeFragment, Diagnostic, DiagnosticSink, GeneratedAccessor,
    plan_accessors,
};

use super::{ColumnPlan, EmitContext, TablePlan, enums_in, mentions_json};
use crate::ast::{Field, Fn, Impl, Param, Struct};
use crate::rust_file::{RustFile, Use};

/// Render the DAO file, or `None` when the table cannot be persisted.
pub(crate) fn dao_file(
    ctx: &EmitContext<'_>,
    plan: &TablePlan<'_>,
    sink: &mut DiagnosticSink,
) -> Option<String> {
    if !plan.persistable {
        return None;
    }
    let entity = plan.type_name.as_str();
    let id = plan.id_name();
    let accessors = usable_accessors(ctx, plan, sink);

    let lookup_columns: Vec<&ColumnPlan<'_>> = accessors
        .iter()
        .filter_map(|a| plan.column(&a.column.name))
        .collect();

    let mut runtime = vec!["Dao", "DaoResult", "QueryExecutor"];
    if !accessors.is_empty() {
        runtime.insert(0, "Condition");
    }
    let mut uses = vec![ctx.runtime_use(&runtime)];
    if mentions_json(lookup_columns.iter().map(|c| c.ty.as_str())) {
        uses.insert(0, Use::new(ctx.runtime()).symbol("json"));
    }
    let enums = enums_in(lookup_columns.iter().copied());
    if !enums.is_empty() {
        uses.push(Use::new("super::super::enums").symbols(enums));
    }
    uses.push(
        Use::new(format!("super::super::tables::{}", plan.module)).symbols([entity, id.as_str()]),
    );

    let dao = Struct::new(plan.dao_name())
        .doc(format!(
            "Data access for the `{}` table.\n\nEvery call runs one statement on its own connection.",
            plan.table.name
        ))
        .generics("X")
        .field(Field::new("dao", format!("Dao<{}, X>", entity)).private());

    let mut block = Impl::new(format!("{}<X>", plan.dao_name()))
        .generics("X: QueryExecutor")
        .method(
            Fn::new("new")
                .param(Param::new("executor", "X"))
                .returns("Self")
                .body_node(CodeFragment::braced(
                    "Self {",
                    vec![CodeFragment::line("dao: Dao::new(executor),")],
                )),
        )
        .methods(crud_methods(entity, &id));

    for accessor in &accessors {
        if let Some(column) = plan.column(&accessor.column.name) {
            block = block.method(accessor_method(entity, accessor, column));
        }
    }

    Some(
        RustFile::new()
            .doc(format!("DAO for the `{}` table.", plan.table.name))
            .use_stmts(uses)
            .add(dao)
            .add(block)
            .render(),
    )
}

/// Planned accessors whose column type can be bound as a statement parameter.
fn usable_accessors<'a>(
    ctx: &EmitContext<'_>,
    plan: &TablePlan<'a>,
    sink: &mut DiagnosticSink,
) -> Vec<GeneratedAccessor<'a>> {
    plan_accessors(plan.table, ctx.naming)
        .into_iter()
        .filter(|accessor| {
            let bindable = plan
                .column(&accessor.column.name)
                .is_some_and(|c| matches!(c.classification, Classification::Classified(_)));
            if !bindable {
                sink.push(
                    Diagnostic::info(
                        "dao",
                        format!(
                            "Column {} of table {} has no SQL mapping, skipping {}",
                            accessor.column.name, plan.table.name, accessor.method_name
                        ),
                    )
                    .table(&plan.table.name)
                    .column(&accessor.column.name),
                );
            }
            bindable
        })
        .collect()
}

fn crud_methods(entity: &str, id: &str) -> Vec<Fn> {
    let ids = format!("Vec<{}>", id);
    let one = format!("DaoResult<Option<{}>>", entity);
    let many = format!("DaoResult<Vec<{}>>", entity);
    let entity_ref = format!("&{}", entity);

    vec![
        Fn::new("find_by_id")
            .async_()
            .param(Param::receiver("&self"))
            .param(Param::new("id", id))
            .returns(&one)
            .body_line("self.dao.find_by_id(id).await"),
        Fn::new("find_many_by_ids")
            .async_()
            .param(Param::receiver("&self"))
            .param(Param::new("ids", ids))
            .returns(&many)
            .body_line("self.dao.find_many_by_ids(ids).await"),
        Fn::new("find_all")
            .async_()
            .param(Param::receiver("&self"))
            .returns(&many)
            .body_line("self.dao.find_all().await"),
        Fn::new("exists_by_id")
            .async_()
            .param(Param::receiver("&self"))
            .param(Param::new("id", id))
            .returns("DaoResult<bool>")
            .body_line("self.dao.exists_by_id(id).await"),
        Fn::new("count")
            .async_()
            .param(Param::receiver("&self"))
            .returns("DaoResult<u64>")
            .body_line("self.dao.count().await"),
        Fn::new("insert")
            .async_()
            .param(Param::receiver("&self"))
            .param(Param::new("entity", &entity_ref))
            .returns("DaoResult<u64>")
            .body_line("self.dao.insert(entity).await"),
        Fn::new("insert_returning_id")
            .async_()
            .param(Param::receiver("&self"))
            .param(Param::new("entity", &entity_ref))
            .returns(format!("DaoResult<{}>", id))
            .body_line("self.dao.insert_returning_id(entity).await"),
        Fn::new("insert_many")
            .async_()
            .param(Param::receiver("&self"))
            .param(Param::new("entities", format!("&[{}]", entity)))
            .returns("DaoResult<u64>")
            .body_line("self.dao.insert_many(entities).await"),
        Fn::new("update")
            .async_()
            .param(Param::receiver("&self"))
            .param(Param::new("entity", &entity_ref))
            .returns("DaoResult<u64>")
            .body_line("self.dao.update(entity).await"),
        Fn::new("delete_by_id")
            .async_()
            .param(Param::receiver("&self"))
            .param(Param::new("id", id))
            .returns("DaoResult<u64>")
            .body_line("self.dao.delete_by_id(id).await"),
        Fn::new("delete_by_ids")
            .async_()
            .param(Param::receiver("&self"))
            .param(Param::new("ids", format!("Vec<{}>", id)))
            .returns("DaoResult<u64>")
            .body_line("self.dao.delete_by_ids(ids).await"),
    ]
}

fn accessor_method(entity: &str, accessor: &GeneratedAccessor<'_>, column: &ColumnPlan<'_>) -> Fn {
    let name = column.column_literal();
    let method = Fn::new(&accessor.method_name)
        .async_()
        .param(Param::receiver("&self"));

    match accessor.cardinality {
        Cardinality::One => method
            .doc(format!(
                "The row whose `{}` equals `value`; more than one match is an error.",
                column.column.name
            ))
            .param(Param::new(accessor.param_name(), &column.ty))
            .returns(format!("DaoResult<Option<{}>>", entity))
            .body_line(format!(
                "self.dao.find_one_by(Condition::eq({}, value)).await",
                name
            )),
        Cardinality::Many => method
            .doc(format!(
                "Rows whose `{}` is one of `values`; empty `values` match nothing.",
                column.column.name
            ))
            .param(Param::new(accessor.param_name(), format!("Vec<{}>", column.ty)))
            .returns(format!("DaoResult<Vec<{}>>", entity))
            .body_line(format!(
                "self.dao.find_many_by(Condition::is_in({}, values)).await",
                name
            )),
    }
}
