//! Module files tying the generated output together.

use daogen_codegen::CodeFragment;

use crate::rust_file::RustFile;

fn module_list<'m>(doc: &str, modules: impl IntoIterator<Item = &'m str>) -> String {
    modules
        .into_iter()
        .fold(RustFile::new().doc(doc), |file, module| {
            file.attach(CodeFragment::Line(format!("pub mod {};", module)))
        })
        .render()
}

/// Root `mod.rs`.
pub(crate) fn root_mod(has_enums: bool, has_daos: bool) -> String {
    let modules = [("daos", has_daos), ("enums", has_enums), ("tables", true)];
    module_list(
        "Generated entities and data access objects.",
        modules
            .into_iter()
            .filter_map(|(module, present)| present.then_some(module)),
    )
}

pub(crate) fn tables_mod(modules: &[String]) -> String {
    module_list("Entity types, one module per table.", modules.iter().map(String::as_str))
}

pub(crate) fn daos_mod(modules: &[String]) -> String {
    module_list(
        "DAOs for tables with a primary key.",
        modules.iter().map(String::as_str),
    )
}
