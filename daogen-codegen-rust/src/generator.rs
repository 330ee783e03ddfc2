use std::path::Path;

use daogen_codegen::{
    CustomTypeHandler, DefaultNaming, Diagnostic, DiagnosticSink, GenerateResult, KeyResolver,
    LanguageCodegen, NamingStrategy, PreviewFile, TypeClassifier,
};
use daogen_core::{File, FileRules, GeneratedFile, WriteResult};
use daogen_schema::SchemaDescriptor;
use eyre::Result;

use crate::emit::{
    EmitContext, dao_file, daos_mod, enums_file, root_mod, table_file, tables_mod,
};
use crate::type_mapper::RustTypeMapper;

/// Rust code generator producing entity types and DAOs.
///
/// Output is a module tree meant to be placed inside the application crate:
///
/// ```text
/// mod.rs
/// enums.rs
/// tables/mod.rs
/// tables/<table>.rs
/// daos/mod.rs
/// daos/<table>_dao.rs
/// ```
pub struct Generator<'a> {
    schema: &'a SchemaDescriptor,
    naming: &'a dyn NamingStrategy,
    custom: Option<&'a dyn CustomTypeHandler>,
}

/// Files and diagnostics of one generation run.
#[derive(Debug)]
pub struct Output {
    pub files: Vec<File>,
    pub diagnostics: Vec<Diagnostic>,
}

impl LanguageCodegen for Generator<'_> {
    fn language(&self) -> &'static str {
        "rust"
    }

    fn file_extension(&self) -> &'static str {
        "rs"
    }

    fn preview(&self) -> Vec<PreviewFile> {
        self.render()
            .files
            .iter()
            .map(|file| PreviewFile {
                path: file.path().display().to_string(),
                content: file.render_with_header(),
            })
            .collect()
    }

    fn generate(&self, output_dir: &Path) -> Result<GenerateResult> {
        let output = self.render();
        let mut result = GenerateResult {
            diagnostics: output.diagnostics,
            ..GenerateResult::default()
        };
        for file in &output.files {
            let path = file.path().display().to_string();
            match file.write(output_dir)? {
                WriteResult::Written => result.written.push(path),
                WriteResult::Skipped => result.skipped.push(path),
            }
        }
        Ok(result)
    }
}

impl<'a> Generator<'a> {
    pub fn new(schema: &'a SchemaDescriptor) -> Self {
        Self {
            schema,
            naming: &DefaultNaming,
            custom: None,
        }
    }

    pub fn with_naming(mut self, naming: &'a dyn NamingStrategy) -> Self {
        self.naming = naming;
        self
    }

    /// Let `handler` claim columns before the built-in classification rules.
    pub fn with_custom_handler(mut self, handler: &'a dyn CustomTypeHandler) -> Self {
        self.custom = Some(handler);
        self
    }

    fn context(&self) -> EmitContext<'a> {
        let config = &self.schema.config;
        let mut classifier = TypeClassifier::new(self.schema);
        if let Some(handler) = self.custom {
            classifier = classifier.with_custom_handler(handler);
        }
        EmitContext {
            schema: self.schema,
            config,
            naming: self.naming,
            types: RustTypeMapper::new(self.schema, self.naming),
            classifier,
            keys: KeyResolver::new(config.max_key_degree),
        }
    }

    /// Render every file in descriptor order, collecting diagnostics.
    pub fn render(&self) -> Output {
        let ctx = self.context();
        let mut sink = DiagnosticSink::new();
        let mut files = Vec::new();
        let generated = |path: String, content: String| {
            File::new(path, content).with_rules(FileRules::generated())
        };

        let has_enums = !self.schema.enums.is_empty();
        if has_enums {
            files.push(generated("enums.rs".to_string(), enums_file(&ctx)));
        }

        let plans: Vec<_> = self
            .schema
            .tables
            .iter()
            .map(|table| ctx.plan_table(table, &mut sink))
            .collect();

        for plan in &plans {
            files.push(generated(
                format!("tables/{}.rs", plan.module),
                table_file(&ctx, plan),
            ));
        }

        let mut dao_modules = Vec::new();
        if ctx.config.daos {
            for plan in &plans {
                if let Some(content) = dao_file(&ctx, plan, &mut sink) {
                    files.push(generated(format!("daos/{}.rs", plan.dao_module()), content));
                    dao_modules.push(plan.dao_module());
                }
            }
        }

        let table_modules: Vec<String> = plans.iter().map(|p| p.module.clone()).collect();
        files.push(generated("tables/mod.rs".to_string(), tables_mod(&table_modules)));
        let has_daos = !dao_modules.is_empty();
        if has_daos {
            files.push(generated("daos/mod.rs".to_string(), daos_mod(&dao_modules)));
        }
        files.push(generated("mod.rs".to_string(), root_mod(has_enums, has_daos)));

        Output {
            files,
            diagnostics: sink.into_records(),
        }
    }

    /// Diagnostics a run would record, without keeping the files.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.render().diagnostics
    }
}
