use std::path::PathBuf;

use clap::Args;
use daogen_codegen_rust::Generator;
use eyre::Result;

use super::open_schema;
use crate::reports::{CheckReport, Report, TerminalOutput};

#[derive(Args)]
pub struct CheckCommand {
    /// Path to the schema file
    #[arg(short, long, default_value = "daogen.toml")]
    pub schema: PathBuf,
}

impl CheckCommand {
    pub fn run(&self) -> Result<()> {
        let schema = open_schema(&self.schema);
        let report = CheckReport {
            schema_path: self.schema.clone(),
            tables: schema.tables.len(),
            enums: schema.enums.len(),
            diagnostics: Generator::new(&schema).diagnostics(),
        };
        report.render(&mut TerminalOutput::new());
        Ok(())
    }
}
