use std::path::PathBuf;

use clap::Args;
use daogen_codegen::LanguageCodegen;
use daogen_codegen_rust::Generator;
use eyre::{Context, Result};

use super::open_schema;
use crate::reports::{GenerateReport, PreviewReport, Report, TerminalOutput};

#[derive(Args)]
pub struct GenerateCommand {
    /// Path to the schema file
    #[arg(short, long, default_value = "daogen.toml")]
    pub schema: PathBuf,

    /// Directory receiving the generated module tree
    #[arg(short, long, default_value = "src/generated")]
    pub output: PathBuf,

    /// Preview generated code without writing to disk
    #[arg(long)]
    pub dry_run: bool,
}

impl GenerateCommand {
    pub fn run(&self) -> Result<()> {
        let schema = open_schema(&self.schema);
        let generator = Generator::new(&schema);
        let mut out = TerminalOutput::new();

        if self.dry_run {
            let report = PreviewReport {
                files: generator.preview(),
                diagnostics: generator.diagnostics(),
            };
            report.render(&mut out);
            return Ok(());
        }

        let result = generator
            .generate(&self.output)
            .wrap_err("Failed to generate code")?;
        GenerateReport {
            output_dir: self.output.clone(),
            result,
        }
        .render(&mut out);
        Ok(())
    }
}
