//! Generate command reports.

use std::path::PathBuf;

use daogen_codegen::{Diagnostic, GenerateResult, PreviewFile};

use super::output::{Output, Report};
use super::render_diagnostics;

/// Files written by a generation run.
#[derive(Debug)]
pub struct GenerateReport {
    pub output_dir: PathBuf,
    pub result: GenerateResult,
}

impl Report for GenerateReport {
    fn render(&self, out: &mut dyn Output) {
        render_diagnostics(&self.result.diagnostics, out);
        if !self.result.diagnostics.is_empty() {
            out.newline();
        }

        out.section(&format!("Generated into {}", self.output_dir.display()));
        for path in &self.result.written {
            out.added_item(path);
        }

        if !self.result.skipped.is_empty() {
            out.newline();
            out.section("Skipped (already present)");
            for path in &self.result.skipped {
                out.list_item(path);
            }
        }
    }
}

/// Files a dry run would write.
#[derive(Debug)]
pub struct PreviewReport {
    pub files: Vec<PreviewFile>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Report for PreviewReport {
    fn render(&self, out: &mut dyn Output) {
        for file in &self.files {
            out.divider(&file.path);
            out.preformatted(&file.content);
        }

        out.divider("Summary");
        render_diagnostics(&self.diagnostics, out);
        out.preformatted(&format!("{} files would be generated", self.files.len()));
    }
}
