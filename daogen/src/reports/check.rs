//! Check command report.

use std::path::PathBuf;

use daogen_codegen::Diagnostic;

use super::output::{Output, Report};
use super::render_diagnostics;

/// A schema that parsed, plus what generation would skip.
///
/// Skipped columns and tables never fail the check.
#[derive(Debug)]
pub struct CheckReport {
    pub schema_path: PathBuf,
    pub tables: usize,
    pub enums: usize,
    pub diagnostics: Vec<Diagnostic>,
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        render_diagnostics(&self.diagnostics, out);
        if !self.diagnostics.is_empty() {
            out.newline();
        }

        out.preformatted(&format!("✓ {} is valid", self.schema_path.display()));
        out.preformatted(&format!(
            "  {} table{}, {} enum{}",
            self.tables,
            if self.tables == 1 { "" } else { "s" },
            self.enums,
            if self.enums == 1 { "" } else { "s" }
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::testing::RecordingOutput;

    #[test]
    fn test_warnings_go_to_stderr() {
        let report = CheckReport {
            schema_path: PathBuf::from("daogen.toml"),
            tables: 1,
            enums: 0,
            diagnostics: vec![
                Diagnostic::warning("classify", "Omitting unrecognized type uuid::Uuid")
                    .table("account")
                    .column("external_id"),
                Diagnostic::info("dao", "Table log has no primary key, skipping DAO generation")
                    .table("log"),
            ],
        };
        let mut out = RecordingOutput::default();
        report.render(&mut out);

        assert_eq!(
            out.lines,
            vec![
                "!warning: Omitting unrecognized type uuid::Uuid",
                "!  --> account.external_id",
                "info: Table log has no primary key, skipping DAO generation",
                "  --> log",
                "",
                "✓ daogen.toml is valid",
                "  1 table, 0 enums",
            ]
        );
    }

    #[test]
    fn test_clean_schema_has_no_diagnostic_block() {
        let report = CheckReport {
            schema_path: PathBuf::from("daogen.toml"),
            tables: 2,
            enums: 1,
            diagnostics: Vec::new(),
        };
        let mut out = RecordingOutput::default();
        report.render(&mut out);
        assert_eq!(
            out.lines,
            vec!["✓ daogen.toml is valid", "  2 tables, 1 enum"]
        );
    }
}
