//! Report data structures for commands.
//!
//! Commands build reports, then render them to an [`Output`] target.

mod check;
mod generate;
mod output;

pub use check::CheckReport;
pub use generate::{GenerateReport, PreviewReport};
pub use output::{Output, Report, TerminalOutput};

use daogen_codegen::{Diagnostic, Severity};

/// Render generation diagnostics as `warning:` / `info:` lines with their location.
pub(crate) fn render_diagnostics(diagnostics: &[Diagnostic], out: &mut dyn Output) {
    for diagnostic in diagnostics {
        let line = format!("{}: {}", diagnostic.severity, diagnostic.message);
        match diagnostic.severity {
            Severity::Warning => out.warning(&line),
            Severity::Info => out.preformatted(&line),
        }
        if let Some(location) = diagnostic.location() {
            let location = format!("  --> {}", location);
            match diagnostic.severity {
                Severity::Warning => out.warning(&location),
                Severity::Info => out.preformatted(&location),
            }
        }
    }
}
