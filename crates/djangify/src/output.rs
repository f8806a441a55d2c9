//! Colored terminal output for conversion runs.

use std::path::Path;

use console::{Style, Term};
use djangify_convert::{BatchReport, FailedFile};

/// Width of the setting labels printed before a run.
const LABEL_WIDTH: usize = 10;

/// Terminal output formatter.
pub(crate) struct Output {
    term: Term,
    green: Style,
    yellow: Style,
    red: Style,
    cyan_bold: Style,
}

impl Output {
    /// Create a new output formatter writing to stderr.
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            green: Style::new().green(),
            yellow: Style::new().yellow(),
            red: Style::new().red(),
            cyan_bold: Style::new().cyan().bold(),
        }
    }

    /// Print a run setting as an aligned `label : value` line.
    pub(crate) fn setting(&self, label: &str, value: &str) {
        let _ = self
            .term
            .write_line(&format!("{label:<LABEL_WIDTH$}: {value}"));
    }

    /// Report a generated file (green), relative to `base_dir` when possible.
    pub(crate) fn generated(&self, output: &Path, base_dir: &Path) {
        let shown = output.strip_prefix(base_dir).unwrap_or(output);
        let msg = format!("Generated {}", shown.display());
        let _ = self.term.write_line(&self.green.apply_to(msg).to_string());
    }

    /// Report a file that could not be converted (red).
    pub(crate) fn failed(&self, failed: &FailedFile) {
        self.error(&format!("Error: {}", failed.error));
    }

    /// Print a warning message (yellow).
    pub(crate) fn warning(&self, msg: &str) {
        let _ = self.term.write_line(&self.yellow.apply_to(msg).to_string());
    }

    /// Print an error message (red).
    pub(crate) fn error(&self, msg: &str) {
        let _ = self.term.write_line(&self.red.apply_to(msg).to_string());
    }

    /// Print the closing summary of a batch (cyan bold).
    pub(crate) fn summary(&self, report: &BatchReport) {
        let total = report.converted.len() + report.failed.len();
        let msg = format!(
            "Converted {} of {total} file(s), {} reference(s) rewritten",
            report.converted.len(),
            report.substitutions()
        );
        let _ = self
            .term
            .write_line(&self.cyan_bold.apply_to(msg).to_string());
    }
}
