//! Collection load report: per-file errors and warnings.

use std::collections::BTreeMap;
use std::fmt;

use owo_colors::OwoColorize;

use crate::utils::plural_s;

/// Findings of a collection load, grouped by source file.
#[derive(Debug, Default)]
pub struct CollectionReport {
    /// Entries rejected by the loader.
    pub errors: BTreeMap<String, Vec<String>>,
    /// Entries accepted with findings (unknown keys, schema drift).
    pub warnings: BTreeMap<String, Vec<String>>,
}

impl CollectionReport {
    pub fn add_error(&mut self, source: impl Into<String>, message: impl Into<String>) {
        self.errors
            .entry(source.into())
            .or_default()
            .push(message.into());
    }

    pub fn add_warning(&mut self, source: impl Into<String>, message: impl Into<String>) {
        self.warnings
            .entry(source.into())
            .or_default()
            .push(message.into());
    }

    pub fn error_count(&self) -> usize {
        self.errors.values().map(Vec::len).sum()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings.values().map(Vec::len).sum()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }

    /// Print the full report to stderr (errors -> warnings).
    pub fn print(&self) {
        Self::print_section("errors", &self.errors, true);
        Self::print_section("warnings", &self.warnings, false);
    }

    fn print_section(name: &str, findings: &BTreeMap<String, Vec<String>>, is_error: bool) {
        if findings.is_empty() {
            return;
        }
        eprintln!();

        let file_count = findings.len();
        let count: usize = findings.values().map(Vec::len).sum();
        let header = format!(
            "({file_count} file{}, {count} finding{})",
            plural_s(file_count),
            plural_s(count)
        );

        if is_error {
            eprintln!("{} {}", name.red().bold(), header.dimmed());
        } else {
            eprintln!("{} {}", name.yellow().bold(), header.dimmed());
        }

        for (path, messages) in findings {
            eprintln!("{}{}{}", "[".dimmed(), path.cyan(), "]".dimmed());
            for message in messages {
                if is_error {
                    eprintln!("{} {}", "→".red(), message);
                } else {
                    eprintln!("{} {}", "→".yellow(), message);
                }
            }
        }
    }
}

impl fmt::Display for CollectionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let errors = self.error_count();
        let warnings = self.warning_count();

        match (errors, warnings) {
            (0, 0) => write!(f, "{}", "all entries valid".green()),
            (0, w) => write!(
                f,
                "{}",
                format!("all entries valid, {w} warning{}", plural_s(w)).yellow()
            ),
            (e, w) => write!(
                f,
                "{}",
                format!(
                    "{e} error{}, {w} warning{}",
                    plural_s(e),
                    plural_s(w)
                )
                .red()
            ),
        }
    }
}
