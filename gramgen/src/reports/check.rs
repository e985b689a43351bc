//! Check command report.

use std::path::PathBuf;

use super::output::{Output, Report};

/// Outcome for one checked file.
#[derive(Debug)]
pub enum FileCheck {
    Valid { path: PathBuf, rules: usize },
    /// Rendered failure, ready to print.
    Invalid { path: PathBuf, rendered: String },
}

/// Result of `gramgen check`.
#[derive(Debug, Default)]
pub struct CheckReport {
    pub files: Vec<FileCheck>,
}

impl CheckReport {
    pub fn is_valid(&self) -> bool {
        self.files
            .iter()
            .all(|f| matches!(f, FileCheck::Valid { .. }))
    }
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        for file in &self.files {
            match file {
                FileCheck::Valid { path, rules } => out.preformatted(&format!(
                    "✓ {} ({} rule{})",
                    path.display(),
                    rules,
                    if *rules == 1 { "" } else { "s" }
                )),
                FileCheck::Invalid { path, rendered } => {
                    out.error(&format!("{} is not a valid grammar", path.display()));
                    out.diagnostic(rendered);
                }
            }
        }
    }
}
