//! Generate command report.

use std::path::PathBuf;

use super::output::{Output, Report};

/// One artifact written during the run.
#[derive(Debug)]
pub struct GeneratedArtifact {
    pub name: String,
    pub path: PathBuf,
}

/// Result of `gramgen generate`.
#[derive(Debug)]
pub struct GenerateReport {
    pub out_dir: PathBuf,
    pub grammars: usize,
    pub rounds: usize,
    pub artifacts: Vec<GeneratedArtifact>,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl GenerateReport {
    /// Whether no error was reported.
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }
}

impl Report for GenerateReport {
    fn render(&self, out: &mut dyn Output) {
        for error in &self.errors {
            out.error(error);
        }
        for warning in &self.warnings {
            out.warning(warning);
        }

        out.key_value("Grammars", &self.grammars.to_string());
        out.key_value("Rounds", &self.rounds.to_string());
        out.key_value("Output", &self.out_dir.display().to_string());

        if self.artifacts.is_empty() {
            out.preformatted("No new artifacts.");
        } else {
            out.newline();
            out.section("Generated");
            for artifact in &self.artifacts {
                out.added_item(&format!("{} ({})", artifact.name, artifact.path.display()));
            }
        }
    }
}
