//! Report data structures for commands.
//!
//! Commands build reports, then render them to an [`Output`] target.

mod check;
mod generate;
mod output;

pub use check::{CheckReport, FileCheck};
pub use generate::{GenerateReport, GeneratedArtifact};
pub use output::{Report, TerminalOutput};

#[cfg(test)]
pub use output::StringOutput;
