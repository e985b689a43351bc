//! Round-based grammar processing for gramgen.
//!
//! A [`Processor`] is initialized once with a list of grammar files and is
//! then driven by its host in rounds. Each round drains the grammar queue:
//! every grammar is parsed, handed to the parser generator, and its outputs
//! are either written as new artifacts or discarded when the host already
//! has an artifact of that name. Failures never escape a round; they are
//! reported to the host's [`DiagnosticSink`].
//!
//! # Module Organization
//!
//! - [`Processor`] - Lifecycle (init) and the generation driver (rounds)
//! - [`GrammarQueue`] - Pending grammar files
//! - [`EmissionStrategy`] - Per-artifact write/discard decision
//! - [`Reporter`] - Diagnostics forwarding
//! - [`host`] - Filesystem artifact store and the round loop
//! - [`cargo`] - Entry point for build scripts
//! - [`testing`] - In-memory host pieces (feature-gated)

pub mod cargo;
mod diagnostic;
mod driver;
mod emission;
mod error;
pub mod host;
mod lifecycle;
mod options;
mod queue;
mod reporter;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use diagnostic::{Diagnostic, DiagnosticSink, Severity};
pub use emission::{ArtifactStore, EmissionDecision, EmissionStrategy, OutputSink};
pub use error::{Error, Result};
pub use lifecycle::{INIT_FAILED, ProcessingEnv, Processor, ProcessorBuilder};
pub use options::{GRAMMARS_OPTION, PATH_SEPARATOR, split_grammar_paths};
pub use queue::GrammarQueue;
pub use reporter::Reporter;
