//! Running the processor from a build script.
//!
//! ```ignore
//! // build.rs
//! fn main() {
//!     gramgen_processor::cargo::compile_grammars(["grammars/json.bnf"]).unwrap();
//! }
//! ```
//!
//! Generated files land in `$OUT_DIR/gramgen`; include them with
//! `include!(concat!(env!("OUT_DIR"), "/gramgen/demo/json/json_parser.rs"))`.

use std::{
    env,
    io::{self, Write},
    path::{Path, PathBuf},
};

use thiserror::Error;

use crate::{
    Diagnostic, DiagnosticSink, GRAMMARS_OPTION, PATH_SEPARATOR, ProcessingEnv, Processor,
    host::{DEFAULT_MAX_ROUNDS, FsArtifactStore, RoundSummary, run_rounds},
};

/// Why a build script run failed.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("environment variable {0} is not set; not running under cargo?")]
    MissingEnv(&'static str),

    #[error("{count} grammar error(s) reported")]
    Reported { count: usize },

    #[error("failed to write build script output")]
    Io(#[from] io::Error),
}

/// Sink printing diagnostics as cargo build script directives.
///
/// The first failed write is kept; see [`CargoSink::take_write_error`].
#[derive(Debug)]
pub struct CargoSink<W> {
    out: W,
    errors: usize,
    warnings: usize,
    write_error: Option<io::Error>,
}

impl<W: Write> CargoSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            errors: 0,
            warnings: 0,
            write_error: None,
        }
    }

    /// The first error hit while printing a diagnostic, if any.
    pub fn take_write_error(&mut self) -> Option<io::Error> {
        self.write_error.take()
    }

    pub fn errors(&self) -> usize {
        self.errors
    }

    pub fn warnings(&self) -> usize {
        self.warnings
    }
}

impl<W: Write> DiagnosticSink for CargoSink<W> {
    fn emit(&mut self, diagnostic: Diagnostic) {
        if diagnostic.severity.is_error() {
            self.errors += 1;
        } else {
            self.warnings += 1;
        }
        if let Err(err) = writeln!(self.out, "cargo:warning={diagnostic}")
            && self.write_error.is_none()
        {
            self.write_error = Some(err);
        }
    }
}

/// Generate parsers for `grammars` into `$OUT_DIR/gramgen`.
///
/// Relative grammar paths resolve against `CARGO_MANIFEST_DIR`, whose `src`
/// directory is the source root: a hand-written module for a generated name
/// suppresses that artifact.
///
/// # Errors
///
/// Fails if cargo's environment is missing, stdout cannot be written or any
/// grammar reported an error.
pub fn compile_grammars<I, P>(grammars: I) -> Result<RoundSummary, BuildError>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let manifest_dir = var_path("CARGO_MANIFEST_DIR")?;
    let out_dir = var_path("OUT_DIR")?.join("gramgen");

    let paths: Vec<PathBuf> = grammars
        .into_iter()
        .map(|p| manifest_dir.join(p))
        .collect();
    let store = FsArtifactStore::new(out_dir).source_root(manifest_dir.join("src"));
    compile_with(&paths, store, io::stdout())
}

fn compile_with<W: Write>(
    paths: &[PathBuf],
    store: FsArtifactStore,
    mut out: W,
) -> Result<RoundSummary, BuildError> {
    for path in paths {
        writeln!(out, "cargo:rerun-if-changed={}", path.display())?;
    }

    let grammars = paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(&PATH_SEPARATOR.to_string());
    let env = ProcessingEnv::new(CargoSink::new(out), store).option(GRAMMARS_OPTION, grammars);
    let mut processor = Processor::builder(env).init();
    let summary = run_rounds(&mut processor, DEFAULT_MAX_ROUNDS);

    if let Some(err) = processor.sink_mut().take_write_error() {
        return Err(err.into());
    }
    match processor.sink().errors() {
        0 => Ok(summary),
        count => Err(BuildError::Reported { count }),
    }
}

fn var_path(key: &'static str) -> Result<PathBuf, BuildError> {
    env::var_os(key)
        .map(PathBuf::from)
        .ok_or(BuildError::MissingEnv(key))
}
