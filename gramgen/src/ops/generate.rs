//! Generate operation: run the processor over a filesystem host.

use std::{collections::HashMap, path::PathBuf};

use gramgen_processor::{
    Diagnostic, GRAMMARS_OPTION, PATH_SEPARATOR, ProcessingEnv, Processor, Severity,
    host::{FsArtifactStore, run_rounds},
};
use tracing::debug;

use crate::reports::{GenerateReport, GeneratedArtifact};

/// Everything `generate` needs, after config and flags are merged.
#[derive(Debug)]
pub struct GenerateOptions {
    pub options: HashMap<String, String>,
    pub out_dir: PathBuf,
    pub source_roots: Vec<PathBuf>,
    pub max_rounds: usize,
}

impl GenerateOptions {
    /// Set the `grammars` option from a list of paths.
    pub fn set_grammars(&mut self, grammars: &[PathBuf]) {
        let value = grammars
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(&PATH_SEPARATOR.to_string());
        self.options.insert(GRAMMARS_OPTION.to_string(), value);
    }
}

/// Execute the generate operation.
pub fn generate(opts: GenerateOptions) -> GenerateReport {
    let store = opts
        .source_roots
        .iter()
        .fold(FsArtifactStore::new(&opts.out_dir), |store, root| {
            store.source_root(root)
        });

    let mut env = ProcessingEnv::new(Vec::<Diagnostic>::new(), store);
    env.options = opts.options;
    debug!(options = ?env.options, "starting processor");

    let mut processor = Processor::builder(env).init();
    let grammars = processor.queue().len();
    let summary = run_rounds(&mut processor, opts.max_rounds);
    let env = processor.into_env();

    let artifacts = summary
        .created
        .into_iter()
        .filter_map(|name| {
            let path = env.store.path_of(&name).ok()?;
            Some(GeneratedArtifact { path, name })
        })
        .collect();

    let (errors, warnings): (Vec<_>, Vec<_>) = env
        .sink
        .into_iter()
        .partition(|d| d.severity == Severity::Error);

    GenerateReport {
        out_dir: opts.out_dir,
        grammars,
        rounds: summary.rounds,
        artifacts,
        errors: errors.into_iter().map(|d| d.message).collect(),
        warnings: warnings.into_iter().map(|d| d.message).collect(),
    }
}
