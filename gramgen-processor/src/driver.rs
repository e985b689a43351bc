//! The generation driver.

use std::{
    fs,
    io::{self, Write},
    path::Path,
};

use gramgen_bnf::{Environment, ParsedUnit, ParserDefinition};
use gramgen_codegen::{OutputHost, ParserGenerator};
use tracing::{debug, info};

use crate::{
    ArtifactStore, DiagnosticSink, EmissionDecision, EmissionStrategy, Error, Processor, Reporter,
    Result,
};

impl<S: DiagnosticSink, A: ArtifactStore> Processor<S, A> {
    /// Run one round: drain the queue, attempting each grammar once.
    ///
    /// A grammar leaves the queue when its attempt starts and is never
    /// retried. Failures are reported as errors and the next grammar is
    /// tried. Returns `false`; the processor never claims a round's inputs.
    pub fn run_round(&mut self) -> bool {
        let Self {
            env,
            environment,
            definition,
            queue,
        } = self;

        while let Some(path) = queue.pop() {
            debug!(path = %path.display(), remaining = queue.len(), "processing grammar");
            let result = process_one(
                &path,
                environment,
                &**definition,
                &mut env.sink,
                &mut env.store,
            );
            match result {
                Ok(outputs) => {
                    for (artifact, decision) in &outputs {
                        match decision {
                            EmissionDecision::Write => {
                                info!(grammar = %path.display(), %artifact, "generated");
                            }
                            EmissionDecision::Discard => {
                                debug!(grammar = %path.display(), %artifact, "already known, discarded");
                            }
                        }
                    }
                }
                Err(err) => Reporter::new(&mut env.sink).report_error(&err.describe()),
            }
        }
        false
    }
}

/// Generate one grammar, returning each requested artifact with the
/// decision that was made for it.
fn process_one(
    path: &Path,
    environment: &Environment,
    definition: &dyn ParserDefinition,
    sink: &mut dyn DiagnosticSink,
    store: &mut dyn ArtifactStore,
) -> Result<Vec<(String, EmissionDecision)>> {
    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let base_dir = fs::canonicalize(parent).map_err(|source| Error::Io {
        path: parent.to_path_buf(),
        source,
    })?;

    let grammar = match environment.parse_file(path, definition)? {
        ParsedUnit::Grammar(grammar) => grammar,
        unit => {
            return Err(Error::NotAGrammar {
                path: fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf()),
                reason: unit.error().map(ToString::to_string),
            });
        }
    };

    let mut host = GenerationHost {
        strategy: EmissionStrategy::new(store),
        reporter: Reporter::new(sink),
        outputs: Vec::new(),
    };
    ParserGenerator::new(&grammar, base_dir, "", "", &mut host).generate()?;
    Ok(host.outputs)
}

/// Binds the generator's callbacks to the emission strategy and reporter.
struct GenerationHost<'a> {
    strategy: EmissionStrategy<'a>,
    reporter: Reporter<'a>,
    outputs: Vec<(String, EmissionDecision)>,
}

impl OutputHost for GenerationHost<'_> {
    fn open_output(
        &mut self,
        logical_name: &str,
        suggested: &Path,
    ) -> io::Result<Box<dyn Write + '_>> {
        let sink = self.strategy.open(logical_name, suggested)?;
        self.outputs.push((logical_name.to_string(), sink.decision()));
        Ok(Box::new(sink))
    }

    fn add_warning(&mut self, text: &str) {
        self.reporter.report_warning(text);
    }
}
