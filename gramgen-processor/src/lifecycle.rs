//! One-time processor initialization.

use std::collections::HashMap;

use gramgen_bnf::{
    BnfAstFactory, BnfBraceMatcher, BnfParserDefinition, Environment, EnvironmentKind,
    ParserDefinition,
};
use tracing::debug;

use crate::{ArtifactStore, DiagnosticSink, GRAMMARS_OPTION, GrammarQueue, Reporter};

/// Reported when the parsing environment fails its self-check.
pub const INIT_FAILED: &str = "Grammar parser failed to initialize";

/// What the host hands the processor: options, a diagnostic sink and an
/// artifact store.
#[derive(Debug)]
pub struct ProcessingEnv<S, A> {
    pub options: HashMap<String, String>,
    pub sink: S,
    pub store: A,
}

impl<S, A> ProcessingEnv<S, A> {
    pub fn new(sink: S, store: A) -> Self {
        Self {
            options: HashMap::new(),
            sink,
            store,
        }
    }

    /// Set an option.
    pub fn option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }
}

/// Configures a [`Processor`] before its one-time initialization.
///
/// # Example
///
/// ```ignore
/// let env = ProcessingEnv::new(sink, store).option("grammars", "json.bnf");
/// let mut processor = Processor::builder(env).init();
/// processor.run_round();
/// ```
pub struct ProcessorBuilder<S, A> {
    env: ProcessingEnv<S, A>,
    environment: Option<Environment>,
    definition: Option<Box<dyn ParserDefinition>>,
}

impl<S: DiagnosticSink, A: ArtifactStore> ProcessorBuilder<S, A> {
    /// Use `environment` instead of a fresh lightweight one.
    pub fn environment(mut self, environment: Environment) -> Self {
        self.environment = Some(environment);
        self
    }

    /// Use `definition` instead of [`BnfParserDefinition`].
    pub fn parser_definition(mut self, definition: impl ParserDefinition + 'static) -> Self {
        self.definition = Some(Box::new(definition));
        self
    }

    /// Initialize the processor.
    ///
    /// Fills the queue from the `grammars` option, registers the grammar
    /// language's extensions and smoke-parses an empty grammar. A failed
    /// self-check is reported as an error; the processor is returned anyway.
    pub fn init(self) -> Processor<S, A> {
        let Self {
            mut env,
            environment,
            definition,
        } = self;
        let definition = definition.unwrap_or_else(|| Box::new(BnfParserDefinition));
        let mut environment = environment.unwrap_or_else(Environment::light);

        let queue = env
            .options
            .get(GRAMMARS_OPTION)
            .map(|value| GrammarQueue::from_option(value))
            .unwrap_or_default();
        debug!(grammars = ?queue.pending().collect::<Vec<_>>(), "initializing processor");

        let language = definition.language();
        environment
            .register_ast_factory(language, BnfAstFactory)
            .register_brace_matcher(language, BnfBraceMatcher);

        let smoke_name = format!("test.{}", definition.file_extension());
        let unit = environment.parse_text(&smoke_name, "", definition.as_ref());
        if !unit.is_grammar() || environment.kind() != EnvironmentKind::Light {
            debug!(kind = ?environment.kind(), error = ?unit.error(), "self-check failed");
            Reporter::new(&mut env.sink).report_error(INIT_FAILED);
        }

        Processor {
            env,
            environment,
            definition,
            queue,
        }
    }
}

/// Drains configured grammars through the parser generator, one round at a
/// time. See [`Processor::run_round`].
pub struct Processor<S, A> {
    pub(crate) env: ProcessingEnv<S, A>,
    pub(crate) environment: Environment,
    pub(crate) definition: Box<dyn ParserDefinition>,
    pub(crate) queue: GrammarQueue,
}

impl<S: DiagnosticSink, A: ArtifactStore> Processor<S, A> {
    /// Start configuring a processor for `env`.
    pub fn builder(env: ProcessingEnv<S, A>) -> ProcessorBuilder<S, A> {
        ProcessorBuilder {
            env,
            environment: None,
            definition: None,
        }
    }
}

impl<S, A> Processor<S, A> {
    pub fn sink(&self) -> &S {
        &self.env.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.env.sink
    }

    pub fn store(&self) -> &A {
        &self.env.store
    }

    pub fn store_mut(&mut self) -> &mut A {
        &mut self.env.store
    }

    pub fn queue(&self) -> &GrammarQueue {
        &self.queue
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    /// Give the host its sink and store back.
    pub fn into_env(self) -> ProcessingEnv<S, A> {
        self.env
    }
}
