//! Lightweight parsing environment.

use std::{collections::HashMap, fs, path::Path};

use tracing::debug;

use crate::{AstFactory, BraceMatcher, Error, Language, ParsedUnit, ParserDefinition, Result};

/// The kind of context hosting the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvironmentKind {
    /// Minimal, non-interactive context for batch parsing.
    Light,
    /// A full interactive context (editor integration).
    Full,
}

/// Hosting context for grammar parsing.
///
/// Holds language-support extensions keyed by [`Language`]. Extensions are
/// registered once, up front, and then shared by every parse.
pub struct Environment {
    kind: EnvironmentKind,
    ast_factories: HashMap<Language, Box<dyn AstFactory>>,
    brace_matchers: HashMap<Language, Box<dyn BraceMatcher>>,
}

impl Environment {
    /// Create an empty environment of the given kind.
    pub fn new(kind: EnvironmentKind) -> Self {
        Self {
            kind,
            ast_factories: HashMap::new(),
            brace_matchers: HashMap::new(),
        }
    }

    /// Create an empty lightweight environment.
    pub fn light() -> Self {
        Self::new(EnvironmentKind::Light)
    }

    pub fn kind(&self) -> EnvironmentKind {
        self.kind
    }

    /// Register the AST factory for a language, replacing any previous one.
    pub fn register_ast_factory(
        &mut self,
        language: Language,
        factory: impl AstFactory + 'static,
    ) -> &mut Self {
        if self
            .ast_factories
            .insert(language, Box::new(factory))
            .is_some()
        {
            debug!(%language, "replaced AST factory");
        }
        self
    }

    /// Register the brace matcher for a language, replacing any previous one.
    pub fn register_brace_matcher(
        &mut self,
        language: Language,
        matcher: impl BraceMatcher + 'static,
    ) -> &mut Self {
        if self
            .brace_matchers
            .insert(language, Box::new(matcher))
            .is_some()
        {
            debug!(%language, "replaced brace matcher");
        }
        self
    }

    pub fn ast_factory(&self, language: Language) -> Option<&dyn AstFactory> {
        self.ast_factories.get(&language).map(|f| f.as_ref())
    }

    pub fn brace_matcher(&self, language: Language) -> Option<&dyn BraceMatcher> {
        self.brace_matchers.get(&language).map(|m| m.as_ref())
    }

    /// Parse in-memory text as a file called `name`.
    pub fn parse_text(
        &self,
        name: &str,
        text: &str,
        definition: &dyn ParserDefinition,
    ) -> ParsedUnit {
        let extension = Path::new(name)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        if extension != definition.file_extension() {
            return ParsedUnit::Other {
                name: name.to_string(),
                kind: extension.to_string(),
            };
        }

        debug!(name, language = %definition.language(), "parsing");
        definition.parse(name, text, self)
    }

    /// Read and parse a file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read. Parse failures are
    /// not errors; they come back as [`ParsedUnit::Failed`].
    pub fn parse_file(
        &self,
        path: &Path,
        definition: &dyn ParserDefinition,
    ) -> Result<ParsedUnit> {
        let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let name = path.display().to_string();
        Ok(self.parse_text(&name, &text, definition))
    }
}

impl std::fmt::Debug for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Environment")
            .field("kind", &self.kind)
            .field("ast_factories", &self.ast_factories.keys().collect::<Vec<_>>())
            .field("brace_matchers", &self.brace_matchers.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::light()
    }
}
