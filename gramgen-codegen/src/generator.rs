//! Grammar to parser source generation.

use std::{
    io::Write,
    path::{Path, PathBuf},
};

use gramgen_bnf::GrammarFile;
use gramgen_core::LogicalName;
use tracing::debug;

use crate::{
    Error, OutputHost, Result,
    analysis::Analysis,
    render::{RenderContext, render_parser, render_types},
};

/// Parser class used when the grammar has no `parserClass` attribute.
const DEFAULT_PARSER: &str = "GeneratedParser";
const DEFAULT_MODULE: &str = "generated";
const DEFAULT_GENERATE_DIR: &str = "gen";

const ATTR_PARSER: &str = "parserClass";
const ATTR_TYPES: &str = "elementTypeHolderClass";
const ATTR_GENERATE_DIR: &str = "generateDir";

/// Artifacts requested during one [`ParserGenerator::generate`] call.
#[derive(Debug, Default)]
pub struct GenerateSummary {
    /// Logical names in request order.
    pub artifacts: Vec<LogicalName>,
}

/// Generates parser sources for one grammar.
///
/// Output goes through the [`OutputHost`] given at construction: the
/// generator asks it for a writer per artifact and reports warnings to it.
///
/// # Example
///
/// ```ignore
/// let generator = ParserGenerator::new(&grammar, base_dir, "", "", &mut host);
/// let summary = generator.generate()?;
/// ```
pub struct ParserGenerator<'a> {
    grammar: &'a GrammarFile,
    base_dir: PathBuf,
    module_name: String,
    namespace: String,
    host: &'a mut dyn OutputHost,
}

impl<'a> ParserGenerator<'a> {
    /// Create a generator.
    ///
    /// `base_dir` is the grammar's directory, used to compute suggested
    /// output paths. `module_name` is shown in generated headers and
    /// `namespace` qualifies the default parser name; both may be empty.
    pub fn new(
        grammar: &'a GrammarFile,
        base_dir: impl Into<PathBuf>,
        module_name: impl Into<String>,
        namespace: impl Into<String>,
        host: &'a mut dyn OutputHost,
    ) -> Self {
        Self {
            grammar,
            base_dir: base_dir.into(),
            module_name: module_name.into(),
            namespace: namespace.into(),
            host,
        }
    }

    /// Generate the element types and parser for the grammar.
    ///
    /// # Errors
    ///
    /// Returns an error if the host cannot open an output or a write fails.
    /// Grammar problems are reported as warnings, never as errors.
    pub fn generate(mut self) -> Result<GenerateSummary> {
        let grammar = self.grammar;
        let file_name = Path::new(&grammar.name)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(&grammar.name)
            .to_string();
        let mut summary = GenerateSummary::default();

        if grammar.rules.is_empty() {
            self.host
                .add_warning(&format!("{file_name}: grammar has no rules, nothing to generate"));
            return Ok(summary);
        }

        let analysis = Analysis::new(grammar);
        self.warn_about(&file_name, &analysis);

        let parser = self.parser_name(&file_name)?;
        let types = match grammar.attribute(ATTR_TYPES) {
            Some(name) => attribute_name(ATTR_TYPES, name)?,
            None => parser.sibling("Types").map_err(|source| Error::InvalidName {
                what: format!("element types name derived from {parser}"),
                source,
            })?,
        };
        let generate_dir = self.base_dir.join(
            grammar
                .attribute(ATTR_GENERATE_DIR)
                .unwrap_or(DEFAULT_GENERATE_DIR),
        );

        let ctx = RenderContext {
            grammar_file: &file_name,
            module_name: &self.module_name,
            analysis: &analysis,
            parser: &parser,
            types: &types,
        };
        let types_text = render_types(&ctx);
        let parser_text = render_parser(&ctx);

        self.write_artifact(&types, &generate_dir, &types_text)?;
        summary.artifacts.push(types);
        self.write_artifact(&parser, &generate_dir, &parser_text)?;
        summary.artifacts.push(parser);

        Ok(summary)
    }

    fn parser_name(&mut self, file_name: &str) -> Result<LogicalName> {
        if let Some(name) = self.grammar.attribute(ATTR_PARSER) {
            return attribute_name(ATTR_PARSER, name);
        }

        let module = if self.namespace.is_empty() {
            DEFAULT_MODULE
        } else {
            self.namespace.as_str()
        };
        let name = LogicalName::parse(&format!("{module}::{DEFAULT_PARSER}")).map_err(|source| {
            Error::InvalidName {
                what: format!("namespace '{module}'"),
                source,
            }
        })?;
        self.host.add_warning(&format!(
            "{file_name}: no {ATTR_PARSER} attribute, generating {name}"
        ));
        Ok(name)
    }

    fn warn_about(&mut self, file_name: &str, analysis: &Analysis<'_>) {
        for rule in &analysis.duplicates {
            self.host.add_warning(&format!(
                "{file_name}: duplicate rule '{}', later definition ignored",
                rule.name
            ));
        }
        for (rule, reference) in &analysis.unresolved {
            self.host.add_warning(&format!(
                "{file_name}: unresolved reference '{reference}' in rule '{rule}'"
            ));
        }
        for rule in &analysis.unused_private {
            self.host
                .add_warning(&format!("{file_name}: unused private rule '{rule}'"));
        }
    }

    fn write_artifact(&mut self, name: &LogicalName, dir: &Path, text: &str) -> Result<()> {
        let suggested = dir.join(name.relative_path());
        debug!(artifact = %name, suggested = %suggested.display(), "opening output");

        let mut out = self
            .host
            .open_output(name.as_str(), &suggested)
            .map_err(|source| Error::Open {
                name: name.to_string(),
                source,
            })?;
        out.write_all(text.as_bytes())
            .and_then(|()| out.flush())
            .map_err(|source| Error::Write {
                name: name.to_string(),
                source,
            })
    }
}

fn attribute_name(attribute: &str, value: &str) -> Result<LogicalName> {
    LogicalName::parse(value).map_err(|source| Error::InvalidName {
        what: format!("{attribute} attribute"),
        source,
    })
}
