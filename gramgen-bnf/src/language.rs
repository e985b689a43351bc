//! Languages, parser definitions and parse results.

use std::fmt;

use crate::{
    Environment, Error, GrammarFile, SourceContext,
    lexer::tokenize,
    parser::{Parser, check_braces},
};

/// Identifies a language for keyed extension lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Language {
    id: &'static str,
}

impl Language {
    /// The grammar-description language.
    pub const BNF: Language = Language::new("BNF");

    pub const fn new(id: &'static str) -> Self {
        Self { id }
    }

    pub fn id(&self) -> &'static str {
        self.id
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id)
    }
}

/// Result of parsing one file through the environment.
#[derive(Debug)]
pub enum ParsedUnit {
    /// A valid grammar file.
    Grammar(GrammarFile),
    /// A file of some other kind, identified by its extension.
    Other { name: String, kind: String },
    /// The file is of the right kind but could not be parsed.
    Failed(Box<Error>),
}

impl ParsedUnit {
    /// Check whether this unit is a valid grammar file.
    pub fn is_grammar(&self) -> bool {
        matches!(self, ParsedUnit::Grammar(_))
    }

    /// Take the grammar out of this unit, if it is one.
    pub fn into_grammar(self) -> Option<GrammarFile> {
        match self {
            ParsedUnit::Grammar(grammar) => Some(grammar),
            _ => None,
        }
    }

    /// The parse failure, if parsing failed.
    pub fn error(&self) -> Option<&Error> {
        match self {
            ParsedUnit::Failed(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

/// Knows how to parse files of one language.
pub trait ParserDefinition: Send + Sync {
    /// The language this definition parses.
    fn language(&self) -> Language;

    /// File extension without the dot (e.g. `bnf`).
    fn file_extension(&self) -> &str;

    /// Parse `text`, using the extensions registered in `env`.
    fn parse(&self, name: &str, text: &str, env: &Environment) -> ParsedUnit;
}

/// Parser definition for `.bnf` grammar files.
#[derive(Debug, Default, Clone, Copy)]
pub struct BnfParserDefinition;

impl ParserDefinition for BnfParserDefinition {
    fn language(&self) -> Language {
        Language::BNF
    }

    fn file_extension(&self) -> &str {
        "bnf"
    }

    fn parse(&self, name: &str, text: &str, env: &Environment) -> ParsedUnit {
        let language = self.language();
        let Some(factory) = env.ast_factory(language) else {
            return ParsedUnit::Failed(Box::new(Error::NoAstFactory { language }));
        };

        let ctx = SourceContext::new(text, name);
        let parsed = tokenize(text, &ctx).and_then(|tokens| {
            if let Some(matcher) = env.brace_matcher(language) {
                check_braces(&tokens, matcher, &ctx)?;
            }
            Parser::new(&tokens, &ctx, factory).parse_file(name.to_string())
        });

        match parsed {
            Ok(grammar) => ParsedUnit::Grammar(grammar),
            Err(err) => ParsedUnit::Failed(err),
        }
    }
}
