//! BNF grammar parsing for gramgen.
//!
//! This crate provides the grammar-description language and a lightweight
//! parsing environment that hosts it outside of any editor:
//!
//! - [`Environment`] - hosting context with keyed extension registration
//! - [`BnfParserDefinition`] - parser for `.bnf` files
//! - [`GrammarFile`] - the grammar AST
//! - [`ParsedUnit`] - result of parsing a file (grammar, other kind, failure)

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod ast;
mod environment;
mod error;
mod extensions;
mod language;
mod lexer;
mod parser;

pub use ast::{Expr, GrammarFile, Rule, Span};
pub use environment::{Environment, EnvironmentKind};
pub use error::{Error, Result, SourceContext};
pub use extensions::{AstFactory, BnfAstFactory, BnfBraceMatcher, BracePair, BraceMatcher};
pub use language::{BnfParserDefinition, Language, ParsedUnit, ParserDefinition};
