//! Parser source generation for gramgen.
//!
//! [`ParserGenerator`] turns a [`GrammarFile`](gramgen_bnf::GrammarFile) into
//! Rust source. It never touches the filesystem itself: every artifact is
//! requested from an [`OutputHost`], which decides where (and whether) the
//! text goes.
//!
//! # Module Organization
//!
//! - [`builder`] - Indentation-aware code building
//! - [`ParserGenerator`] - Grammar to parser source
//! - [`OutputHost`] - Output and warning callbacks

pub mod builder;
mod analysis;
mod error;
mod generator;
mod host;
mod render;

pub use error::{Error, Result};
pub use generator::{GenerateSummary, ParserGenerator};
pub use host::OutputHost;
