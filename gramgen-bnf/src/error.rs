use std::{io, path::PathBuf};

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::{Language, Span};

/// Result type for grammar operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// Source context for error reporting.
///
/// Holds the grammar text and its file name so error factories don't need
/// both passed at every call site.
#[derive(Debug, Clone)]
pub struct SourceContext {
    src: String,
    filename: String,
}

impl SourceContext {
    /// Create a new source context.
    pub fn new(src: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            filename: filename.into(),
        }
    }

    /// Get the source content.
    pub fn src(&self) -> &str {
        &self.src
    }

    /// Create a NamedSource for miette error reporting.
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.filename, self.src.clone())
    }

    /// Create a syntax error at a span.
    pub fn syntax_error(
        &self,
        found: impl Into<String>,
        expected: impl Into<String>,
        span: Span,
    ) -> Box<Error> {
        Box::new(Error::Syntax {
            src: self.named_source(),
            span: span.into(),
            found: found.into(),
            expected: expected.into(),
        })
    }

    /// Create an error for an unexpected character.
    pub fn unexpected_char(&self, ch: char, span: Span) -> Box<Error> {
        Box::new(Error::UnexpectedChar {
            src: self.named_source(),
            span: span.into(),
            ch,
        })
    }

    /// Create an error for a string literal without closing quote.
    pub fn unterminated_string(&self, span: Span) -> Box<Error> {
        Box::new(Error::UnterminatedString {
            src: self.named_source(),
            span: span.into(),
        })
    }

    /// Create an error for a block comment without `*/`.
    pub fn unterminated_comment(&self, span: Span) -> Box<Error> {
        Box::new(Error::UnterminatedComment {
            src: self.named_source(),
            span: span.into(),
        })
    }

    /// Create an error for an opening brace that is never closed.
    pub fn unclosed_brace(&self, open: char, span: Span) -> Box<Error> {
        Box::new(Error::UnclosedBrace {
            src: self.named_source(),
            span: span.into(),
            open,
        })
    }

    /// Create an error for a closing brace with nothing to close.
    pub fn unmatched_brace(&self, close: char, span: Span) -> Box<Error> {
        Box::new(Error::UnmatchedBrace {
            src: self.named_source(),
            span: span.into(),
            close,
        })
    }

    /// Create an error for a closing brace that doesn't match the open one.
    pub fn mismatched_brace(
        &self,
        open: char,
        open_span: Span,
        close: char,
        close_span: Span,
    ) -> Box<Error> {
        Box::new(Error::MismatchedBrace {
            src: self.named_source(),
            open_span: open_span.into(),
            close_span: close_span.into(),
            open,
            close,
        })
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{}'", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("unexpected {found}, expected {expected}")]
    #[diagnostic(code(bnf::syntax))]
    Syntax {
        #[source_code]
        src: NamedSource<String>,
        #[label("expected {expected}")]
        span: SourceSpan,
        found: String,
        expected: String,
    },

    #[error("unexpected character '{ch}'")]
    #[diagnostic(code(bnf::unexpected_char))]
    UnexpectedChar {
        #[source_code]
        src: NamedSource<String>,
        #[label("not valid here")]
        span: SourceSpan,
        ch: char,
    },

    #[error("unterminated string literal")]
    #[diagnostic(code(bnf::unterminated_string), help("close the literal with a matching quote"))]
    UnterminatedString {
        #[source_code]
        src: NamedSource<String>,
        #[label("literal starts here")]
        span: SourceSpan,
    },

    #[error("unterminated block comment")]
    #[diagnostic(code(bnf::unterminated_comment), help("close the comment with '*/'"))]
    UnterminatedComment {
        #[source_code]
        src: NamedSource<String>,
        #[label("comment starts here")]
        span: SourceSpan,
    },

    #[error("unclosed '{open}'")]
    #[diagnostic(code(bnf::unclosed_brace))]
    UnclosedBrace {
        #[source_code]
        src: NamedSource<String>,
        #[label("opened here")]
        span: SourceSpan,
        open: char,
    },

    #[error("unmatched '{close}'")]
    #[diagnostic(code(bnf::unmatched_brace))]
    UnmatchedBrace {
        #[source_code]
        src: NamedSource<String>,
        #[label("nothing to close")]
        span: SourceSpan,
        close: char,
    },

    #[error("'{open}' closed by '{close}'")]
    #[diagnostic(code(bnf::mismatched_brace))]
    MismatchedBrace {
        #[source_code]
        src: NamedSource<String>,
        #[label("opened here")]
        open_span: SourceSpan,
        #[label("closed here")]
        close_span: SourceSpan,
        open: char,
        close: char,
    },

    #[error("no AST factory registered for language {language}")]
    #[diagnostic(
        code(bnf::no_ast_factory),
        help("register one with `Environment::register_ast_factory`")
    )]
    NoAstFactory { language: Language },
}

impl Error {
    /// Create an I/O error for a grammar file.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Box<Self> {
        Box::new(Error::Io {
            path: path.into(),
            source,
        })
    }
}
