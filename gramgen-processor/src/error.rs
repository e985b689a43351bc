use std::{error::Error as _, io, path::PathBuf};

use thiserror::Error;

/// Result type for processing a single grammar.
pub type Result<T> = std::result::Result<T, Error>;

/// Why one grammar was abandoned.
///
/// None of these escape a round; the driver turns each into an ERROR
/// diagnostic and moves on to the next grammar.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to resolve directory '{}'", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Grammar(#[from] Box<gramgen_bnf::Error>),

    #[error("Not a grammar file: {}{}", .path.display(), reason_suffix(.reason))]
    NotAGrammar {
        path: PathBuf,
        reason: Option<String>,
    },

    #[error(transparent)]
    Generate(#[from] gramgen_codegen::Error),
}

fn reason_suffix(reason: &Option<String>) -> String {
    reason.as_ref().map(|r| format!(" ({r})")).unwrap_or_default()
}

impl Error {
    /// The message with its chain of causes, joined by `": "`.
    pub fn describe(&self) -> String {
        let mut text = self.to_string();
        let mut source = self.source();
        while let Some(cause) = source {
            text.push_str(": ");
            text.push_str(&cause.to_string());
            source = cause.source();
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_includes_cause() {
        let err = Error::from(gramgen_codegen::Error::Open {
            name: "demo::JsonParser".to_string(),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "read-only"),
        });
        insta::assert_snapshot!(
            err.describe(),
            @"failed to open output for demo::JsonParser: read-only"
        );
    }

    #[test]
    fn test_not_a_grammar_message() {
        let err = Error::NotAGrammar {
            path: PathBuf::from("/work/notes.txt"),
            reason: None,
        };
        assert_eq!(err.describe(), "Not a grammar file: /work/notes.txt");

        let err = Error::NotAGrammar {
            path: PathBuf::from("/work/bad.bnf"),
            reason: Some("unexpected end of file".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "Not a grammar file: /work/bad.bnf (unexpected end of file)"
        );
    }
}
