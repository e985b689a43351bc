use std::io;

use gramgen_core::NameError;
use thiserror::Error;

/// Result type for code generation.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid {what}")]
    InvalidName {
        what: String,
        #[source]
        source: NameError,
    },

    #[error("failed to open output for {name}")]
    Open {
        name: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {name}")]
    Write {
        name: String,
        #[source]
        source: io::Error,
    },
}
