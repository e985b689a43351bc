//! Running the processor outside a compiler.
//!
//! [`FsArtifactStore`] stands in for the compiler's artifact index and
//! filer, and [`run_rounds`] plays the compiler's round loop.

mod fs;
mod rounds;

pub use fs::FsArtifactStore;
pub use rounds::{DEFAULT_MAX_ROUNDS, RoundSummary, run_rounds};
