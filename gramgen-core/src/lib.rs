//! Core utilities and types for the gramgen parser generator.
//!
//! This crate provides the naming and filesystem helpers shared by the
//! grammar parser, the code generator and the processor.

mod file;
mod name;
mod utils;

// File operations
pub use file::create_file;
// Logical artifact names
pub use name::{LogicalName, NameError};
// String utilities
pub use utils::{is_identifier, is_keyword, to_pascal_case, to_snake_case};
