//! Processor options.

use std::path::PathBuf;

/// Option holding the grammar files to process.
pub const GRAMMARS_OPTION: &str = "grammars";

/// Separator between entries of a path list on this platform.
#[cfg(windows)]
pub const PATH_SEPARATOR: char = ';';
/// Separator between entries of a path list on this platform.
#[cfg(not(windows))]
pub const PATH_SEPARATOR: char = ':';

/// Split a [`PATH_SEPARATOR`]-joined list of grammar paths.
///
/// Blank and whitespace-only entries are dropped; everything else is kept
/// as written, in order, duplicates included.
pub fn split_grammar_paths(value: &str) -> Vec<PathBuf> {
    value
        .split(PATH_SEPARATOR)
        .filter(|entry| !entry.trim().is_empty())
        .map(PathBuf::from)
        .collect()
}
