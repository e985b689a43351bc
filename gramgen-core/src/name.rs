//! Logical artifact names.

use std::{fmt, path::PathBuf, str::FromStr};

use crate::{is_identifier, is_keyword, to_snake_case};

const SEPARATOR: &str = "::";

/// Why a string is not a usable logical name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NameError {
    #[error("artifact name is empty")]
    Empty,
    #[error("invalid artifact name '{name}': empty segment")]
    EmptySegment { name: String },
    #[error("invalid artifact name '{name}': '{segment}' is a reserved word")]
    Keyword { name: String, segment: String },
    #[error("invalid artifact name '{name}': '{segment}' is not an identifier")]
    InvalidSegment { name: String, segment: String },
}

/// The fully-qualified name a generated unit is known by in the host build.
///
/// Names are `::`-separated paths such as `demo::json::JsonParser`. The last
/// segment is the simple name; everything before it is the module path.
/// Every segment is a non-keyword Rust identifier, so a name always maps to a
/// relative path below an output root.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LogicalName(String);

impl LogicalName {
    /// Parse a logical name, trimming surrounding whitespace.
    pub fn parse(name: &str) -> Result<Self, NameError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(NameError::Empty);
        }
        for segment in trimmed.split(SEPARATOR) {
            if segment.is_empty() {
                return Err(NameError::EmptySegment {
                    name: trimmed.to_string(),
                });
            }
            if is_keyword(segment) {
                return Err(NameError::Keyword {
                    name: trimmed.to_string(),
                    segment: segment.to_string(),
                });
            }
            if !is_identifier(segment) {
                return Err(NameError::InvalidSegment {
                    name: trimmed.to_string(),
                    segment: segment.to_string(),
                });
            }
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Get the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Iterate over the `::`-separated segments.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split(SEPARATOR)
    }

    /// The last segment (e.g. `JsonParser`).
    pub fn simple_name(&self) -> &str {
        self.0.rsplit(SEPARATOR).next().unwrap_or(&self.0)
    }

    /// Everything before the last segment, if any (e.g. `demo::json`).
    pub fn module_path(&self) -> Option<&str> {
        self.0.rsplit_once(SEPARATOR).map(|(module, _)| module)
    }

    /// A name in the same module with a different simple name.
    pub fn sibling(&self, simple_name: &str) -> Result<Self, NameError> {
        match self.module_path() {
            Some(module) => Self::parse(&format!("{module}{SEPARATOR}{simple_name}")),
            None => Self::parse(simple_name),
        }
    }

    /// Source file path relative to an output root.
    ///
    /// `demo::json::JsonParser` maps to `demo/json/json_parser.rs`.
    pub fn relative_path(&self) -> PathBuf {
        let mut path = PathBuf::new();
        let mut segments = self.segments().peekable();
        while let Some(segment) = segments.next() {
            if segments.peek().is_some() {
                path.push(segment);
            } else {
                path.push(format!("{}.rs", to_snake_case(segment)));
            }
        }
        path
    }
}

impl fmt::Display for LogicalName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for LogicalName {
    type Err = NameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for LogicalName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
