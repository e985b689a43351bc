//! In-memory host pieces for tests.
//!
//! Enabled under `cfg(test)` and by the `testing` feature.

use std::{
    cell::RefCell,
    collections::HashSet,
    io::{self, Write},
    rc::Rc,
};

use gramgen_bnf::{Environment, Error as BnfError, Language, ParsedUnit, ParserDefinition};
use indexmap::IndexMap;

use crate::{Diagnostic, Severity};

/// Artifact store that keeps created artifacts in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    known: HashSet<String>,
    created: IndexMap<String, SharedBuffer>,
    fresh: Vec<String>,
    fail_create: HashSet<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose index already holds `names`.
    pub fn with_known<I, N>(names: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<String>,
    {
        Self {
            known: names.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Make `create` fail for `name`.
    pub fn fail_create(mut self, name: impl Into<String>) -> Self {
        self.fail_create.insert(name.into());
        self
    }

    /// Text written to a created artifact.
    pub fn contents(&self, name: &str) -> Option<String> {
        self.created
            .get(name)
            .map(|buf| String::from_utf8_lossy(&buf.0.borrow()).into_owned())
    }

    /// Names of created artifacts, in creation order.
    pub fn created_names(&self) -> Vec<&str> {
        self.created.keys().map(String::as_str).collect()
    }
}

impl crate::ArtifactStore for MemoryStore {
    fn contains(&self, name: &str) -> bool {
        self.known.contains(name) || self.created.contains_key(name)
    }

    fn create(&mut self, name: &str) -> io::Result<Box<dyn Write>> {
        if self.fail_create.contains(name) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("cannot create {name}"),
            ));
        }
        let buffer = SharedBuffer::default();
        self.created.insert(name.to_string(), buffer.clone());
        self.fresh.push(name.to_string());
        Ok(Box::new(buffer))
    }

    fn take_created(&mut self) -> Vec<String> {
        std::mem::take(&mut self.fresh)
    }
}

#[derive(Debug, Default, Clone)]
struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Parser definition whose every parse fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct BrokenDefinition;

impl ParserDefinition for BrokenDefinition {
    fn language(&self) -> Language {
        Language::BNF
    }

    fn file_extension(&self) -> &str {
        "bnf"
    }

    fn parse(&self, _name: &str, _text: &str, _env: &Environment) -> ParsedUnit {
        ParsedUnit::Failed(Box::new(BnfError::NoAstFactory {
            language: self.language(),
        }))
    }
}

/// Messages of the diagnostics with the given severity, in order.
pub fn messages(diagnostics: &[Diagnostic], severity: Severity) -> Vec<&str> {
    diagnostics
        .iter()
        .filter(|d| d.severity == severity)
        .map(|d| d.message.as_str())
        .collect()
}
