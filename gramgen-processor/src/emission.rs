//! Per-artifact output routing.

use std::{
    io::{self, Write},
    path::Path,
};

use tracing::debug;

/// The host's artifact index and output system.
pub trait ArtifactStore {
    /// Whether an artifact with this logical name already exists among the
    /// host's inputs or was created earlier in the run.
    fn contains(&self, name: &str) -> bool;

    /// Open a writer for a new artifact.
    ///
    /// From this call on, [`contains`](ArtifactStore::contains) reports the
    /// name as known.
    fn create(&mut self, name: &str) -> io::Result<Box<dyn Write>>;

    /// Names created since the last call, in creation order.
    fn take_created(&mut self) -> Vec<String>;
}

impl<T: ArtifactStore + ?Sized> ArtifactStore for &mut T {
    fn contains(&self, name: &str) -> bool {
        (**self).contains(name)
    }

    fn create(&mut self, name: &str) -> io::Result<Box<dyn Write>> {
        (**self).create(name)
    }

    fn take_created(&mut self) -> Vec<String> {
        (**self).take_created()
    }
}

/// What to do with one artifact request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmissionDecision {
    /// The name is new: write a real artifact.
    Write,
    /// The name is taken: accept the text and drop it.
    Discard,
}

/// Writer handed to the generator for one artifact.
pub enum OutputSink {
    Artifact(Box<dyn Write>),
    Discard(io::Sink),
}

impl OutputSink {
    pub fn decision(&self) -> EmissionDecision {
        match self {
            OutputSink::Artifact(_) => EmissionDecision::Write,
            OutputSink::Discard(_) => EmissionDecision::Discard,
        }
    }
}

impl Write for OutputSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            OutputSink::Artifact(w) => w.write(buf),
            OutputSink::Discard(w) => w.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            OutputSink::Artifact(w) => w.flush(),
            OutputSink::Discard(w) => w.flush(),
        }
    }
}

impl std::fmt::Debug for OutputSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("OutputSink").field(&self.decision()).finish()
    }
}

/// Decides, per request, whether generated text reaches the store.
///
/// Every request is checked against the store afresh. Nothing is cached, so
/// a name created by an earlier request is seen as known by the next one.
pub struct EmissionStrategy<'a> {
    store: &'a mut dyn ArtifactStore,
}

impl<'a> EmissionStrategy<'a> {
    pub fn new(store: &'a mut dyn ArtifactStore) -> Self {
        Self { store }
    }

    pub fn decide(&self, name: &str) -> EmissionDecision {
        if self.store.contains(name) {
            EmissionDecision::Discard
        } else {
            EmissionDecision::Write
        }
    }

    /// Open the sink for `name`.
    ///
    /// # Errors
    ///
    /// Returns the store's error if a new artifact cannot be created.
    pub fn open(&mut self, name: &str, suggested: &Path) -> io::Result<OutputSink> {
        let decision = self.decide(name);
        debug!(artifact = name, suggested = %suggested.display(), ?decision, "emission decision");
        match decision {
            EmissionDecision::Write => self.store.create(name).map(OutputSink::Artifact),
            EmissionDecision::Discard => Ok(OutputSink::Discard(io::sink())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MemoryStore;

    #[test]
    fn test_unknown_name_writes_through() {
        let mut store = MemoryStore::new();
        let mut strategy = EmissionStrategy::new(&mut store);

        let mut sink = strategy.open("demo::Parser", Path::new("gen/demo/parser.rs")).unwrap();
        assert_eq!(sink.decision(), EmissionDecision::Write);
        sink.write_all(b"pub struct Parser;").unwrap();
        sink.flush().unwrap();

        assert_eq!(store.contents("demo::Parser").as_deref(), Some("pub struct Parser;"));
    }

    #[test]
    fn test_known_name_discards() {
        let mut store = MemoryStore::with_known(["demo::Parser"]);
        let mut strategy = EmissionStrategy::new(&mut store);

        let mut sink = strategy.open("demo::Parser", Path::new("parser.rs")).unwrap();
        assert_eq!(sink.decision(), EmissionDecision::Discard);
        sink.write_all(b"ignored").unwrap();

        assert_eq!(store.contents("demo::Parser"), None);
        assert!(store.created_names().is_empty());
    }

    #[test]
    fn test_decision_is_not_cached() {
        let mut store = MemoryStore::new();
        let mut strategy = EmissionStrategy::new(&mut store);

        assert_eq!(strategy.decide("demo::Types"), EmissionDecision::Write);
        let first = strategy.open("demo::Types", Path::new("types.rs")).unwrap();
        assert_eq!(first.decision(), EmissionDecision::Write);

        assert_eq!(strategy.decide("demo::Types"), EmissionDecision::Discard);
        let second = strategy.open("demo::Types", Path::new("types.rs")).unwrap();
        assert_eq!(second.decision(), EmissionDecision::Discard);
    }

    #[test]
    fn test_create_failure_propagates() {
        let mut store = MemoryStore::new().fail_create("demo::Parser");
        let mut strategy = EmissionStrategy::new(&mut store);

        let err = strategy.open("demo::Parser", Path::new("parser.rs")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);
    }
}
