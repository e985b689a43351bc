use std::{
    io::{self, BufWriter, Write},
    path::PathBuf,
};

use gramgen_core::{LogicalName, create_file};
use indexmap::IndexSet;
use tracing::debug;

use crate::ArtifactStore;

/// Artifact store backed by the filesystem.
///
/// An artifact is known when a source file for its name exists under one of
/// the source roots, or when it was created during this run. New artifacts
/// are written to `out_dir` at their name's relative path, so
/// `demo::json::JsonParser` lands in `<out_dir>/demo/json/json_parser.rs`.
#[derive(Debug, Clone)]
pub struct FsArtifactStore {
    out_dir: PathBuf,
    source_roots: Vec<PathBuf>,
    created: IndexSet<String>,
    fresh: Vec<String>,
}

impl FsArtifactStore {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
            source_roots: Vec::new(),
            created: IndexSet::new(),
            fresh: Vec::new(),
        }
    }

    /// Add a directory of hand-written sources to the index.
    pub fn source_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.source_roots.push(root.into());
        self
    }

    /// Where the artifact `name` is written.
    ///
    /// # Errors
    ///
    /// Returns [`io::ErrorKind::InvalidInput`] if `name` is not a valid
    /// logical name.
    pub fn path_of(&self, name: &str) -> io::Result<PathBuf> {
        Ok(self.out_dir.join(relative_path(name)?))
    }

}

impl ArtifactStore for FsArtifactStore {
    fn contains(&self, name: &str) -> bool {
        if self.created.contains(name) {
            return true;
        }
        let Ok(relative) = relative_path(name) else {
            return false;
        };
        self.source_roots
            .iter()
            .any(|root| root.join(&relative).is_file())
    }

    fn create(&mut self, name: &str) -> io::Result<Box<dyn Write>> {
        if self.created.contains(name) {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("artifact {name} was already created"),
            ));
        }
        let path = self.path_of(name)?;
        let file = create_file(&path)?;
        debug!(artifact = name, path = %path.display(), "created artifact");

        self.created.insert(name.to_string());
        self.fresh.push(name.to_string());
        Ok(Box::new(BufWriter::new(file)))
    }

    fn take_created(&mut self) -> Vec<String> {
        std::mem::take(&mut self.fresh)
    }
}

/// Relative path of `name`, rejecting names that could leave the output root.
fn relative_path(name: &str) -> io::Result<PathBuf> {
    LogicalName::parse(name)
        .map(|name| name.relative_path())
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err))
}
