//! `gramgen.toml` loading.

use std::{
    fs,
    path::{Path, PathBuf},
};

use eyre::{Context, Result};
use gramgen_processor::host::DEFAULT_MAX_ROUNDS;
use serde::Deserialize;

/// Default config file name.
pub const CONFIG_FILE: &str = "gramgen.toml";

/// Contents of `gramgen.toml`.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GramgenToml {
    #[serde(default)]
    pub processor: ProcessorConfig,
}

/// The `[processor]` table.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProcessorConfig {
    /// Grammar files to process.
    #[serde(default)]
    pub grammars: Vec<PathBuf>,

    /// Where new artifacts are written.
    #[serde(default = "default_out_dir")]
    pub out_dir: PathBuf,

    /// Directories of hand-written sources.
    #[serde(default)]
    pub source_roots: Vec<PathBuf>,

    /// Limit on rounds that create artifacts.
    #[serde(default = "default_max_rounds")]
    pub max_rounds: usize,
}

fn default_out_dir() -> PathBuf {
    PathBuf::from("gen")
}

fn default_max_rounds() -> usize {
    DEFAULT_MAX_ROUNDS
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            grammars: Vec::new(),
            out_dir: default_out_dir(),
            source_roots: Vec::new(),
            max_rounds: default_max_rounds(),
        }
    }
}

impl GramgenToml {
    /// Load a config file, resolving its relative paths against the file's
    /// directory.
    pub fn open(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read {}", path.display()))?;
        let mut config = Self::parse(&text)
            .wrap_err_with(|| format!("Failed to parse {}", path.display()))?;

        let base = path.parent().unwrap_or(Path::new(""));
        config.processor.resolve(base);
        Ok(config)
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }
}

impl ProcessorConfig {
    fn resolve(&mut self, base: &Path) {
        for path in &mut self.grammars {
            *path = base.join(&*path);
        }
        for path in &mut self.source_roots {
            *path = base.join(&*path);
        }
        self.out_dir = base.join(&self.out_dir);
    }
}
