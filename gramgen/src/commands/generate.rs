use std::{collections::HashMap, path::PathBuf};

use clap::Args;
use eyre::Result;
use gramgen_processor::{GRAMMARS_OPTION, split_grammar_paths};

use crate::{
    config::{CONFIG_FILE, GramgenToml},
    ops::{self, GenerateOptions},
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct GenerateCommand {
    /// Path to gramgen.toml (defaults to ./gramgen.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Grammar files, joined with the platform path separator
    #[arg(short, long)]
    pub grammars: Option<String>,

    /// Processor option as key=value (repeatable)
    #[arg(short = 'A', value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub options: Vec<(String, String)>,

    /// Output directory for generated files
    #[arg(short, long)]
    pub out_dir: Option<PathBuf>,

    /// Directory of hand-written sources (repeatable)
    #[arg(short, long = "source-root")]
    pub source_roots: Vec<PathBuf>,

    /// Limit on rounds that create artifacts
    #[arg(long)]
    pub max_rounds: Option<usize>,
}

impl GenerateCommand {
    /// Run the generate command
    pub fn run(&self) -> Result<()> {
        let report = ops::generate(self.options()?);
        report.render(&mut TerminalOutput::new());

        if !report.is_success() {
            std::process::exit(1);
        }
        Ok(())
    }

    /// Merge the config file with command-line flags; flags win.
    fn options(&self) -> Result<GenerateOptions> {
        let config = match &self.config {
            Some(path) => GramgenToml::open(path)?,
            None => {
                let default = PathBuf::from(CONFIG_FILE);
                if default.is_file() {
                    GramgenToml::open(&default)?
                } else {
                    GramgenToml::default()
                }
            }
        };
        let processor = config.processor;

        let mut opts = GenerateOptions {
            options: HashMap::new(),
            out_dir: self.out_dir.clone().unwrap_or(processor.out_dir),
            source_roots: if self.source_roots.is_empty() {
                processor.source_roots
            } else {
                self.source_roots.clone()
            },
            max_rounds: self.max_rounds.unwrap_or(processor.max_rounds),
        };
        opts.set_grammars(&processor.grammars);
        opts.options.extend(self.options.iter().cloned());
        if let Some(grammars) = &self.grammars {
            opts.set_grammars(&split_grammar_paths(grammars));
        }

        tracing::debug!(grammars = ?opts.options.get(GRAMMARS_OPTION), "merged options");
        Ok(opts)
    }
}

fn parse_key_value(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{s}'"))?;
    if key.is_empty() {
        return Err(format!("missing key in '{s}'"));
    }
    Ok((key.to_string(), value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_key_value() {
        assert_eq!(
            parse_key_value("grammars=a.bnf").unwrap(),
            ("grammars".to_string(), "a.bnf".to_string())
        );
        assert_eq!(
            parse_key_value("debug=").unwrap(),
            ("debug".to_string(), String::new())
        );
        assert!(parse_key_value("grammars").is_err());
        assert!(parse_key_value("=x").is_err());
    }
}
