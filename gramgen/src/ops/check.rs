//! Check operation: parse grammars without generating.

use std::path::PathBuf;

use gramgen_bnf::{
    BnfAstFactory, BnfBraceMatcher, BnfParserDefinition, Environment, Language, ParsedUnit,
};

use crate::reports::{CheckReport, FileCheck};

/// Parse each file through a lightweight environment.
pub fn check(files: &[PathBuf]) -> CheckReport {
    let mut environment = Environment::light();
    environment
        .register_ast_factory(Language::BNF, BnfAstFactory)
        .register_brace_matcher(Language::BNF, BnfBraceMatcher);

    let files = files
        .iter()
        .map(|path| {
            let rendered = match environment.parse_file(path, &BnfParserDefinition) {
                Ok(ParsedUnit::Grammar(grammar)) => {
                    return FileCheck::Valid {
                        path: path.clone(),
                        rules: grammar.rules.len(),
                    };
                }
                Ok(ParsedUnit::Other { kind, .. }) => {
                    format!("not a .bnf file (extension '{kind}')")
                }
                Ok(ParsedUnit::Failed(err)) | Err(err) => {
                    format!("{:?}", miette::Report::new(*err))
                }
            };
            FileCheck::Invalid {
                path: path.clone(),
                rendered,
            }
        })
        .collect();

    CheckReport { files }
}
