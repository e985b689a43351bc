//! Processing grammars across rounds through the public API.

use std::{
    fs,
    path::{Path, PathBuf},
};

use gramgen_bnf::{Environment, EnvironmentKind};
use gramgen_processor::{
    Diagnostic, GRAMMARS_OPTION, INIT_FAILED, PATH_SEPARATOR, ProcessingEnv, Processor, Severity,
    host::{FsArtifactStore, run_rounds},
    testing::{BrokenDefinition, MemoryStore, messages},
};
use tempfile::TempDir;

const EXPR: &str = r#"
{
    parserClass = "calc::ExprParser"
    elementTypeHolderClass = "calc::ExprTypes"
}
expr ::= term (('+' | '-') term)*
term ::= NUMBER | '(' expr ')'
"#;

const LIST: &str = r#"
// a comma separated list
{ parserClass = "demo::ListParser" }
list ::= '[' [ITEM (',' ITEM)*] ']'
private unused ::= ITEM
"#;

fn write(dir: &Path, name: &str, text: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, text).unwrap();
    path
}

fn joined(paths: &[&Path]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(&PATH_SEPARATOR.to_string())
}

fn processor(grammars: String, store: MemoryStore) -> Processor<Vec<Diagnostic>, MemoryStore> {
    let env = ProcessingEnv::new(Vec::new(), store).option(GRAMMARS_OPTION, grammars);
    Processor::builder(env).init()
}

#[test]
fn each_grammar_is_attempted_once() {
    let temp = TempDir::new().unwrap();
    let expr = write(temp.path(), "expr.bnf", EXPR);
    let list = write(temp.path(), "list.bnf", LIST);
    let config = format!(
        "{sep}{}{sep}  {sep}{}{sep}",
        expr.display(),
        list.display(),
        sep = PATH_SEPARATOR
    );

    let mut processor = processor(config, MemoryStore::new());
    assert_eq!(processor.queue().len(), 2);

    assert!(!processor.run_round());
    assert!(!processor.run_round());
    assert!(!processor.run_round());

    assert_eq!(processor.queue().popped(), 2);
    assert_eq!(
        processor.store().created_names(),
        vec!["calc::ExprTypes", "calc::ExprParser", "demo::Types", "demo::ListParser"]
    );
}

#[test]
fn duplicate_entries_are_processed_twice() {
    let temp = TempDir::new().unwrap();
    let list = write(temp.path(), "list.bnf", LIST);

    let mut processor = processor(joined(&[&list, &list]), MemoryStore::new());
    assert_eq!(processor.queue().len(), 2);

    assert!(!processor.run_round());

    assert_eq!(processor.queue().popped(), 2);
    assert!(processor.queue().is_empty());
    // The second attempt finds both artifacts known and discards its output.
    assert_eq!(processor.store().created_names(), vec!["demo::Types", "demo::ListParser"]);
    let warning = Diagnostic::warning("list.bnf: unused private rule 'unused'");
    assert_eq!(processor.sink(), &vec![warning.clone(), warning]);
}

#[test]
fn empty_configuration_does_nothing() {
    let mut processor = processor(String::new(), MemoryStore::new());

    for _ in 0..3 {
        assert!(!processor.run_round());
    }

    assert_eq!(processor.queue().popped(), 0);
    assert!(processor.sink().is_empty());
    assert!(processor.store().created_names().is_empty());
}

#[test]
fn new_artifacts_are_written() {
    let temp = TempDir::new().unwrap();
    let expr = write(temp.path(), "expr.bnf", EXPR);

    let mut processor = processor(joined(&[&expr]), MemoryStore::new());
    processor.run_round();

    assert!(processor.sink().is_empty(), "{:?}", processor.sink());
    let types = processor.store().contents("calc::ExprTypes").unwrap();
    assert!(types.contains("pub enum ElementType {\n    Expr,\n    Term,\n}"), "{types}");
    let parser = processor.store().contents("calc::ExprParser").unwrap();
    assert!(parser.contains("use crate::calc::expr_types::{ElementType, TokenType};"));
    assert!(parser.contains("pub fn parse_expr(b: &mut impl Builder) -> bool"));
}

#[test]
fn known_artifacts_are_discarded_but_warnings_survive() {
    let temp = TempDir::new().unwrap();
    let list = write(temp.path(), "list.bnf", LIST);

    let store = MemoryStore::with_known(["demo::ListParser"]);
    let mut processor = processor(joined(&[&list]), store);
    processor.run_round();

    assert_eq!(processor.store().created_names(), vec!["demo::Types"]);
    assert_eq!(processor.store().contents("demo::ListParser"), None);
    assert_eq!(
        processor.sink(),
        &vec![Diagnostic::warning("list.bnf: unused private rule 'unused'")]
    );
}

#[test]
fn malformed_grammar_is_isolated() {
    let temp = TempDir::new().unwrap();
    let a = write(temp.path(), "expr.bnf", EXPR);
    let bad = write(temp.path(), "broken.bnf", "list ::= (ITEM | ");
    let b = write(temp.path(), "list.bnf", LIST);

    let mut processor = processor(joined(&[&a, &bad, &b]), MemoryStore::new());
    processor.run_round();

    let created = processor.store().created_names();
    assert_eq!(
        created,
        vec!["calc::ExprTypes", "calc::ExprParser", "demo::Types", "demo::ListParser"]
    );

    let errors = messages(processor.sink(), Severity::Error);
    assert_eq!(errors.len(), 1);
    let canonical = fs::canonicalize(&bad).unwrap();
    assert!(
        errors[0].starts_with(&format!("Not a grammar file: {}", canonical.display())),
        "{}",
        errors[0]
    );

    // The error is reported before B's warnings.
    let position = |message: &str| processor.sink().iter().position(|d| d.message == message);
    let error_at = position(errors[0]).unwrap();
    let warning_at = position("list.bnf: unused private rule 'unused'").unwrap();
    assert!(error_at < warning_at);
}

#[test]
fn failed_initialization_is_not_fatal() {
    let temp = TempDir::new().unwrap();
    let expr = write(temp.path(), "expr.bnf", EXPR);

    let env = ProcessingEnv::new(Vec::new(), MemoryStore::new())
        .option(GRAMMARS_OPTION, joined(&[&expr]));
    let mut processor = Processor::builder(env)
        .parser_definition(BrokenDefinition)
        .init();

    assert_eq!(processor.sink(), &vec![Diagnostic::error(INIT_FAILED)]);

    assert!(!processor.run_round());
    let errors = messages(processor.sink(), Severity::Error);
    assert_eq!(errors.len(), 2);
    assert!(errors[1].starts_with("Not a grammar file:"), "{}", errors[1]);
    assert!(processor.queue().is_empty());
}

#[test]
fn full_environment_fails_self_check_but_still_generates() {
    let temp = TempDir::new().unwrap();
    let expr = write(temp.path(), "expr.bnf", EXPR);

    let env = ProcessingEnv::new(Vec::new(), MemoryStore::new())
        .option(GRAMMARS_OPTION, joined(&[&expr]));
    let mut processor = Processor::builder(env)
        .environment(Environment::new(EnvironmentKind::Full))
        .init();
    processor.run_round();

    assert_eq!(processor.sink(), &vec![Diagnostic::error(INIT_FAILED)]);
    assert_eq!(processor.store().created_names().len(), 2);
}

#[test]
fn filesystem_host_respects_source_roots() {
    let temp = TempDir::new().unwrap();
    let list = write(temp.path(), "list.bnf", LIST);
    let src = temp.path().join("src");
    fs::create_dir_all(src.join("demo")).unwrap();
    fs::write(src.join("demo/types.rs"), "// hand-written").unwrap();

    let store = FsArtifactStore::new(temp.path().join("gen")).source_root(&src);
    let env = ProcessingEnv::new(Vec::<Diagnostic>::new(), store)
        .option(GRAMMARS_OPTION, joined(&[&list]));
    let mut processor = Processor::builder(env).init();

    let summary = run_rounds(&mut processor, 8);

    assert_eq!(summary.rounds, 3);
    assert_eq!(summary.created, vec!["demo::ListParser"]);
    assert!(temp.path().join("gen/demo/list_parser.rs").is_file());
    assert!(!temp.path().join("gen/demo/types.rs").exists());
}

#[test]
fn path_like_names_never_leave_out_dir() {
    let temp = TempDir::new().unwrap();
    let out_dir = temp.path().join("a/b/gen");
    let escape = write(
        temp.path(),
        "escape.bnf",
        "{ parserClass = \"..::..::Up\" }\nlist ::= ITEM*\n",
    );
    let list = write(temp.path(), "list.bnf", LIST);

    let env = ProcessingEnv::new(Vec::<Diagnostic>::new(), FsArtifactStore::new(&out_dir))
        .option(GRAMMARS_OPTION, joined(&[&escape, &list]));
    let mut processor = Processor::builder(env).init();

    let summary = run_rounds(&mut processor, 8);

    assert_eq!(summary.created, vec!["demo::Types", "demo::ListParser"]);
    assert_eq!(
        messages(processor.sink(), Severity::Error),
        vec!["invalid parserClass attribute: invalid artifact name '..::..::Up': '..' is not an identifier"]
    );
    assert!(!temp.path().join("a/up.rs").exists());
    assert!(out_dir.join("demo/list_parser.rs").is_file());
}
