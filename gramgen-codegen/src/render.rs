//! Source rendering for the generated element types and parser.

use gramgen_bnf::{Expr, Rule};
use gramgen_core::{LogicalName, is_identifier, is_keyword, to_pascal_case, to_snake_case};

use crate::{analysis::Analysis, builder::CodeBuilder};

/// Everything the renderers need about one generation run.
pub(crate) struct RenderContext<'a> {
    /// Grammar file name shown in headers (e.g. `json.bnf`).
    pub grammar_file: &'a str,
    pub module_name: &'a str,
    pub analysis: &'a Analysis<'a>,
    pub parser: &'a LogicalName,
    pub types: &'a LogicalName,
}

pub(crate) fn element_variant(rule: &str) -> String {
    variant_ident(to_pascal_case(rule))
}

pub(crate) fn token_variant(token: &str) -> String {
    variant_ident(to_pascal_case(&token.to_lowercase()))
}

/// Make a PascalCase name usable as an enum variant.
///
/// Keywords get a trailing `_` (`Self_`); names that are empty or start with
/// a digit after case conversion get a leading `V`.
fn variant_ident(name: String) -> String {
    if is_keyword(&name) {
        format!("{name}_")
    } else if is_identifier(&name) {
        name
    } else {
        format!("V{name}")
    }
}

fn parse_fn(rule: &str) -> String {
    format!("parse_{}", to_snake_case(rule))
}

/// `crate::`-rooted module path of a generated artifact.
fn module_of(name: &LogicalName) -> String {
    let mut path = vec!["crate".to_string()];
    path.extend(name.module_path().into_iter().flat_map(|m| m.split("::")).map(String::from));
    path.push(to_snake_case(name.simple_name()));
    path.join("::")
}

fn header(b: &mut CodeBuilder, ctx: &RenderContext<'_>) {
    b.push_comment(&format!(
        "This file is generated by gramgen from {}. Do not edit.",
        ctx.grammar_file
    ));
    if !ctx.module_name.is_empty() {
        b.push_comment(&format!("Module: {}", ctx.module_name));
    }
    b.push_blank();
}

/// Render the element-type holder: one variant per public rule and per token.
pub(crate) fn render_types(ctx: &RenderContext<'_>) -> String {
    let mut b = CodeBuilder::new();
    header(&mut b, ctx);

    let public: Vec<&Rule> = ctx
        .analysis
        .rules
        .values()
        .copied()
        .filter(|r| !r.private)
        .collect();

    b.push_doc(&format!(
        "Element types produced by `{}`.",
        ctx.parser.simple_name()
    ));
    b.push_line("#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]");
    b.push_block("pub enum ElementType", |b| {
        for rule in &public {
            b.push_line(&format!("{},", element_variant(&rule.name)));
        }
    });
    b.push_blank();

    b.push_doc("Token types referenced by the grammar.");
    b.push_line("#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]");
    b.push_block("pub enum TokenType", |b| {
        for token in &ctx.analysis.tokens {
            b.push_line(&format!("{},", token_variant(token)));
        }
    });
    b.push_blank();

    b.push_block("impl TokenType", |b| {
        b.push_doc("The token name as written in the grammar.");
        b.push_block("pub fn name(&self) -> &'static str", |b| {
            b.push_block("match *self", |b| {
                for token in &ctx.analysis.tokens {
                    b.push_line(&format!(
                        "TokenType::{} => {:?},",
                        token_variant(token),
                        token
                    ));
                }
            });
        });
    });

    b.build()
}

/// Render the parser: a `Builder` trait and one function per rule.
pub(crate) fn render_parser(ctx: &RenderContext<'_>) -> String {
    let mut b = CodeBuilder::new();
    header(&mut b, ctx);

    b.push_line(&format!(
        "use {}::{{ElementType, TokenType}};",
        module_of(ctx.types)
    ));
    b.push_blank();

    b.push_doc("Callbacks driven by the generated parser.");
    b.push_block("pub trait Builder", |b| {
        b.push_doc("Consume the next token if it has the given type.");
        b.push_line("fn consume(&mut self, token: TokenType) -> bool;");
        b.push_doc("Consume the next token if its text is `text`.");
        b.push_line("fn consume_text(&mut self, text: &str) -> bool;");
        b.push_doc("Current position in the token stream.");
        b.push_line("fn mark(&mut self) -> usize;");
        b.push_doc("Return to a position obtained from `mark`.");
        b.push_line("fn rollback(&mut self, mark: usize);");
        b.push_doc("Close a node of type `element` that started at `mark`.");
        b.push_line("fn done(&mut self, mark: usize, element: ElementType);");
    });
    b.push_blank();

    let simple = ctx.parser.simple_name();
    b.push_doc(&format!("Parser generated from `{}`.", ctx.grammar_file));
    b.push_line(&format!("pub struct {simple};"));
    b.push_blank();

    b.push_block(&format!("impl {simple}"), |b| {
        if let Some(root) = ctx.analysis.rules.values().next() {
            b.push_doc(&format!("Parse from the root rule `{}`.", root.name));
            b.push_block("pub fn parse(b: &mut impl Builder) -> bool", |b| {
                b.push_line(&format!("Self::{}(b)", parse_fn(&root.name)));
            });
        }

        for rule in ctx.analysis.rules.values() {
            b.push_blank();
            b.push_doc(&format!("`{} ::= {}`", rule.name, rule.expr));
            let signature = format!("pub fn {}(b: &mut impl Builder) -> bool", parse_fn(&rule.name));
            b.push_block(&signature, |b| {
                let body = render_expr(&rule.expr, ctx.analysis);
                if rule.private {
                    b.push_line(&body);
                } else {
                    b.push_line("let m = b.mark();");
                    b.push_line(&format!("let r = {body};"));
                    b.push_if_else(
                        "r",
                        |b| {
                            b.push_line(&format!(
                                "b.done(m, ElementType::{});",
                                element_variant(&rule.name)
                            ));
                        },
                        |b| {
                            b.push_line("b.rollback(m);");
                        },
                    );
                    b.push_line("r");
                }
            });
        }
    });

    b.build()
}

/// Render an expression as a boolean Rust expression over `b`.
fn render_expr(expr: &Expr, analysis: &Analysis<'_>) -> String {
    match expr {
        Expr::Reference(name) if analysis.is_defined(name) => {
            format!("Self::{}(b)", parse_fn(name))
        }
        // Already reported as unresolved; never matches.
        Expr::Reference(_) => "false".to_string(),
        Expr::Token(name) => format!("b.consume(TokenType::{})", token_variant(name)),
        Expr::Literal(text) => format!("b.consume_text({text:?})"),
        Expr::Sequence(items) => match items.as_slice() {
            [] => "true".to_string(),
            [single] => render_expr(single, analysis),
            _ => {
                let parts: Vec<String> = items.iter().map(|e| render_expr(e, analysis)).collect();
                format!(
                    "{{ let m = b.mark(); if {} {{ true }} else {{ b.rollback(m); false }} }}",
                    parts.join(" && ")
                )
            }
        },
        Expr::Choice(items) => {
            let parts: Vec<String> = items.iter().map(|e| render_expr(e, analysis)).collect();
            format!("({})", parts.join(" || "))
        }
        Expr::Optional(inner) => format!("{{ let _ = {}; true }}", render_expr(inner, analysis)),
        Expr::ZeroOrMore(inner) => render_repeat(inner, analysis),
        Expr::OneOrMore(inner) => format!(
            "({} && {})",
            render_expr(inner, analysis),
            render_repeat(inner, analysis)
        ),
    }
}

/// Repeat until the item fails or stops making progress.
fn render_repeat(inner: &Expr, analysis: &Analysis<'_>) -> String {
    format!(
        "{{ loop {{ let m = b.mark(); if !({}) || b.mark() == m {{ break; }} }} true }}",
        render_expr(inner, analysis)
    )
}

#[cfg(test)]
mod tests {
    use gramgen_bnf::GrammarFile;

    use super::*;

    fn analysis_of(grammar: &GrammarFile) -> Analysis<'_> {
        Analysis::new(grammar)
    }

    fn grammar(rules: Vec<(&str, bool, Expr)>) -> GrammarFile {
        GrammarFile {
            name: "test.bnf".into(),
            attributes: Default::default(),
            rules: rules
                .into_iter()
                .map(|(name, private, expr)| Rule {
                    name: name.into(),
                    private,
                    expr,
                    span: 0..0,
                })
                .collect(),
        }
    }

    #[test]
    fn test_variant_names() {
        assert_eq!(element_variant("json_value"), "JsonValue");
        assert_eq!(token_variant("NUMBER_LITERAL"), "NumberLiteral");
        assert_eq!(parse_fn("jsonValue"), "parse_json_value");
    }

    #[test]
    fn test_variant_names_avoid_keywords() {
        assert_eq!(element_variant("self"), "Self_");
        assert_eq!(token_variant("SELF"), "Self_");
        assert_eq!(token_variant("Self"), "Self_");
        assert_eq!(element_variant("_"), "V");
        assert_eq!(element_variant("_1st"), "V1st");
        assert_eq!(token_variant("TYPE"), "Type");
        assert_eq!(parse_fn("self"), "parse_self");
    }

    #[test]
    fn test_module_of() {
        assert_eq!(module_of(&LogicalName::parse("demo::json::Types").unwrap()), "crate::demo::json::types");
        assert_eq!(module_of(&LogicalName::parse("Types").unwrap()), "crate::types");
    }

    #[test]
    fn test_render_expr_shapes() {
        let g = grammar(vec![("root", false, Expr::Sequence(vec![]))]);
        let analysis = analysis_of(&g);

        assert_eq!(render_expr(&Expr::Sequence(vec![]), &analysis), "true");
        assert_eq!(render_expr(&Expr::Reference("root".into()), &analysis), "Self::parse_root(b)");
        assert_eq!(render_expr(&Expr::Reference("nope".into()), &analysis), "false");
        insta::assert_snapshot!(
            render_expr(&Expr::Choice(vec![Expr::Token("A".into()), Expr::Literal("{".into())]), &analysis),
            @r#"(b.consume(TokenType::A) || b.consume_text("{"))"#
        );
        insta::assert_snapshot!(
            render_expr(&Expr::Optional(Box::new(Expr::Token("A".into()))), &analysis),
            @"{ let _ = b.consume(TokenType::A); true }"
        );
    }

    #[test]
    fn test_render_types_skips_private_rules() {
        let g = grammar(vec![
            ("root", false, Expr::Token("NUMBER".into())),
            ("helper", true, Expr::Token("STRING".into())),
        ]);
        let analysis = analysis_of(&g);
        let parser = LogicalName::parse("demo::Parser").unwrap();
        let types = parser.sibling("Types").unwrap();
        let ctx = RenderContext {
            grammar_file: "test.bnf",
            module_name: "",
            analysis: &analysis,
            parser: &parser,
            types: &types,
        };

        let text = render_types(&ctx);
        assert!(text.starts_with("// This file is generated by gramgen from test.bnf."));
        assert!(text.contains("    Root,\n"));
        assert!(!text.contains("Helper"));
        assert!(text.contains("    Number,\n    String,\n"));
        assert!(text.contains("TokenType::Number => \"NUMBER\","));
    }

    #[test]
    fn test_render_parser_structure() {
        let g = grammar(vec![
            ("root", false, Expr::ZeroOrMore(Box::new(Expr::Reference("item".into())))),
            ("item", true, Expr::Token("NUMBER".into())),
        ]);
        let analysis = analysis_of(&g);
        let parser = LogicalName::parse("demo::NumParser").unwrap();
        let types = parser.sibling("NumTypes").unwrap();
        let ctx = RenderContext {
            grammar_file: "num.bnf",
            module_name: "numbers",
            analysis: &analysis,
            parser: &parser,
            types: &types,
        };

        let text = render_parser(&ctx);
        assert!(text.contains("// Module: numbers\n"));
        assert!(text.contains("use crate::demo::num_types::{ElementType, TokenType};"));
        assert!(text.contains("pub struct NumParser;"));
        assert!(text.contains("        Self::parse_root(b)\n"));
        assert!(text.contains("    /// `root ::= item*`\n"));
        assert!(text.contains("            b.done(m, ElementType::Root);\n"));
        assert!(text.contains("    pub fn parse_item(b: &mut impl Builder) -> bool {\n        b.consume(TokenType::Number)\n    }\n"));
    }
}
