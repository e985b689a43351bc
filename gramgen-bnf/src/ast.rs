//! Grammar AST.

use std::fmt;

use indexmap::IndexMap;

/// Byte range into the grammar text.
pub type Span = std::ops::Range<usize>;

/// A parsed grammar file.
#[derive(Debug, Clone, PartialEq)]
pub struct GrammarFile {
    /// File name the grammar was parsed from (e.g. `json.bnf`).
    pub name: String,
    /// Global attributes from `{ key = "value" }` blocks, in source order.
    pub attributes: IndexMap<String, String>,
    /// Rules in source order.
    pub rules: Vec<Rule>,
}

impl GrammarFile {
    /// Look up a global attribute.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Find the first rule with the given name.
    pub fn rule(&self, name: &str) -> Option<&Rule> {
        self.rules.iter().find(|r| r.name == name)
    }

    /// The first rule, which is the grammar's root.
    pub fn root(&self) -> Option<&Rule> {
        self.rules.first()
    }
}

/// A single `name ::= expression` rule.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub name: String,
    /// Private rules produce no element type of their own.
    pub private: bool,
    pub expr: Expr,
    pub span: Span,
}

/// Right-hand side of a rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// `a | b | c`
    Choice(Vec<Expr>),
    /// `a b c` (empty matches nothing and always succeeds)
    Sequence(Vec<Expr>),
    /// `[a]` or `a?`
    Optional(Box<Expr>),
    /// `a*`
    ZeroOrMore(Box<Expr>),
    /// `a+`
    OneOrMore(Box<Expr>),
    /// Reference to another rule.
    Reference(String),
    /// Named token such as `STRING`.
    Token(String),
    /// Quoted literal such as `'{'`.
    Literal(String),
}

impl Expr {
    /// Visit every rule reference in this expression, depth first.
    pub fn for_each_reference<'a>(&'a self, f: &mut impl FnMut(&'a str)) {
        match self {
            Expr::Choice(items) | Expr::Sequence(items) => {
                for item in items {
                    item.for_each_reference(f);
                }
            }
            Expr::Optional(inner) | Expr::ZeroOrMore(inner) | Expr::OneOrMore(inner) => {
                inner.for_each_reference(f)
            }
            Expr::Reference(name) => f(name),
            Expr::Token(_) | Expr::Literal(_) => {}
        }
    }

    /// Visit every named token in this expression, depth first.
    pub fn for_each_token<'a>(&'a self, f: &mut impl FnMut(&'a str)) {
        match self {
            Expr::Choice(items) | Expr::Sequence(items) => {
                for item in items {
                    item.for_each_token(f);
                }
            }
            Expr::Optional(inner) | Expr::ZeroOrMore(inner) | Expr::OneOrMore(inner) => {
                inner.for_each_token(f)
            }
            Expr::Token(name) => f(name),
            Expr::Reference(_) | Expr::Literal(_) => {}
        }
    }
}

/// Prints the expression back in grammar syntax.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Choice(items) => write_joined(f, items, " | ", |e| matches!(e, Expr::Choice(_))),
            Expr::Sequence(items) => write_joined(f, items, " ", |e| {
                matches!(e, Expr::Choice(_) | Expr::Sequence(_))
            }),
            Expr::Optional(inner) => write!(f, "[{inner}]"),
            Expr::ZeroOrMore(inner) => write_postfix(f, inner, '*'),
            Expr::OneOrMore(inner) => write_postfix(f, inner, '+'),
            Expr::Reference(name) | Expr::Token(name) => f.write_str(name),
            Expr::Literal(text) => write!(f, "'{}'", text.replace('\\', "\\\\").replace('\'', "\\'")),
        }
    }
}

fn write_joined(
    f: &mut fmt::Formatter<'_>,
    items: &[Expr],
    separator: &str,
    needs_parens: impl Fn(&Expr) -> bool,
) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(separator)?;
        }
        if needs_parens(item) {
            write!(f, "({item})")?;
        } else {
            write!(f, "{item}")?;
        }
    }
    Ok(())
}

fn write_postfix(f: &mut fmt::Formatter<'_>, inner: &Expr, op: char) -> fmt::Result {
    match inner {
        Expr::Choice(_) | Expr::Sequence(_) => write!(f, "({inner}){op}"),
        _ => write!(f, "{inner}{op}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_each_reference_walks_nested() {
        let expr = Expr::Sequence(vec![
            Expr::Reference("a".into()),
            Expr::Optional(Box::new(Expr::Choice(vec![
                Expr::Reference("b".into()),
                Expr::Token("NUMBER".into()),
            ]))),
            Expr::ZeroOrMore(Box::new(Expr::Reference("c".into()))),
        ]);

        let mut refs = Vec::new();
        expr.for_each_reference(&mut |name| refs.push(name));
        assert_eq!(refs, vec!["a", "b", "c"]);

        let mut tokens = Vec::new();
        expr.for_each_token(&mut |name| tokens.push(name));
        assert_eq!(tokens, vec!["NUMBER"]);
    }

    #[test]
    fn test_display_round_trips_shape() {
        let expr = Expr::Sequence(vec![
            Expr::Literal("[".into()),
            Expr::Optional(Box::new(Expr::Reference("value".into()))),
            Expr::ZeroOrMore(Box::new(Expr::Sequence(vec![
                Expr::Literal(",".into()),
                Expr::Reference("value".into()),
            ]))),
            Expr::Choice(vec![Expr::Token("A".into()), Expr::Token("B".into())]),
            Expr::OneOrMore(Box::new(Expr::Literal("'".into()))),
        ]);

        assert_eq!(
            expr.to_string(),
            r"'[' [value] (',' value)* (A | B) '\''+"
        );
    }

    #[test]
    fn test_grammar_lookup() {
        let grammar = GrammarFile {
            name: "test.bnf".into(),
            attributes: IndexMap::from([("parserClass".to_string(), "demo::Parser".to_string())]),
            rules: vec![Rule {
                name: "root".into(),
                private: false,
                expr: Expr::Sequence(vec![]),
                span: 0..4,
            }],
        };

        assert_eq!(grammar.attribute("parserClass"), Some("demo::Parser"));
        assert_eq!(grammar.attribute("missing"), None);
        assert_eq!(grammar.root().map(|r| r.name.as_str()), Some("root"));
        assert!(grammar.rule("other").is_none());
    }
}
