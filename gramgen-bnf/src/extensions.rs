//! Language-support extensions registered into an [`Environment`](crate::Environment).

use indexmap::IndexMap;

use crate::{Expr, GrammarFile, Rule, Span};

/// Builds AST nodes for a language.
///
/// The parser only recognises structure; node construction is delegated to
/// the factory registered for the language being parsed.
pub trait AstFactory: Send + Sync {
    /// Build a rule node.
    fn create_rule(&self, name: String, private: bool, expr: Expr, span: Span) -> Rule;

    /// Build the file node from its attributes and rules.
    fn create_file(
        &self,
        name: String,
        attributes: IndexMap<String, String>,
        rules: Vec<Rule>,
    ) -> GrammarFile;
}

/// An open/close brace pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BracePair {
    pub open: char,
    pub close: char,
}

/// Describes which characters pair up as braces in a language.
pub trait BraceMatcher: Send + Sync {
    /// The brace pairs of the language.
    fn pairs(&self) -> &[BracePair];

    /// The closing brace for an opening one.
    fn closing_for(&self, open: char) -> Option<char> {
        self.pairs().iter().find(|p| p.open == open).map(|p| p.close)
    }

    /// Check whether a character closes some pair.
    fn is_closing(&self, c: char) -> bool {
        self.pairs().iter().any(|p| p.close == c)
    }
}

/// AST factory for BNF grammars.
#[derive(Debug, Default, Clone, Copy)]
pub struct BnfAstFactory;

impl AstFactory for BnfAstFactory {
    fn create_rule(&self, name: String, private: bool, expr: Expr, span: Span) -> Rule {
        Rule {
            name,
            private,
            expr,
            span,
        }
    }

    fn create_file(
        &self,
        name: String,
        attributes: IndexMap<String, String>,
        rules: Vec<Rule>,
    ) -> GrammarFile {
        GrammarFile {
            name,
            attributes,
            rules,
        }
    }
}

const BNF_PAIRS: &[BracePair] = &[
    BracePair {
        open: '{',
        close: '}',
    },
    BracePair {
        open: '(',
        close: ')',
    },
    BracePair {
        open: '[',
        close: ']',
    },
];

/// Brace matcher for BNF grammars: `{}`, `()` and `[]`.
#[derive(Debug, Default, Clone, Copy)]
pub struct BnfBraceMatcher;

impl BraceMatcher for BnfBraceMatcher {
    fn pairs(&self) -> &[BracePair] {
        BNF_PAIRS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bnf_brace_pairs() {
        let matcher = BnfBraceMatcher;
        assert_eq!(matcher.closing_for('{'), Some('}'));
        assert_eq!(matcher.closing_for('['), Some(']'));
        assert_eq!(matcher.closing_for('<'), None);
        assert!(matcher.is_closing(')'));
        assert!(!matcher.is_closing('('));
    }
}
