//! Grammar checks run before rendering.

use gramgen_bnf::{GrammarFile, Rule};
use indexmap::{IndexMap, IndexSet};

/// What the generator needs to know about a grammar beyond its AST.
#[derive(Debug)]
pub(crate) struct Analysis<'g> {
    /// First definition of each rule, in source order.
    pub rules: IndexMap<&'g str, &'g Rule>,
    /// Later definitions of an already defined name.
    pub duplicates: Vec<&'g Rule>,
    /// Named tokens, in order of first use.
    pub tokens: IndexSet<&'g str>,
    /// `(rule, reference)` pairs where the reference names no rule.
    pub unresolved: IndexSet<(&'g str, &'g str)>,
    /// Private rules nothing else refers to.
    pub unused_private: Vec<&'g str>,
}

impl<'g> Analysis<'g> {
    pub fn new(grammar: &'g GrammarFile) -> Self {
        let mut rules = IndexMap::new();
        let mut duplicates = Vec::new();
        for rule in &grammar.rules {
            if rules.contains_key(rule.name.as_str()) {
                duplicates.push(rule);
            } else {
                rules.insert(rule.name.as_str(), rule);
            }
        }

        let mut tokens = IndexSet::new();
        let mut unresolved = IndexSet::new();
        let mut referenced = IndexSet::new();
        for rule in rules.values().copied() {
            let name = rule.name.as_str();
            rule.expr.for_each_token(&mut |token| {
                tokens.insert(token);
            });
            rule.expr.for_each_reference(&mut |reference| {
                if !rules.contains_key(reference) {
                    unresolved.insert((name, reference));
                } else if reference != name {
                    referenced.insert(reference);
                }
            });
        }

        let root = grammar.root().map(|r| r.name.as_str());
        let unused_private = rules
            .values()
            .copied()
            .filter(|r| r.private && Some(r.name.as_str()) != root)
            .map(|r| r.name.as_str())
            .filter(|name| !referenced.contains(name))
            .collect();

        Self {
            rules,
            duplicates,
            tokens,
            unresolved,
            unused_private,
        }
    }

    pub fn is_defined(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }
}
