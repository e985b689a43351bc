//! The grammar work queue.

use std::{collections::VecDeque, path::PathBuf};

use crate::split_grammar_paths;

/// FIFO backlog of grammar files waiting for a generation attempt.
///
/// Filled once when the processor is initialized and drained across rounds.
/// An entry leaves the queue exactly when its single attempt starts.
#[derive(Debug, Default, Clone)]
pub struct GrammarQueue {
    pending: VecDeque<PathBuf>,
    popped: usize,
}

impl GrammarQueue {
    /// Build a queue from the `grammars` option value.
    pub fn from_option(value: &str) -> Self {
        split_grammar_paths(value).into_iter().collect()
    }

    /// Take the next grammar.
    pub fn pop(&mut self) -> Option<PathBuf> {
        let next = self.pending.pop_front();
        if next.is_some() {
            self.popped += 1;
        }
        next
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// How many grammars have been taken so far.
    pub fn popped(&self) -> usize {
        self.popped
    }

    /// The grammars still waiting, in order.
    pub fn pending(&self) -> impl Iterator<Item = &PathBuf> {
        self.pending.iter()
    }
}

impl FromIterator<PathBuf> for GrammarQueue {
    fn from_iter<I: IntoIterator<Item = PathBuf>>(iter: I) -> Self {
        Self {
            pending: iter.into_iter().collect(),
            popped: 0,
        }
    }
}
