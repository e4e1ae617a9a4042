/*
    Third stage: drop nonterminals the start symbol never reaches
*/

use std::collections::VecDeque;

use indexmap::IndexSet;

use crate::grammar::{Grammar, Symbol};

use super::remove_nonterminals;

pub fn reachable_set(grammar: &Grammar) -> IndexSet<String> {
    let mut reachable = IndexSet::from([grammar.start.clone()]);
    let mut queue = VecDeque::from([grammar.start.clone()]);

    while let Some(nonterminal) = queue.pop_front() {
        for symbol in grammar.rules.get(&nonterminal).into_iter().flatten().flatten() {
            if let Symbol::Nonterminal(next) = symbol {
                if reachable.insert(next.clone()) {
                    queue.push_back(next.clone());
                }
            }
        }
    }

    reachable
}

/// Removes the nonterminals that no derivation from the start symbol can use.
/// Terminals are left alone. Returns the removed names.
pub fn prune_unreachable(grammar: &mut Grammar) -> Vec<String> {
    let reachable = reachable_set(grammar);
    remove_nonterminals(grammar, |nonterminal| !reachable.contains(nonterminal))
}
