/*
    Fourth stage: drop nonterminals that derive no string of terminals
*/

use indexmap::IndexSet;

use crate::grammar::{Alternative, Grammar, Symbol};

use super::remove_nonterminals;

/// Every nonterminal that derives at least one string of terminals
pub fn productive_set(grammar: &Grammar) -> IndexSet<String> {
    let mut productive: IndexSet<String> = IndexSet::new();

    let mut changed = true;
    while changed {
        changed = false;
        for (nonterminal, rewrite) in &grammar.rules {
            if !productive.contains(nonterminal) && rewrite.iter().any(|alternative| is_productive(alternative, &productive)) {
                productive.insert(nonterminal.clone());
                changed = true;
            }
        }
    }

    productive
}

/// Removes dead nonterminals and every alternative that mentions one. The start
/// symbol stays even when it is dead, with no alternatives left.
pub fn prune_unproductive(grammar: &mut Grammar) -> Vec<String> {
    let productive = productive_set(grammar);

    let removed = remove_nonterminals(grammar, |nonterminal| !productive.contains(nonterminal));
    for rewrite in grammar.rules.values_mut() {
        rewrite.retain(|alternative| is_productive(alternative, &productive));
    }

    removed
}

fn is_productive(alternative: &Alternative, productive: &IndexSet<String>) -> bool {
    alternative.iter().all(|symbol| match symbol {
        Symbol::Terminal(_) => true,
        Symbol::Nonterminal(name) => productive.contains(name),
    })
}
