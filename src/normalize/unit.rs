/*
    Second stage: remove renaming alternatives, the ones that are a lone nonterminal
*/

use indexmap::IndexSet;
use itertools::Itertools;

use crate::grammar::{Alternative, Grammar, Symbol};

pub fn eliminate_units(grammar: &mut Grammar) {
    loop {
        let nonterminals = grammar.rules.keys().cloned().collect_vec();

        let mut changed = false;
        for nonterminal in &nonterminals {
            changed |= absorb_units(grammar, nonterminal);
        }

        if !changed {
            break;
        }
    }
}

fn unit_target(alternative: &Alternative) -> Option<&str> {
    match alternative.as_slice() {
        [Symbol::Nonterminal(target)] => Some(target),
        _ => None,
    }
}

// Replaces each `nonterminal -> target` by the alternatives of `target`.
// A target is merged at most once, which is what stops cycles like A -> B -> A.
// Returns whether anything was removed.
fn absorb_units(grammar: &mut Grammar, nonterminal: &str) -> bool {
    let mut absorbed = IndexSet::from([nonterminal.to_string()]);
    let mut changed = false;

    loop {
        let Some(rewrite) = grammar.rules.get_mut(nonterminal) else {
            return changed;
        };
        let Some(target) = rewrite.iter().find_map(unit_target).map(str::to_string) else {
            return changed;
        };

        rewrite.shift_remove(&vec![Symbol::Nonterminal(target.clone())]);
        changed = true;

        if absorbed.insert(target.clone()) {
            // A target without rules (should not happen) contributes nothing
            let inherited = grammar.rules.get(&target).cloned().unwrap_or_default();
            if let Some(rewrite) = grammar.rules.get_mut(nonterminal) {
                rewrite.extend(inherited);
            }
        }
    }
}
