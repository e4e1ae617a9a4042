/*
    First stage: remove empty alternatives
*/

use indexmap::IndexSet;

use crate::grammar::{Alternative, Grammar, Rewrite, Ruleset, Symbol};

/// Every nonterminal that can derive the empty string
pub fn nullable_set(grammar: &Grammar) -> IndexSet<String> {
    let mut nullable: IndexSet<String> = grammar.rules.iter()
        .filter(|(_, rewrite)| rewrite.iter().any(Vec::is_empty))
        .map(|(nonterminal, _)| nonterminal.clone())
        .collect();

    let mut changed = true;
    while changed {
        changed = false;
        for (nonterminal, rewrite) in &grammar.rules {
            if nullable.contains(nonterminal) {
                continue;
            }
            if rewrite.iter().any(|alternative| alternative.iter().all(|symbol| is_nullable(symbol, &nullable))) {
                nullable.insert(nonterminal.clone());
                changed = true;
            }
        }
    }

    nullable
}

/// Replaces every alternative by all the ways of keeping or dropping its
/// nullable nonterminals, leaving out the empty one. Returns the nullable set.
pub fn eliminate_epsilon(grammar: &mut Grammar) -> IndexSet<String> {
    let nullable = nullable_set(grammar);

    let rules: Ruleset = grammar.rules.iter()
        .map(|(nonterminal, rewrite)| {
            let expanded: Rewrite = rewrite.iter()
                .flat_map(|alternative| expand_nullable(alternative, &nullable))
                .collect();
            (nonterminal.clone(), expanded)
        })
        .collect();
    grammar.rules = rules;

    nullable
}

fn is_nullable(symbol: &Symbol, nullable: &IndexSet<String>) -> bool {
    matches!(symbol, Symbol::Nonterminal(name) if nullable.contains(name))
}

fn expand_nullable(alternative: &Alternative, nullable: &IndexSet<String>) -> Vec<Alternative> {
    let expansions = alternative.iter().fold(vec![Vec::new()], |expansions, symbol| {
        expansions.into_iter()
            .flat_map(|prefix| {
                let mut kept = prefix.clone();
                kept.push(symbol.clone());
                if is_nullable(symbol, nullable) {
                    vec![kept, prefix]
                } else {
                    vec![kept]
                }
            })
            .collect()
    });

    expansions.into_iter().filter(|expansion| !expansion.is_empty()).collect()
}
