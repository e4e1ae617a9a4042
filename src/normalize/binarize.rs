/*
    Final stage: bring every alternative into the shape `A -> a` or `A -> B C`
*/

use indexmap::IndexMap;
use itertools::Itertools;

use crate::grammar::{Alternative, Grammar, Result, Rewrite, Symbol};

// Helper nonterminals, keyed by the only alternative they have, so identical
// pieces share one helper
#[derive(Default)]
struct Helpers {
    by_alternative: IndexMap<Alternative, String>,
}

impl Helpers {
    fn get_or_create(&mut self, grammar: &mut Grammar, alternative: Alternative) -> Result<String> {
        if let Some(helper) = self.by_alternative.get(&alternative) {
            return Ok(helper.clone());
        }

        let helper = grammar.fresh_nonterminal()?;
        if let Some(rewrite) = grammar.rules.get_mut(&helper) {
            rewrite.insert(alternative.clone());
        }
        self.by_alternative.insert(alternative, helper.clone());

        Ok(helper)
    }

    fn created(self) -> Vec<String> {
        self.by_alternative.into_values().collect()
    }
}

/// Expects a grammar without empty, unit, unreachable or dead parts. Returns
/// the helper nonterminals it had to introduce.
pub fn binarize(grammar: &mut Grammar) -> Result<Vec<String>> {
    let mut helpers = Helpers::default();

    for nonterminal in grammar.rules.keys().cloned().collect_vec() {
        let rewrite = grammar.rules.get_mut(&nonterminal).map(std::mem::take).unwrap_or_default();
        let shortened = shorten(grammar, &mut helpers, rewrite)?;
        grammar.rules.insert(nonterminal, shortened);
    }

    // Also covers the pair helpers made above, which may hold terminals
    for nonterminal in grammar.rules.keys().cloned().collect_vec() {
        let rewrite = grammar.rules.get_mut(&nonterminal).map(std::mem::take).unwrap_or_default();
        let isolated = isolate_terminals(grammar, &mut helpers, rewrite)?;
        grammar.rules.insert(nonterminal, isolated);
    }

    Ok(helpers.created())
}

// Folds the first two symbols into a helper until at most two are left
fn shorten(grammar: &mut Grammar, helpers: &mut Helpers, rewrite: Rewrite) -> Result<Rewrite> {
    let mut shortened = Rewrite::with_capacity(rewrite.len());

    for mut alternative in rewrite {
        while alternative.len() > 2 {
            let helper = helpers.get_or_create(grammar, alternative[..2].to_vec())?;
            alternative[0] = Symbol::Nonterminal(helper);
            alternative.remove(1);
        }
        shortened.insert(alternative);
    }

    Ok(shortened)
}

fn isolate_terminals(grammar: &mut Grammar, helpers: &mut Helpers, rewrite: Rewrite) -> Result<Rewrite> {
    let mut isolated = Rewrite::with_capacity(rewrite.len());

    for alternative in rewrite {
        if alternative.len() != 2 {
            isolated.insert(alternative);
            continue;
        }

        let pair = alternative.into_iter()
            .map(|symbol| match symbol {
                Symbol::Terminal(_) => helpers.get_or_create(grammar, vec![symbol]).map(Symbol::Nonterminal),
                other => Ok(other),
            })
            .collect::<Result<Alternative>>()?;
        isolated.insert(pair);
    }

    Ok(isolated)
}
