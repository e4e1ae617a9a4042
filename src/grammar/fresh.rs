/*
    Synthesis of fresh nonterminal names
*/

use itertools::Itertools;

use super::{Grammar, GrammarErrorType, Result, Rewrite};

const ALPHABET: &str = "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZαβγδζηθικλμνξοπρστυφχψω";
const MAX_INDEX: usize = 100;

/// Every name a helper nonterminal may get, in the order they are tried: each
/// letter of the alphabet on its own, then each letter followed by 0 to 99.
pub fn candidates() -> impl Iterator<Item = String> {
    let singles = ALPHABET.chars().map(String::from);
    let indexed = ALPHABET.chars()
        .cartesian_product(0..MAX_INDEX)
        .map(|(letter, index)| format!("{}{}", letter, index));

    singles.chain(indexed)
}

impl Grammar {
    /// Claims the first candidate name that is not already a symbol of the
    /// grammar and registers it with an empty rewrite.
    pub fn fresh_nonterminal(&mut self) -> Result<String> {
        let name = candidates()
            .find(|name| !self.nonterminals.contains(name) && !self.terminals.contains(name))
            .ok_or(GrammarErrorType::NameSpaceExhausted)?;

        self.nonterminals.insert(name.clone());
        self.rules.insert(name.clone(), Rewrite::new());
        Ok(name)
    }
}
