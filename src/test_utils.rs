/*
    Helpers shared by the tests
*/

use std::collections::{BTreeSet, HashMap};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use itertools::Itertools;

use crate::grammar::{Alternative, Grammar, Rewrite, Symbol};

pub type Sentence = Vec<String>;

const TIME_LIMIT: Duration = Duration::from_secs(10);
const MAX_ROUNDS: usize = 10_000;

// Runs `work` on another thread and fails the test if it does not finish,
// which is how a fixpoint loop that never settles shows up
pub fn within_time<T: Send + 'static>(work: impl FnOnce() -> T + Send + 'static) -> T {
    let (sender, receiver) = mpsc::channel();
    thread::spawn(move || {
        let _ = sender.send(work());
    });
    receiver.recv_timeout(TIME_LIMIT).expect("did not finish in time")
}

// Builds a rewrite from single-character symbols, classified by the grammar
pub fn compact_rewrite(grammar: &Grammar, alternatives: &[&str]) -> Rewrite {
    alternatives.iter()
        .map(|alternative| alternative.chars()
            .map(|c| {
                let name = c.to_string();
                if grammar.terminals().contains(&name) {
                    Symbol::Terminal(name)
                } else {
                    Symbol::Nonterminal(name)
                }
            })
            .collect::<Alternative>())
        .collect()
}

// Nonterminals used in some alternative that have no rule of their own
pub fn orphans(grammar: &Grammar) -> Vec<String> {
    grammar.rules().values()
        .flatten()
        .flatten()
        .filter_map(|symbol| match symbol {
            Symbol::Nonterminal(name) if !grammar.rules().contains_key(name) => Some(name.clone()),
            _ => None,
        })
        .unique()
        .collect()
}

/// Every sentence of at most `max_len` terminals the start symbol derives.
/// Works on any grammar, including ones with empty and unit alternatives.
pub fn bounded_language(grammar: &Grammar, max_len: usize) -> BTreeSet<Sentence> {
    let mut languages: HashMap<&str, BTreeSet<Sentence>> = grammar.rules().keys()
        .map(|nonterminal| (nonterminal.as_str(), BTreeSet::new()))
        .collect();

    let mut changed = true;
    let mut rounds = 0;
    while changed {
        rounds += 1;
        assert!(rounds < MAX_ROUNDS, "language enumeration did not settle");

        changed = false;
        for (nonterminal, rewrite) in grammar.rules() {
            let derived = rewrite.iter()
                .flat_map(|alternative| concatenations(alternative, &languages, max_len))
                .collect_vec();
            if let Some(language) = languages.get_mut(nonterminal.as_str()) {
                for sentence in derived {
                    changed |= language.insert(sentence);
                }
            }
        }
    }

    languages.remove(grammar.start()).unwrap_or_default()
}

// Same as `bounded_language` without the empty sentence, which the normal form
// cannot generate
pub fn nonempty_language(grammar: &Grammar, max_len: usize) -> BTreeSet<Sentence> {
    let mut language = bounded_language(grammar, max_len);
    language.remove(&Vec::new());
    language
}

fn concatenations(alternative: &[Symbol], languages: &HashMap<&str, BTreeSet<Sentence>>, max_len: usize) -> BTreeSet<Sentence> {
    alternative.iter().fold(BTreeSet::from([Vec::new()]), |prefixes, symbol| {
        let pieces = match symbol {
            Symbol::Terminal(terminal) => BTreeSet::from([vec![terminal.clone()]]),
            Symbol::Nonterminal(name) => languages.get(name.as_str()).cloned().unwrap_or_default(),
        };

        prefixes.iter()
            .cartesian_product(pieces.iter())
            .filter(|(prefix, piece)| prefix.len() + piece.len() <= max_len)
            .map(|(prefix, piece)| prefix.iter().chain(piece).cloned().collect())
            .collect()
    })
}

// Turns "abba" into a sentence of single-character terminals
pub fn sentence(text: &str) -> Sentence {
    text.chars().map(String::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_of_balanced_strings() {
        let grammar = Grammar::from_compact(&["S"], &["a", "b"], &[("S", vec!["aSb", "ε"])], "S").unwrap();

        let language = bounded_language(&grammar, 6);

        assert_eq!(language, ["", "ab", "aabb", "aaabbb"].map(sentence).into_iter().collect());
    }

    #[test]
    fn language_with_unit_cycle() {
        let grammar = Grammar::from_compact(
            &["S", "A"],
            &["a"],
            &[("S", vec!["A"]), ("A", vec!["S", "a"])],
            "S",
        ).unwrap();

        assert_eq!(bounded_language(&grammar, 3), BTreeSet::from([sentence("a")]));
    }
}
