/*
    This module rewrites grammars into Chomsky normal form
*/

pub mod binarize;
pub mod epsilon;
pub mod productivity;
pub mod reachability;
pub mod unit;

use std::fmt::Display;

use indexmap::IndexSet;
use itertools::Itertools;

use crate::grammar::{Grammar, Result};

// The stages of the conversion, in the only order that is correct
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Epsilon,
    Unit,
    Reachability,
    Productivity,
    Binarize,
}

impl Stage {
    pub const ALL: [Stage; 5] = [
        Stage::Epsilon,
        Stage::Unit,
        Stage::Reachability,
        Stage::Productivity,
        Stage::Binarize,
    ];
}

impl Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Epsilon => write!(f, "1. After eliminating epsilon productions"),
            Stage::Unit => write!(f, "2. After eliminating renaming productions"),
            Stage::Reachability => write!(f, "3. After eliminating inaccessible symbols"),
            Stage::Productivity => write!(f, "4. After eliminating non-productive symbols"),
            Stage::Binarize => write!(f, "5. After converting to CNF"),
        }
    }
}

/// What the conversion found and changed along the way
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CnfReport {
    /// The grammar was already in normal form and was left untouched
    pub already_cnf: bool,
    pub nullable: IndexSet<String>,
    /// The start symbol could derive the empty string, which the normal form
    /// cannot express, so that sentence is no longer generated
    pub start_was_nullable: bool,
    pub unreachable: Vec<String>,
    pub unproductive: Vec<String>,
    /// Nonterminals introduced while binarizing
    pub helpers: Vec<String>,
}

impl Grammar {
    /// Converts the grammar to Chomsky normal form in place. Does nothing if it
    /// already is in normal form.
    pub fn to_cnf(&mut self) -> Result<CnfReport> {
        self.to_cnf_with(|_, _| {})
    }

    /// Like `to_cnf`, but shows the grammar to `observe` after every stage
    pub fn to_cnf_with(&mut self, mut observe: impl FnMut(Stage, &Grammar)) -> Result<CnfReport> {
        if self.is_cnf() {
            return Ok(CnfReport {
                already_cnf: true,
                ..CnfReport::default()
            });
        }

        let mut report = CnfReport::default();

        report.nullable = epsilon::eliminate_epsilon(self);
        report.start_was_nullable = report.nullable.contains(&self.start);
        observe(Stage::Epsilon, self);

        unit::eliminate_units(self);
        observe(Stage::Unit, self);

        report.unreachable = reachability::prune_unreachable(self);
        observe(Stage::Reachability, self);

        report.unproductive = productivity::prune_unproductive(self);
        observe(Stage::Productivity, self);

        report.helpers = binarize::binarize(self)?;
        observe(Stage::Binarize, self);

        Ok(report)
    }
}

// Drops the matching nonterminals and their rules, but never the start symbol
pub(crate) fn remove_nonterminals(grammar: &mut Grammar, doomed: impl Fn(&str) -> bool) -> Vec<String> {
    let removed = grammar.nonterminals.iter()
        .filter(|nonterminal| **nonterminal != grammar.start && doomed(nonterminal.as_str()))
        .cloned()
        .collect_vec();

    grammar.nonterminals.retain(|nonterminal| !removed.contains(nonterminal));
    grammar.rules.retain(|nonterminal, _| !removed.contains(nonterminal));

    removed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::Symbol;
    use crate::test_utils::*;

    fn textbook() -> Grammar {
        Grammar::from_compact(
            &["S", "A", "B"],
            &["a", "b"],
            &[
                ("S", vec!["aB", "bA"]),
                ("A", vec!["bAaB", "aS", "a"]),
                ("B", vec!["A", "BS", "ε"]),
            ],
            "S",
        ).unwrap()
    }

    #[test]
    fn textbook_language_is_kept() {
        let original = textbook();
        let mut grammar = textbook();

        let (grammar, report) = within_time(move || {
            let report = grammar.to_cnf().unwrap();
            (grammar, report)
        });

        assert!(grammar.is_cnf());
        assert!(!report.already_cnf);
        assert_eq!(report.nullable, IndexSet::from(["B".to_string()]));
        assert!(!report.start_was_nullable);
        assert_eq!(nonempty_language(&original, 6), bounded_language(&grammar, 6));
    }

    #[test]
    fn course_example_language_is_kept() {
        let build = || Grammar::from_compact(
            &["S", "A", "B", "C"],
            &["a", "d"],
            &[
                ("S", vec!["dB", "A"]),
                ("A", vec!["d", "dS", "aAdAB"]),
                ("B", vec!["a", "aS", "A", "ε"]),
                ("C", vec!["Aa"]),
            ],
            "S",
        ).unwrap();
        let original = build();
        let mut grammar = build();

        let report = grammar.to_cnf().unwrap();

        assert!(grammar.is_cnf());
        assert_eq!(report.unreachable, vec!["C".to_string()]);
        assert!(!grammar.nonterminals().contains("C"));
        assert_eq!(nonempty_language(&original, 6), bounded_language(&grammar, 6));
    }

    #[test]
    fn to_cnf_is_idempotent() {
        let mut grammar = textbook();
        grammar.to_cnf().unwrap();
        let first = grammar.rules().clone();

        let report = grammar.to_cnf().unwrap();

        assert!(report.already_cnf);
        assert_eq!(grammar.rules(), &first);
    }

    #[test]
    fn cnf_input_is_untouched() {
        let mut grammar = Grammar::from_compact(
            &["S", "A"],
            &["a"],
            &[("S", vec!["AA", "a"]), ("A", vec!["a"])],
            "S",
        ).unwrap();
        let before = grammar.clone();

        assert!(grammar.to_cnf().unwrap().already_cnf);
        assert_eq!(grammar, before);
    }

    #[test]
    fn observer_sees_every_stage() {
        let mut grammar = textbook();
        let mut seen = Vec::new();

        grammar.to_cnf_with(|stage, snapshot| {
            seen.push((stage, snapshot.rules().clone()));
        }).unwrap();

        assert_eq!(seen.iter().map(|(stage, _)| *stage).collect_vec(), Stage::ALL.to_vec());
        // No empty alternatives after the first stage
        assert!(seen[0].1.values().flatten().all(|alternative| !alternative.is_empty()));
        // No unit alternatives after the second
        assert!(seen[1].1.values().flatten().all(|alternative| !matches!(alternative.as_slice(), [Symbol::Nonterminal(_)])));
        assert_eq!(&seen[4].1, grammar.rules());
    }

    #[test]
    fn nullable_start_loses_only_the_empty_sentence() {
        let build = || Grammar::from_compact(
            &["S"],
            &["a", "b"],
            &[("S", vec!["aSb", "ε"])],
            "S",
        ).unwrap();
        let original = build();
        let mut grammar = build();

        let report = grammar.to_cnf().unwrap();

        assert!(report.start_was_nullable);
        assert!(bounded_language(&original, 6).contains(&Vec::new()));
        assert!(!bounded_language(&grammar, 6).contains(&Vec::new()));
        assert_eq!(nonempty_language(&original, 6), bounded_language(&grammar, 6));
    }

    #[test]
    fn dead_start_gives_empty_language() {
        let mut grammar = Grammar::from_compact(
            &["S", "A"],
            &["a"],
            &[("S", vec!["aS", "A"]), ("A", vec!["AA"])],
            "S",
        ).unwrap();

        grammar.to_cnf().unwrap();

        assert!(grammar.is_empty_language());
        assert!(grammar.nonterminals().contains("S"));
        assert!(grammar.is_cnf());
        assert!(orphans(&grammar).is_empty());
    }

    #[test]
    fn cyclic_units_terminate() {
        let build = || Grammar::from_compact(
            &["S", "A", "B", "C"],
            &["a", "b", "c"],
            &[
                ("S", vec!["A", "aSb"]),
                ("A", vec!["B", "a"]),
                ("B", vec!["C", "S", "bb"]),
                ("C", vec!["A", "c"]),
            ],
            "S",
        ).unwrap();
        let original = build();
        let mut grammar = build();

        let grammar = within_time(move || {
            grammar.to_cnf().unwrap();
            grammar
        });

        assert!(grammar.is_cnf());
        assert_eq!(nonempty_language(&original, 6), bounded_language(&grammar, 6));
    }

    #[test]
    fn multi_character_names() {
        let build = || Grammar::new(
            vec!["expr", "term", "digits"],
            vec!["+", "(", ")", "1", "2"],
            vec![
                ("expr", vec![vec!["expr", "+", "term"], vec!["term"]]),
                ("term", vec![vec!["(", "expr", ")"], vec!["digits"]]),
                ("digits", vec![vec!["1"], vec!["2"], vec!["digits", "digits"]]),
            ],
            "expr",
        ).unwrap();
        let original = build();
        let mut grammar = build();

        grammar.to_cnf().unwrap();

        assert!(grammar.is_cnf());
        assert_eq!(nonempty_language(&original, 5), bounded_language(&grammar, 5));
    }
}
