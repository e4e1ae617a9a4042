/*
    This module is for storing and manipulating grammars
*/

mod fresh;

use std::fmt::Display;

use indexmap::{IndexMap, IndexSet};
use itertools::Itertools;

use crate::error_handling::ErrorType;

pub use fresh::candidates;

// How the empty alternative is spelled in compact grammars
pub const EPSILON: &str = "ε";

// The base unit in a grammar rule
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Symbol {
    Terminal(String),
    Nonterminal(String),
}

impl Symbol {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Symbol::Terminal(_))
    }

    pub fn name(&self) -> &str {
        match self {
            Symbol::Terminal(name) | Symbol::Nonterminal(name) => name,
        }
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Symbol::Terminal(t) => write!(f, "\"{}\"", t),
            Symbol::Nonterminal(n) => write!(f, "{}", n),
        }
    }
}

// The symbols in a single alternative. Empty means epsilon.
pub type Alternative = Vec<Symbol>;

// The alternatives of a rewrite rule, deduplicated in first-seen order
pub type Rewrite = IndexSet<Alternative>;

pub type Ruleset = IndexMap<String, Rewrite>;

#[derive(Debug, PartialEq, Clone)]
pub enum GrammarErrorType {
    // The start symbol is not one of the nonterminals
    UndeclaredStart(String),
    // An alternative uses a name that is neither a terminal nor a nonterminal
    UndeclaredSymbol(String),
    // A rule is given for something that is not a nonterminal
    UndeclaredNonterminal(String),
    // A name is declared both as a terminal and as a nonterminal
    AmbiguousSymbol(String),
    // A name that would not read back the same from a BNF file
    UnprintableName(String),
    // Every candidate name for a helper nonterminal is taken
    NameSpaceExhausted,
}

impl ErrorType for GrammarErrorType {}

impl Display for GrammarErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GrammarErrorType::UndeclaredStart(start) => write!(f, "Start symbol `{}` is not a nonterminal", start),
            GrammarErrorType::UndeclaredSymbol(symbol) => write!(f, "Symbol `{}` is neither a terminal nor a nonterminal", symbol),
            GrammarErrorType::UndeclaredNonterminal(symbol) => write!(f, "Rule given for `{}`, which is not a nonterminal", symbol),
            GrammarErrorType::AmbiguousSymbol(symbol) => write!(f, "`{}` is declared as both a terminal and a nonterminal", symbol),
            GrammarErrorType::UnprintableName(name) => write!(f, "`{}` cannot be written as a BNF symbol", name),
            GrammarErrorType::NameSpaceExhausted => write!(f, "Ran out of names for new nonterminals"),
        }
    }
}

pub type Result<T> = std::result::Result<T, GrammarErrorType>;

#[derive(Debug, PartialEq, Clone)]
pub struct Grammar {
    pub(crate) nonterminals: IndexSet<String>,
    pub(crate) terminals: IndexSet<String>,
    pub(crate) rules: Ruleset,
    pub(crate) start: String,
}

impl Grammar {
    /// Builds a grammar from plain names. Every name used in an alternative is
    /// classified by which of the two declared sets it belongs to. Several
    /// entries for the same nonterminal are merged.
    pub fn new<S: Into<String>>(
        nonterminals: impl IntoIterator<Item = S>,
        terminals: impl IntoIterator<Item = S>,
        rules: impl IntoIterator<Item = (S, Vec<Vec<S>>)>,
        start: S,
    ) -> Result<Self> {
        let nonterminals: IndexSet<String> = nonterminals.into_iter().map(Into::into).collect();
        let terminals: IndexSet<String> = terminals.into_iter().map(Into::into).collect();
        let start: String = start.into();

        if let Some(name) = nonterminals.iter().find(|n| !is_printable_nonterminal(n))
            .or_else(|| terminals.iter().find(|t| !is_printable_terminal(t))) {
            return Err(GrammarErrorType::UnprintableName(name.clone()));
        }
        if let Some(both) = nonterminals.iter().find(|n| terminals.contains(*n)) {
            return Err(GrammarErrorType::AmbiguousSymbol(both.clone()));
        }
        if !nonterminals.contains(&start) {
            return Err(GrammarErrorType::UndeclaredStart(start));
        }

        let mut ruleset: Ruleset = nonterminals.iter()
            .map(|n| (n.clone(), Rewrite::new()))
            .collect();

        for (symbol, alternatives) in rules {
            let symbol: String = symbol.into();
            let alternatives = alternatives.into_iter()
                .map(|alternative| alternative.into_iter()
                    .map(|name| classify(name.into(), &nonterminals, &terminals))
                    .collect::<Result<Alternative>>())
                .collect::<Result<Vec<_>>>()?;

            ruleset.get_mut(&symbol)
                .ok_or_else(|| GrammarErrorType::UndeclaredNonterminal(symbol.clone()))?
                .extend(alternatives);
        }

        Ok(Grammar {
            nonterminals,
            terminals,
            rules: ruleset,
            start,
        })
    }

    /// Builds a grammar where every symbol is a single character, so `"aB"`
    /// means the terminal `a` followed by the nonterminal `B`. Both `""` and
    /// `"ε"` stand for the empty alternative.
    pub fn from_compact(
        nonterminals: &[&str],
        terminals: &[&str],
        rules: &[(&str, Vec<&str>)],
        start: &str,
    ) -> Result<Self> {
        let rules = rules.iter().map(|(symbol, alternatives)| {
            let alternatives: Vec<Vec<String>> = alternatives.iter()
                .map(|alternative| match *alternative {
                    EPSILON => Vec::new(),
                    text => text.chars().map(String::from).collect(),
                })
                .collect();
            (symbol.to_string(), alternatives)
        }).collect_vec();

        Grammar::new(
            nonterminals.iter().map(|n| n.to_string()),
            terminals.iter().map(|t| t.to_string()),
            rules,
            start.to_string(),
        )
    }

    pub fn nonterminals(&self) -> &IndexSet<String> {
        &self.nonterminals
    }

    pub fn terminals(&self) -> &IndexSet<String> {
        &self.terminals
    }

    pub fn rules(&self) -> &Ruleset {
        &self.rules
    }

    pub fn start(&self) -> &str {
        &self.start
    }

    pub fn rewrite(&self, nonterminal: &str) -> Option<&Rewrite> {
        self.rules.get(nonterminal)
    }

    /// True when every alternative is a lone terminal or a pair of nonterminals
    pub fn is_cnf(&self) -> bool {
        self.rules.values().flatten().all(|alternative| matches!(
            alternative.as_slice(),
            [Symbol::Terminal(_)] | [Symbol::Nonterminal(_), Symbol::Nonterminal(_)]
        ))
    }

    // After pruning, a start symbol without alternatives means nothing can be
    // derived at all
    pub fn is_empty_language(&self) -> bool {
        self.rules.get(&self.start).map_or(true, |rewrite| rewrite.is_empty())
    }
}

// Nonterminals are bare words in BNF, so they cannot hold delimiters or start a
// comment
fn is_printable_nonterminal(name: &str) -> bool {
    !name.is_empty()
        && name != EPSILON
        && !name.starts_with(';')
        && !name.chars().any(|c| c.is_whitespace() || c == '=' || c == '|' || c == '\"')
}

// Terminals are quoted, and `""` already means the empty alternative
fn is_printable_terminal(name: &str) -> bool {
    !name.is_empty() && !name.contains('\"')
}

fn classify(name: String, nonterminals: &IndexSet<String>, terminals: &IndexSet<String>) -> Result<Symbol> {
    if nonterminals.contains(&name) {
        Ok(Symbol::Nonterminal(name))
    } else if terminals.contains(&name) {
        Ok(Symbol::Terminal(name))
    } else {
        Err(GrammarErrorType::UndeclaredSymbol(name))
    }
}

pub(crate) fn format_alternative(alternative: &Alternative) -> String {
    if alternative.is_empty() {
        "\"\"".to_string()
    } else {
        alternative.iter().join(" ")
    }
}

// Writes one BNF line per nonterminal, readable by the parser again
// The start symbol's line comes first, since the parser takes the first rule
// as the start
impl Display for Grammar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let start = self.rules.get_key_value(&self.start);
        let rest = self.rules.iter().filter(|(nonterminal, _)| **nonterminal != self.start);

        for (nonterminal, rewrite) in start.into_iter().chain(rest) {
            let alternatives = rewrite.iter().map(format_alternative).join(" | ");
            if alternatives.is_empty() {
                writeln!(f, "{} =", nonterminal)?;
            } else {
                writeln!(f, "{} = {}", nonterminal, alternatives)?;
            }
        }
        Ok(())
    }
}
