/*
    This module generates random sentences of a grammar
*/

use rand::prelude::*;
use std::fmt::Display;

use crate::error_handling::*;
use crate::grammar::*;

// How often `sample` starts over when a derivation grows too deep
const ATTEMPTS: usize = 100;

#[derive(Debug, PartialEq)]
pub enum GenerateErrorType {
    // An undefined nonterminal was used
    UndefinedNonterminal(String),
    // The nonterminal has no alternatives, so nothing can be derived from it
    NoAlternatives(String),
    // The derivation got deeper than allowed
    DepthExceeded(usize),
}

impl ErrorType for GenerateErrorType {}

impl Display for GenerateErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerateErrorType::UndefinedNonterminal(nonterminal) => write!(f, "No definition for nonterminal `{}`", nonterminal),
            GenerateErrorType::NoAlternatives(nonterminal) => write!(f, "Nonterminal `{}` derives nothing", nonterminal),
            GenerateErrorType::DepthExceeded(depth) => write!(f, "Derivation deeper than {} steps", depth),
        }
    }
}

pub type GenResult<T> = std::result::Result<T, GenerateErrorType>;

// The terminals of one sentence, in order
pub type Sentence = Vec<String>;

pub fn generate(grammar: &Grammar, rng: &mut impl Rng, max_depth: usize) -> GenResult<Sentence> {
    generate_with_override(grammar, grammar.start(), rng, max_depth)
}

// Generates a sentence in the given grammar starting with the given symbol
pub fn generate_with_override(grammar: &Grammar, start: &str, rng: &mut impl Rng, max_depth: usize) -> GenResult<Sentence> {
    let mut sentence = Sentence::new();
    generate_nonterminal(start, grammar.rules(), rng, max_depth, &mut sentence)?;
    Ok(sentence)
}

// Keeps generating until a derivation stays within `max_depth`
pub fn sample(grammar: &Grammar, rng: &mut impl Rng, max_depth: usize) -> GenResult<Sentence> {
    let mut last_error = GenerateErrorType::DepthExceeded(max_depth);
    for _ in 0..ATTEMPTS {
        match generate(grammar, rng, max_depth) {
            Err(GenerateErrorType::DepthExceeded(depth)) => last_error = GenerateErrorType::DepthExceeded(depth),
            result => return result,
        }
    }
    Err(last_error)
}

fn generate_nonterminal(nonterminal: &str, rules: &Ruleset, rng: &mut impl Rng, depth: usize, sentence: &mut Sentence) -> GenResult<()> {
    if depth == 0 {
        return Err(GenerateErrorType::DepthExceeded(0));
    }

    let rewrite = rules
        .get(nonterminal)
        .ok_or_else(|| GenerateErrorType::UndefinedNonterminal(nonterminal.to_string()))?;
    let alternative = rewrite
        .iter()
        .choose(rng)
        .ok_or_else(|| GenerateErrorType::NoAlternatives(nonterminal.to_string()))?;

    for symbol in alternative {
        match symbol {
            Symbol::Nonterminal(n) => generate_nonterminal(n, rules, rng, depth - 1, sentence)
                .map_err(|error| match error {
                    GenerateErrorType::DepthExceeded(_) => GenerateErrorType::DepthExceeded(depth),
                    other => other,
                })?,
            Symbol::Terminal(t) => sentence.push(t.clone()),
        }
    }

    Ok(())
}
