use std::collections::HashSet;

use crate::grammar::Symbol::Nonterminal;
use super::CompileErrorType::UndefinedNonterminal;
use super::{Alternative, CompileError, CompileErrors, FileResult, Location, Rule};

type Defined<'a> = HashSet<&'a str>;

fn get_alternative_undefined_symbols(alternative: &Alternative, location: &Location, defined: &Defined) -> CompileErrors {
    // Filter out everything but nonterminals and unwrap the text from the
    // nonterminals. Then filter out all the defined nonterminals.
    alternative.iter()
        .filter_map(|symbol| match symbol {
            Nonterminal(symbol) => Some(symbol),
            _ => None
        })
        .filter(|symbol| !defined.contains(symbol.as_str()))
        .map(|symbol_text| CompileError {
            location: location.to_owned(),
            error: UndefinedNonterminal(symbol_text.to_owned())
        })
        .collect()
}

fn get_rule_undefined_symbols(rule: &Rule, defined: &Defined) -> CompileErrors {
    // Get the undefined nonterminals in each alternative, while flattening
    // into all the undefined nonterminals of the line
    rule.alternatives.iter()
        .flat_map(|alternative| get_alternative_undefined_symbols(alternative, &rule.location, defined))
        .collect()
}

fn get_undefined_symbols(rules: &[Rule]) -> CompileErrors {
    // A nonterminal counts as defined if any line gives it a rule
    let defined: Defined = rules.iter().map(|rule| rule.symbol.as_str()).collect();

    rules.iter()
        .flat_map(|rule| get_rule_undefined_symbols(rule, &defined))
        .collect()
}

pub(super) fn verify_rules(rules: &[Rule]) -> FileResult<()> {
    let mut errors = Vec::new();

    errors.extend(get_undefined_symbols(rules).into_iter());

    if errors.len() > 0 {
        Err(errors)
    } else {
        Ok(())
    }
}
