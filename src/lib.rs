/*
    Conversion of context-free grammars to Chomsky normal form.

    A `Grammar` is built from declared nonterminals, terminals and rules (or
    parsed from a BNF file with `parser::parse_file`) and then rewritten in
    place by `Grammar::to_cnf`: empty alternatives, renamings, unreachable and
    dead nonterminals are removed, then long and mixed alternatives are split
    with helper nonterminals.
*/

pub mod error_handling;
pub mod generator;
pub mod grammar;
pub mod normalize;
pub mod parser;

#[cfg(test)]
mod test_utils;

pub use grammar::{Alternative, Grammar, GrammarErrorType, Rewrite, Ruleset, Symbol};
pub use normalize::{CnfReport, Stage};
