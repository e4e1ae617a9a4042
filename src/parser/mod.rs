/*
    This module parses BNF files
*/

mod lexer;
mod verifier;

use std::fmt::Display;
use std::fs::File;
use std::io::BufRead;
use std::path::PathBuf;

use crate::grammar::*;
use crate::error_handling::*;
use itertools::Itertools;
use lexer::*;
use verifier::verify_rules;

#[derive(Debug)]
pub enum CompileErrorType {
    // A line which should contain a rule does not
    MissingEquals,
    // A rule has multiple equals signs
    UnexpectedEquals,
    // The user starts a rule line with something other than a nonterminal
    MissingNonterminal,
    // There is an unclosed quote
    UnmatchedQuote,
    // An undefined token was used
    UndefinedNonterminal(String),
    // Somehow a full rewrite was parsed as a base alternative
    // This is a problem with chomsky, not the grammar
    UnsplitRewrite,
    // A blank line got too deep into the parser
    // This is a problem with chomsky, not the grammar
    UnexpectedBlankLine,
    // The file has no rules at all
    EmptyFile,
    // The rules parsed but do not make a grammar
    InvalidGrammar(GrammarErrorType),
    // There was an issue with reading a file
    FileError(std::io::Error),
}

impl ErrorType for CompileErrorType {}

impl PartialEq for CompileErrorType {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (CompileErrorType::FileError(a), CompileErrorType::FileError(b)) => a.kind() == b.kind(),
            (CompileErrorType::InvalidGrammar(a), CompileErrorType::InvalidGrammar(b)) => a == b,
            _ => std::mem::discriminant(self) == std::mem::discriminant(other),
        }
    }
}

impl Display for CompileErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompileErrorType::MissingEquals => write!(f, "Expected `=` after nonterminal"),
            CompileErrorType::UnexpectedEquals => write!(f, "Unexpected `=` encountered"),
            CompileErrorType::MissingNonterminal => write!(f, "Tried to define something other than a nonterminal"),
            CompileErrorType::UnmatchedQuote => write!(f, "Unmatched quotes"),
            CompileErrorType::UndefinedNonterminal(nonterminal) => write!(f, "Could not find definition for `{}`", nonterminal),
            CompileErrorType::UnsplitRewrite => write!(f, "Rewrite was not fully split (this is a problem with chomsky, not the grammar)"),
            CompileErrorType::UnexpectedBlankLine => write!(f, "Blank line encountered in rule parser (this is a problem with chomsky, not the grammar)"),
            CompileErrorType::EmptyFile => write!(f, "No rules found"),
            CompileErrorType::InvalidGrammar(e) => write!(f, "Invalid grammar: {}", e),
            CompileErrorType::FileError(e) => write!(f, "File error: {}", e),
        }
    }
}

pub type CompileError = Error<CompileErrorType>;
pub type CompileErrors = Errors<CompileErrorType>;

fn io_error(error: std::io::Error, file: PathBuf) -> CompileError {
    CompileError {
        location: Location::whole(file),
        error: CompileErrorType::FileError(error)
    }
}

pub type Result<T> = std::result::Result<T, CompileErrorType>;
pub type LineResult<T> = std::result::Result<T, CompileError>;
pub type FileResult<T> = std::result::Result<T, CompileErrors>;

#[derive(PartialEq, Debug)]
struct Rule {
    symbol: String,
    alternatives: Vec<Alternative>,
    location: Location
}

// Empty terminals and `ε` vanish, so `""` alone is the empty alternative
fn parse_alternative(tokens: &[Token]) -> Result<Alternative> {
    tokens.iter().filter_map(|t| match t {
        Token::Equals => Some(Err(CompileErrorType::UnexpectedEquals)),
        Token::Or => Some(Err(CompileErrorType::UnsplitRewrite)),
        Token::Epsilon => None,
        Token::Terminal(s) if s.is_empty() => None,
        Token::Nonterminal(s) => Some(Ok(Symbol::Nonterminal(s.clone()))),
        Token::Terminal(s) => Some(Ok(Symbol::Terminal(s.clone())))
    }).collect()
}

// Nothing after `=` means no alternatives at all; the empty alternative is
// spelled `""` or `ε`
fn parse_rewrite(tokens: &[Token]) -> Result<Vec<Alternative>> {
    if tokens.is_empty() {
        return Ok(Vec::new());
    }
    tokens.split(|t| *t == Token::Or).map(parse_alternative).collect()
}

fn parse_line(tokens: &[Token], location: Location) -> Result<Rule> {
    // Try to get the token the rule is for. The match returns a result which
    // is then unwrapped with the ? operator
    let symbol = match tokens.get(0) {
        Some(Token::Nonterminal(s)) => Ok(s.clone()),
        Some(_) => Err(CompileErrorType::MissingNonterminal),
        None => Err(CompileErrorType::UnexpectedBlankLine)
    }?;

    if tokens.get(1) != Some(&Token::Equals) {
        return Err(CompileErrorType::MissingEquals)
    }

    let alternatives = parse_rewrite(&tokens[2..])?;

    return Ok(Rule {
        symbol,
        alternatives,
        location
    });
}

fn parse_lex_line(line: &str, location: Location) -> LineResult<Rule> {
    lexer::lex_line(line)
        .and_then(|lexed_line| parse_line(&lexed_line, location.clone()))
        .located(location)
}

fn is_rule_line(line: &String) -> bool {
    let line = line.trim_start();
    !line.is_empty() && !line.starts_with(';')
}

// Returns an iterator over the lines of a reader, with the io errors wrapped
// in CompileError and enumerated
fn line_nums<'a>(reader: impl BufRead + 'a, path: &'a PathBuf) -> impl Iterator<Item = (usize, LineResult<String>)> + 'a {
    reader
        .lines()
        .map(move |line| line.map_err(|e| io_error(e, path.clone())))
        .enumerate()
        .filter(|(_, line)| line.as_ref().is_ok_and(is_rule_line) || line.is_err())
        .map(|(num, line)| (num + 1, line))
}

fn symbol_names(alternative: &Alternative) -> Vec<String> {
    alternative.iter().map(|symbol| symbol.name().to_string()).collect()
}

// Every left-hand side is a nonterminal and every quoted string a terminal.
// The first rule names the start symbol unless one is given.
fn grammar_from_rules(rules: Vec<Rule>, start: Option<&str>, path: &PathBuf) -> FileResult<Grammar> {
    let whole_file = |error| vec![Error::at(Location::whole(path.clone()), error)];

    let Some(first) = rules.first() else {
        return Err(whole_file(CompileErrorType::EmptyFile));
    };
    let start = start.map_or_else(|| first.symbol.clone(), str::to_string);

    verify_rules(&rules)?;

    let nonterminals = rules.iter().map(|rule| rule.symbol.clone()).unique().collect_vec();
    let terminals = rules.iter()
        .flat_map(|rule| rule.alternatives.iter().flatten())
        .filter(|symbol| symbol.is_terminal())
        .map(|symbol| symbol.name().to_string())
        .unique()
        .collect_vec();
    let named_rules = rules.into_iter()
        .map(|rule| (rule.symbol, rule.alternatives.iter().map(symbol_names).collect::<Vec<_>>()))
        .collect_vec();

    Grammar::new(nonterminals, terminals, named_rules, start)
        .map_err(|e| whole_file(CompileErrorType::InvalidGrammar(e)))
}

fn parse_lines(lines: impl Iterator<Item = (usize, LineResult<String>)>, path: &PathBuf) -> FileResult<Vec<Rule>> {
    let parsed_lines = lines.map(|(num, line_res)| {
        line_res.and_then(|line| parse_lex_line(&line, Location {
            file: path.clone(),
            line: num
        }))
    });

    let (rules, errors): (Vec<_>, Vec<_>) = parsed_lines.partition_map(|line| match line {
        Ok(rule) => itertools::Either::Left(rule),
        Err(error) => itertools::Either::Right(error),
    });
    if errors.len() > 0 {
        return Err(errors);
    }

    return Ok(rules);
}

/// Parses grammar text. `path` is only used to label errors.
pub fn parse_str(text: &str, path: &PathBuf, start: Option<&str>) -> FileResult<Grammar> {
    let rules = parse_lines(line_nums(text.as_bytes(), path), path)?;
    grammar_from_rules(rules, start, path)
}

pub fn parse_file_with_start(path: &PathBuf, start: Option<&str>) -> FileResult<Grammar> {
    let file = File::open(path).map_err(|e| vec![io_error(e, path.clone())])?;
    let rules = parse_lines(line_nums(std::io::BufReader::new(file), path), path)?;
    grammar_from_rules(rules, start, path)
}

pub fn parse_file(path: &PathBuf) -> FileResult<Grammar> {
    parse_file_with_start(path, None)
}
