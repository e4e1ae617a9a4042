mod cli;

use std::process::ExitCode;

use clap::Parser;
use itertools::Itertools;
use rand::thread_rng;

use chomsky::error_handling::{print_errors, Locate, Location};
use chomsky::generator;
use chomsky::parser;

// Converted grammars nest deeper than their originals because of the helpers
const SAMPLE_DEPTH: usize = 64;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();

    let mut grammar = match parser::parse_file_with_start(&cli.file, cli.start.as_deref()) {
        Ok(grammar) => grammar,
        Err(errors) => {
            print_errors(&errors);
            return ExitCode::FAILURE;
        }
    };

    if cli.check {
        if grammar.is_cnf() {
            println!("{} is in Chomsky normal form", cli.file.display());
        } else {
            println!("{} is not in Chomsky normal form", cli.file.display());
        }
        return ExitCode::SUCCESS;
    }

    println!("Original grammar:");
    println!("{}", grammar);

    let converted = if cli.steps {
        grammar.to_cnf_with(|stage, snapshot| println!("{}:\n{}", stage, snapshot))
    } else {
        grammar.to_cnf()
    };
    let report = match converted.located(Location::whole(cli.file.clone())) {
        Ok(report) => report,
        Err(error) => {
            print_errors(&[error]);
            return ExitCode::FAILURE;
        }
    };

    if report.already_cnf {
        println!("Already in Chomsky normal form");
        println!();
    }
    if cli.steps && !report.already_cnf {
        println!("Nullable nonterminals: {}", report.nullable.iter().join(", "));
    }
    if report.start_was_nullable {
        println!("Note: `{}` derives the empty sentence, which the converted grammar cannot", grammar.start());
    }
    if grammar.is_empty_language() {
        println!("Note: the grammar generates no sentences");
    }

    println!("Chomsky normal form:");
    println!("{}", grammar);

    let mut rng = thread_rng();
    for _ in 0..cli.amount.unwrap_or(0) {
        match generator::sample(&grammar, &mut rng, SAMPLE_DEPTH).located(Location::whole(cli.file.clone())) {
            Ok(sentence) => println!("{}", sentence.concat()),
            Err(error) => {
                print_errors(&[error]);
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}
