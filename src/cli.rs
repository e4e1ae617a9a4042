use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    /// File containing the grammar
    pub file: PathBuf,

    /// Start symbol (default: first in the file)
    #[arg(short, long, value_name = "SYMBOL")]
    pub start: Option<String>,

    /// Print the grammar after every stage of the conversion
    #[arg(long)]
    pub steps: bool,

    /// Only tell whether the grammar is already in Chomsky normal form
    #[arg(long, conflicts_with = "steps")]
    pub check: bool,

    /// Random sentences to print from the converted grammar (default: 0)
    #[arg(short = 'n', long, value_name = "AMOUNT")]
    pub amount: Option<u32>
}
