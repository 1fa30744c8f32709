use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    /// File containing the sentence (default: read from stdin)
    pub file: Option<PathBuf>,

    /// File containing the grammar (default: the built-in sentence grammar)
    #[arg(short, long, value_name = "FILE")]
    pub grammar: Option<PathBuf>,

    /// Start symbol (default: first in the grammar file, `S` for the built-in grammar)
    #[arg(short, long, value_name = "SYMBOL")]
    pub start: Option<String>,

    /// Label of the chunks to extract
    #[arg(short, long, value_name = "LABEL", default_value = "NP")]
    pub label: String,

    /// Maximum number of trees to print (default: all)
    #[arg(short = 'n', long, value_name = "AMOUNT")]
    pub max_parses: Option<usize>,

    /// Print this many random sentences from the grammar instead of parsing
    #[arg(long, value_name = "AMOUNT")]
    pub generate: Option<u32>
}
