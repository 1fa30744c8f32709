mod cli;

use std::fs;
use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use clap::Parser as _;
use itertools::Itertools;
use log::debug;

use cli::Cli;
use npchunk::chunk::{self, NOUN_PHRASE};
use npchunk::generator;
use npchunk::grammar::{Grammar, NONTERMINALS, TERMINALS};
use npchunk::parser::Parser;
use npchunk::preprocess::preprocess;

const DEFAULT_START: &str = "S";
const GENERATE_DEPTH: usize = 8;
const GENERATE_ATTEMPTS: usize = 100;

fn load_grammar(cli: &Cli) -> Result<Grammar, String> {
    let grammar = match &cli.grammar {
        Some(path) => Grammar::from_file(path, cli.start.as_deref()),
        None => Grammar::compile(TERMINALS, NONTERMINALS, cli.start.as_deref().unwrap_or(DEFAULT_START)),
    };
    grammar.map_err(|errors| errors.iter().join("\n"))
}

fn read_sentence(cli: &Cli) -> io::Result<String> {
    match &cli.file {
        Some(path) => fs::read_to_string(path),
        None => {
            print!("Sentence: ");
            io::stdout().flush()?;
            let mut sentence = String::new();
            io::stdin().lock().read_line(&mut sentence)?;
            Ok(sentence)
        }
    }
}

fn chunk_heading(label: &str) -> String {
    if label == NOUN_PHRASE {
        "Noun Phrase Chunks".to_string()
    } else {
        format!("{} Chunks", label)
    }
}

fn print_samples(grammar: &Grammar, amount: u32) -> Result<(), String> {
    let mut rng = rand::thread_rng();
    for _ in 0..amount {
        let tokens = generator::sample(grammar, &mut rng, GENERATE_DEPTH, GENERATE_ATTEMPTS)
            .map_err(|e| e.to_string())?;
        println!("{}", tokens.join(" "));
    }
    Ok(())
}

fn run(cli: &Cli) -> Result<(), String> {
    let grammar = load_grammar(cli)?;

    if let Some(amount) = cli.generate {
        return print_samples(&grammar, amount);
    }

    let sentence = read_sentence(cli).map_err(|e| format!("Could not read sentence: {}", e))?;
    let tokens = preprocess(&sentence);
    debug!("tokens: {:?}", tokens);

    let forest = Parser::new(&grammar).parse(&tokens).map_err(|e| e.to_string())?;
    if !forest.has_derivation() {
        println!("Could not parse sentence.");
        return Ok(());
    }

    for tree in forest.trees().take(cli.max_parses.unwrap_or(usize::MAX)) {
        print!("{:#}", tree);
        println!();
        println!("{}", chunk_heading(&cli.label));
        for np in chunk::extract(&tree, &cli.label) {
            println!("{}", np.leaves().join(" "));
        }
        println!();
    }

    Ok(())
}

fn main() -> ExitCode {
    pretty_env_logger::init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{}", message);
            ExitCode::FAILURE
        }
    }
}
