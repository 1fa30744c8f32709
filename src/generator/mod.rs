/*
    This module generates random sentences from a grammar
*/

use log::debug;
use rand::prelude::*;
use std::fmt::Display;

use crate::error_handling::*;
use crate::grammar::{Grammar, Rule, Symbol};

const SOURCE: &str = "generator";

#[derive(Debug, PartialEq)]
pub enum GenerateErrorType {
    // A nonterminal without rules was expanded
    UndefinedNonterminal(String),
    // The derivation went deeper than allowed
    DepthExceeded(usize),
}

impl ErrorType for GenerateErrorType {}

impl Display for GenerateErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerateErrorType::UndefinedNonterminal(nonterminal) => write!(f, "No definition for nonterminal `{}`", nonterminal),
            GenerateErrorType::DepthExceeded(depth) => write!(f, "Derivation exceeded a depth of {}", depth),
        }
    }
}

pub type GenerateError = Error<GenerateErrorType>;
pub type GenResult = Result<Vec<String>, GenerateError>;

fn generate_error(error: GenerateErrorType) -> GenerateError {
    GenerateError {
        location: Location::new(SOURCE, 0),
        error
    }
}

// Generates a token sequence derivable from the grammar's start symbol
pub fn generate<R: Rng + ?Sized>(grammar: &Grammar, rng: &mut R, max_depth: usize) -> GenResult {
    generate_from(grammar, grammar.start(), rng, max_depth)
}

// Generates a token sequence derivable from the given symbol
pub fn generate_from<R: Rng + ?Sized>(grammar: &Grammar, start: &str, rng: &mut R, max_depth: usize) -> GenResult {
    let mut tokens = Vec::new();
    generate_nonterminal(start, grammar, rng, 0, max_depth, &mut tokens)?;
    Ok(tokens)
}

/// Retries `generate` until a derivation stays within `max_depth`
pub fn sample<R: Rng + ?Sized>(grammar: &Grammar, rng: &mut R, max_depth: usize, attempts: usize) -> GenResult {
    let mut last_error = generate_error(GenerateErrorType::DepthExceeded(max_depth));
    for attempt in 0..attempts {
        match generate(grammar, rng, max_depth) {
            Ok(tokens) => return Ok(tokens),
            Err(error) => {
                debug!("sample attempt {} failed: {}", attempt + 1, error);
                last_error = error;
            }
        }
    }
    Err(last_error)
}

fn generate_nonterminal<R: Rng + ?Sized>(nonterminal: &str, grammar: &Grammar, rng: &mut R, depth: usize, max_depth: usize, tokens: &mut Vec<String>) -> Result<(), GenerateError> {
    if depth > max_depth {
        return Err(generate_error(GenerateErrorType::DepthExceeded(max_depth)));
    }

    let rules: Vec<&Rule> = grammar.rules_for(nonterminal).collect();
    let rule = rules
        .choose(rng)
        .ok_or_else(|| generate_error(GenerateErrorType::UndefinedNonterminal(nonterminal.to_string())))?;

    for symbol in &rule.rhs {
        generate_symbol(symbol, grammar, rng, depth, max_depth, tokens)?;
    }

    Ok(())
}

fn generate_symbol<R: Rng + ?Sized>(symbol: &Symbol, grammar: &Grammar, rng: &mut R, depth: usize, max_depth: usize, tokens: &mut Vec<String>) -> Result<(), GenerateError> {
    match symbol {
        Symbol::Nonterminal(name) => generate_nonterminal(name, grammar, rng, depth + 1, max_depth, tokens),
        Symbol::Terminal(value) => {
            tokens.push(value.clone());
            Ok(())
        }
    }
}
