use std::collections::HashSet;

use crate::grammar::Symbol::{Nonterminal, Terminal};
use super::GrammarErrorType::{EmptyAlternative, EmptyGrammar, EmptyTerminal, ExpectedTerminal, UndefinedNonterminal, UndefinedStart};
use super::reader::RuleLine;
use super::{Alternative, GrammarError, GrammarErrors, GrammarResult};
use crate::error_handling::Location;

type Defined<'a> = HashSet<&'a str>;

fn get_alternative_errors(alternative: &Alternative, location: &Location, defined: &Defined) -> GrammarErrors {
    if alternative.is_empty() {
        return vec![GrammarError { location: location.to_owned(), error: EmptyAlternative }];
    }

    // Empty terminals can only come from the builder, the lexer already
    // rejects `""`
    alternative.iter()
        .filter_map(|symbol| match symbol {
            Nonterminal(name) if !defined.contains(name.as_str()) => Some(UndefinedNonterminal(name.to_owned())),
            Terminal(value) if value.is_empty() => Some(EmptyTerminal),
            _ => None
        })
        .map(|error| GrammarError {
            location: location.to_owned(),
            error
        })
        .collect()
}

fn get_line_errors(line: &RuleLine, defined: &Defined) -> GrammarErrors {
    line.rewrite.iter()
        .flat_map(|alternative| get_alternative_errors(alternative, &line.location, defined))
        .collect()
}

pub fn verify_rules(lines: &[RuleLine], start: &str, source: &str) -> GrammarResult<()> {
    if lines.is_empty() {
        return Err(vec![GrammarError { location: Location::new(source, 0), error: EmptyGrammar }]);
    }

    let defined: Defined = lines.iter().map(|line| line.symbol.as_str()).collect();

    let mut errors: GrammarErrors = lines.iter()
        .flat_map(|line| get_line_errors(line, &defined))
        .collect();

    if !defined.contains(start) {
        errors.push(GrammarError {
            location: Location::new(source, 0),
            error: UndefinedStart(start.to_string())
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

// Terminal rule texts may only hold rules of the form `A -> "t" | "u"`
pub fn verify_terminal_rules(lines: &[RuleLine]) -> GrammarErrors {
    lines.iter()
        .flat_map(|line| line.rewrite.iter().map(move |alternative| (alternative, &line.location)))
        .filter(|(alternative, _)| !matches!(alternative.as_slice(), [symbol] if symbol.is_terminal()))
        .map(|(_, location)| GrammarError {
            location: location.to_owned(),
            error: ExpectedTerminal
        })
        .collect()
}
