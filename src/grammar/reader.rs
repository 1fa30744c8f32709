/*
    Reads rule text into located rule lines
*/

use itertools::Itertools;

use super::lexer::{self, Token};
use super::{Alternative, GrammarError, GrammarErrorType, GrammarResult, LineResult, Result, Rewrite, Symbol};
use crate::error_handling::Location;

#[derive(PartialEq, Debug)]
pub struct RuleLine {
    pub symbol: String,
    pub rewrite: Rewrite,
    pub location: Location
}

fn parse_alternative(tokens: &[Token]) -> Result<Alternative> {
    tokens.iter().map(|t| match t {
        Token::Arrow => Err(GrammarErrorType::UnexpectedArrow),
        Token::Or => Err(GrammarErrorType::EmptyAlternative),
        Token::Nonterminal(s) => Ok(Symbol::Nonterminal(s.clone())),
        Token::Terminal(s) => Ok(Symbol::Terminal(s.clone()))
    }).collect()
}

fn parse_rewrite(tokens: &[Token]) -> Result<Rewrite> {
    tokens.split(|t| *t == Token::Or).map(parse_alternative).collect()
}

fn parse_line(tokens: &[Token], location: Location) -> Result<RuleLine> {
    let symbol = match tokens.first() {
        Some(Token::Nonterminal(s)) => s.clone(),
        _ => return Err(GrammarErrorType::MissingNonterminal),
    };

    if tokens.get(1) != Some(&Token::Arrow) {
        return Err(GrammarErrorType::MissingArrow);
    }

    let rewrite = parse_rewrite(&tokens[2..])?;

    Ok(RuleLine {
        symbol,
        rewrite,
        location
    })
}

fn parse_lex_line(line: &str, location: Location) -> LineResult<RuleLine> {
    lexer::lex_line(line)
        .and_then(|lexed_line| parse_line(&lexed_line, location.clone()))
        .map_err(|error| GrammarError { location, error })
}

fn is_rule_line(line: &str) -> bool {
    let line = line.trim();
    !line.is_empty() && !line.starts_with(';')
}

/// Reads every rule line of `text`, reporting all malformed lines at once
pub fn read_rules(text: &str, source: &str) -> GrammarResult<Vec<RuleLine>> {
    let parsed_lines = text
        .lines()
        .enumerate()
        .filter(|(_, line)| is_rule_line(line))
        .map(|(num, line)| parse_lex_line(line, Location::new(source, num + 1)));

    let (rules, errors): (Vec<_>, Vec<_>) = parsed_lines.partition_result();
    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(rules)
}
