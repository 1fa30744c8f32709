use itertools::{Itertools, PeekingNext};

use super::{GrammarErrorType, Result};

#[derive(PartialEq, Debug)]
pub enum Token {
    Arrow,
    Or,
    Nonterminal(String),
    Terminal(String)
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '.'
}

pub fn lex_terminal(line: &mut impl PeekingNext<Item = char>) -> Result<Token> {
    line.next(); // Consume open quote
    let token_text: String = line.peeking_take_while(|&c| c != '\"').collect();

    // Check if there is a close quote and consume it if there is
    if line.next() != Some('\"') {
        return Err(GrammarErrorType::UnmatchedQuote);
    }
    if token_text.is_empty() {
        return Err(GrammarErrorType::EmptyTerminal);
    }

    Ok(Token::Terminal(token_text))
}

pub fn lex_nonterminal(line: &mut impl PeekingNext<Item = char>) -> Result<Token> {
    Ok(Token::Nonterminal(line.peeking_take_while(|&c| is_name_char(c)).collect()))
}

pub fn lex_arrow(line: &mut impl Iterator<Item = char>) -> Result<Token> {
    line.next(); // Consume dash
    match line.next() {
        Some('>') => Ok(Token::Arrow),
        _ => Err(GrammarErrorType::UnexpectedCharacter('-'))
    }
}

pub fn lex_line(line: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();

    let mut line_chars = line.chars().peekable();

    while let Some(&c) = line_chars.peek() {
        if c == '-' {
            tokens.push(lex_arrow(&mut line_chars)?);
        } else if c == '|' {
            line_chars.next();
            tokens.push(Token::Or);
        } else if c == '\"' {
            tokens.push(lex_terminal(&mut line_chars)?);
        } else if is_name_char(c) {
            tokens.push(lex_nonterminal(&mut line_chars)?);
        } else if c.is_whitespace() {
            line_chars.next();
        } else {
            return Err(GrammarErrorType::UnexpectedCharacter(c));
        }
    }

    Ok(tokens)
}
