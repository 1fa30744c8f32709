/*
    Turns a raw sentence into the tokens the parser consumes
*/

use itertools::Itertools;

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '\'' || c == '-'
}

/// Splits on whitespace and separates punctuation from words. Every
/// punctuation character is its own token.
pub fn tokenize(sentence: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut chars = sentence.chars().peekable();

    while let Some(&c) = chars.peek() {
        if is_word_char(c) {
            tokens.push(chars.peeking_take_while(|&c| is_word_char(c)).collect());
        } else {
            chars.next();
            if !c.is_whitespace() {
                tokens.push(c.to_string());
            }
        }
    }

    tokens
}

/// Lowercases every token and drops the ones without an alphabetic character
pub fn preprocess(sentence: &str) -> Vec<String> {
    tokenize(sentence)
        .into_iter()
        .map(|token| token.to_lowercase())
        .filter(|token| token.chars().any(char::is_alphabetic))
        .collect()
}
