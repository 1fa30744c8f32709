/*
    This module compiles and stores context-free grammars
*/

mod builder;
mod lexer;
mod reader;
mod sentences;
mod verifier;

use std::collections::HashMap;
use std::fmt::Display;
use std::path::Path;

use crate::error_handling::*;
use reader::RuleLine;

pub use builder::GrammarBuilder;
pub use sentences::{sentence_grammar, NONTERMINALS, TERMINALS};

// The base unit in a grammar rule
#[derive(Debug, PartialEq, Eq, Clone, Hash)]
pub enum Symbol {
    Terminal(String),
    Nonterminal(String),
}

impl Symbol {
    pub fn name(&self) -> &str {
        match self {
            Symbol::Terminal(name) | Symbol::Nonterminal(name) => name,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Symbol::Terminal(_))
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Symbol::Terminal(value) => write!(f, "\"{}\"", value),
            Symbol::Nonterminal(name) => write!(f, "{}", name),
        }
    }
}

// The symbols in a single alternative
pub type Alternative = Vec<Symbol>;

// The alternatives of a rewrite rule
pub type Rewrite = Vec<Alternative>;

/// A single production `lhs -> rhs...`. The rhs is never empty.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Rule {
    pub lhs: String,
    pub rhs: Alternative,
}

impl Rule {
    /// The rhs nonterminal of a unit production such as `NP -> N`
    pub fn unit_target(&self) -> Option<&str> {
        match self.rhs.as_slice() {
            [Symbol::Nonterminal(name)] => Some(name),
            _ => None,
        }
    }
}

impl Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ->", self.lhs)?;
        for symbol in &self.rhs {
            write!(f, " {}", symbol)?;
        }
        Ok(())
    }
}

#[derive(Debug)]
pub enum GrammarErrorType {
    // A line which should contain a rule has no `->`
    MissingArrow,
    // A rule has more than one `->`
    UnexpectedArrow,
    // The line starts with something other than a nonterminal
    MissingNonterminal,
    // There is an unclosed quote
    UnmatchedQuote,
    // A character that is not part of the rule syntax
    UnexpectedCharacter(char),
    // An alternative without any symbols, as in `A -> | B`
    EmptyAlternative,
    // A quoted terminal with nothing inside
    EmptyTerminal,
    // A terminal rule whose alternative is not a single terminal
    ExpectedTerminal,
    // An undefined nonterminal was used on a right-hand side
    UndefinedNonterminal(String),
    // The start symbol has no rules
    UndefinedStart(String),
    // There are no rules at all
    EmptyGrammar,
    // There was an issue with reading a file
    FileError(std::io::Error),
}

impl ErrorType for GrammarErrorType {}

impl PartialEq for GrammarErrorType {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (GrammarErrorType::FileError(a), GrammarErrorType::FileError(b)) => a.kind() == b.kind(),
            (GrammarErrorType::UnexpectedCharacter(a), GrammarErrorType::UnexpectedCharacter(b)) => a == b,
            (GrammarErrorType::UndefinedNonterminal(a), GrammarErrorType::UndefinedNonterminal(b)) => a == b,
            (GrammarErrorType::UndefinedStart(a), GrammarErrorType::UndefinedStart(b)) => a == b,
            _ => std::mem::discriminant(self) == std::mem::discriminant(other),
        }
    }
}

impl Display for GrammarErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GrammarErrorType::MissingArrow => write!(f, "Expected `->` after nonterminal"),
            GrammarErrorType::UnexpectedArrow => write!(f, "Unexpected `->` encountered"),
            GrammarErrorType::MissingNonterminal => write!(f, "Tried to define something other than a nonterminal"),
            GrammarErrorType::UnmatchedQuote => write!(f, "Unmatched quotes"),
            GrammarErrorType::UnexpectedCharacter(c) => write!(f, "Unexpected character `{}`", c),
            GrammarErrorType::EmptyAlternative => write!(f, "Alternative has no symbols"),
            GrammarErrorType::EmptyTerminal => write!(f, "Terminals cannot be empty"),
            GrammarErrorType::ExpectedTerminal => write!(f, "Terminal rules may only rewrite to a single quoted terminal"),
            GrammarErrorType::UndefinedNonterminal(nonterminal) => write!(f, "Could not find definition for `{}`", nonterminal),
            GrammarErrorType::UndefinedStart(start) => write!(f, "Start symbol `{}` has no rules", start),
            GrammarErrorType::EmptyGrammar => write!(f, "Grammar has no rules"),
            GrammarErrorType::FileError(e) => write!(f, "File error: {}", e),
        }
    }
}

pub type GrammarError = Error<GrammarErrorType>;
pub type GrammarErrors = Errors<GrammarErrorType>;

pub type Result<T> = std::result::Result<T, GrammarErrorType>;
pub type LineResult<T> = std::result::Result<T, GrammarError>;
pub type GrammarResult<T> = std::result::Result<T, GrammarErrors>;

/// An immutable, validated set of rules with a start nonterminal.
/// Rules keep their declaration order.
#[derive(Debug, PartialEq, Clone)]
pub struct Grammar {
    start: String,
    rules: Vec<Rule>,
    by_lhs: HashMap<String, Vec<usize>>,
}

impl Grammar {
    /// Compiles a grammar from two rule texts. Terminal rules may only
    /// rewrite to single quoted terminals; nonterminal rules come first in
    /// declaration order.
    pub fn compile(terminal_rules: &str, nonterminal_rules: &str, start: &str) -> GrammarResult<Grammar> {
        let terminal_lines = reader::read_rules(terminal_rules, "terminals");
        let nonterminal_lines = reader::read_rules(nonterminal_rules, "nonterminals");

        match (nonterminal_lines, terminal_lines) {
            (Ok(nonterminals), Ok(terminals)) => {
                let errors = verifier::verify_terminal_rules(&terminals);
                if !errors.is_empty() {
                    return Err(errors);
                }
                grammar_from_lines(nonterminals.into_iter().chain(terminals).collect(), start, "grammar")
            }
            (nonterminals, terminals) => {
                Err(nonterminals.err().into_iter().chain(terminals.err()).flatten().collect())
            }
        }
    }

    /// Compiles a single rule text. The start symbol defaults to the
    /// left-hand side of the first rule.
    pub fn from_text(text: &str, source: &str, start: Option<&str>) -> GrammarResult<Grammar> {
        let lines = reader::read_rules(text, source)?;
        let start = match start {
            Some(start) => start.to_string(),
            None => first_lhs(&lines),
        };
        grammar_from_lines(lines, &start, source)
    }

    pub fn from_file(path: &Path, start: Option<&str>) -> GrammarResult<Grammar> {
        let source = path.display().to_string();
        let text = std::fs::read_to_string(path).map_err(|e| vec![GrammarError {
            location: Location::new(source.clone(), 0),
            error: GrammarErrorType::FileError(e)
        }])?;
        Grammar::from_text(&text, &source, start)
    }

    pub fn start(&self) -> &str {
        &self.start
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// All rules with the given left-hand side, in declaration order
    pub fn rules_for<'a>(&'a self, lhs: &str) -> impl Iterator<Item = &'a Rule> + 'a {
        self.by_lhs
            .get(lhs)
            .into_iter()
            .flatten()
            .map(move |&index| &self.rules[index])
    }

    /// Nonterminals in order of their first rule
    pub fn nonterminals(&self) -> impl Iterator<Item = &str> {
        let mut seen = std::collections::HashSet::new();
        self.rules
            .iter()
            .map(|rule| rule.lhs.as_str())
            .filter(move |lhs| seen.insert(*lhs))
    }

    pub fn is_nonterminal(&self, name: &str) -> bool {
        self.by_lhs.contains_key(name)
    }

    /// Whether an input token matches a terminal symbol. Tokens arrive
    /// already normalized so this is an exact comparison.
    pub fn is_terminal_value(&self, token: &str, terminal: &Symbol) -> bool {
        match terminal {
            Symbol::Terminal(value) => value == token,
            Symbol::Nonterminal(_) => false,
        }
    }
}

fn first_lhs(lines: &[RuleLine]) -> String {
    lines.first().map(|line| line.symbol.clone()).unwrap_or_default()
}

// Validates rule lines and flattens their alternatives into rules
fn grammar_from_lines(lines: Vec<RuleLine>, start: &str, source: &str) -> GrammarResult<Grammar> {
    verifier::verify_rules(&lines, start, source)?;

    let mut rules = Vec::new();
    let mut by_lhs = HashMap::<String, Vec<usize>>::new();
    for line in lines {
        for rhs in line.rewrite {
            let rule = Rule { lhs: line.symbol.clone(), rhs };
            // A repeated rule would only repeat its trees
            if rules.contains(&rule) {
                continue;
            }
            by_lhs.entry(line.symbol.clone()).or_default().push(rules.len());
            rules.push(rule);
        }
    }

    log::debug!("compiled grammar with {} rules, start symbol `{}`", rules.len(), start);

    Ok(Grammar {
        start: start.to_string(),
        rules,
        by_lhs
    })
}
