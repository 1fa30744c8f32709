use super::reader::RuleLine;
use super::{grammar_from_lines, Grammar, GrammarResult, Symbol};
use crate::error_handling::Location;

const SOURCE: &str = "builder";

/// Builds a Grammar in memory, as an alternative to the rule text format.
/// Validation is the same as for text: undefined nonterminals and a
/// missing start symbol are reported by `into_grammar`.
///
/// ```
/// use npchunk::grammar::GrammarBuilder;
///
/// let grammar = GrammarBuilder::default()
///     .rule("S", &["NP", "VP"])
///     .terminal("NP", "he")
///     .terminal("VP", "arrived")
///     .into_grammar("S")
///     .unwrap();
/// assert_eq!(grammar.rules().len(), 3);
/// ```
#[derive(Default)]
pub struct GrammarBuilder {
    lines: Vec<RuleLine>,
}

impl GrammarBuilder {
    fn push(&mut self, lhs: &str, rhs: Vec<Symbol>) {
        // Each call counts as a line so errors point at the offending call
        let location = Location::new(SOURCE, self.lines.len() + 1);
        self.lines.push(RuleLine {
            symbol: lhs.to_string(),
            rewrite: vec![rhs],
            location
        });
    }

    /// Registers `lhs -> "value"`
    pub fn terminal(mut self, lhs: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.push(lhs.as_ref(), vec![Symbol::Terminal(value.into())]);
        self
    }

    /// Registers `lhs -> rhs...` where every rhs name is a nonterminal
    pub fn rule<S, S2>(mut self, lhs: S, rhs: &[S2]) -> Self
        where S: AsRef<str>, S2: AsRef<str>
    {
        let rhs = rhs.iter().map(|name| Symbol::Nonterminal(name.as_ref().to_string())).collect();
        self.push(lhs.as_ref(), rhs);
        self
    }

    pub fn into_grammar(self, start: impl AsRef<str>) -> GrammarResult<Grammar> {
        grammar_from_lines(self.lines, start.as_ref(), SOURCE)
    }
}
