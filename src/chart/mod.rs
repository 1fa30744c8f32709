/*
    This module builds the parse chart: for every span of the input, the
    nonterminals deriving it and the edges that justify them
*/

use std::collections::HashMap;

use log::trace;

use crate::grammar::{Grammar, Rule, Symbol};

// One slot of an edge: either the token at a position or the completed
// entry for the rule's rhs symbol over a sub-span
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Child {
    Token(usize),
    Entry { start: usize, end: usize },
}

/// A single rule application witnessing a chart entry. `children` lines up
/// with `rule.rhs`, `rule_index` is the rule's position in `Grammar::rules`.
#[derive(Debug, PartialEq)]
pub struct Edge<'g> {
    pub rule: &'g Rule,
    pub rule_index: usize,
    pub children: Vec<Child>,
}

type Cell<'g> = HashMap<&'g str, Vec<Edge<'g>>>;

#[derive(Debug)]
pub struct Chart<'g> {
    grammar: &'g Grammar,
    tokens: Vec<String>,
    // Indexed by `start * (len + 1) + end`
    cells: Vec<Cell<'g>>,
}

impl<'g> Chart<'g> {
    /// Completes every span of `tokens`, shortest spans first
    pub fn build<S: AsRef<str>>(grammar: &'g Grammar, tokens: &[S]) -> Chart<'g> {
        let n = tokens.len();
        let mut chart = Chart {
            grammar,
            tokens: tokens.iter().map(|token| token.as_ref().to_string()).collect(),
            cells: (0..(n + 1) * (n + 1)).map(|_| Cell::new()).collect(),
        };

        let units: Vec<(usize, &'g Rule)> = grammar.rules()
            .iter()
            .enumerate()
            .filter(|(_, rule)| rule.unit_target().is_some())
            .collect();

        for length in 1..=n {
            for start in 0..=n - length {
                chart.complete_span(start, start + length, &units);
            }
        }

        chart
    }

    fn index(&self, start: usize, end: usize) -> usize {
        start * (self.tokens.len() + 1) + end
    }

    fn complete_span(&mut self, start: usize, end: usize, units: &[(usize, &'g Rule)]) {
        let grammar = self.grammar;
        let mut cell = Cell::new();

        // Rules longer than one symbol only look at narrower spans, which are
        // already complete
        for (rule_index, rule) in grammar.rules().iter().enumerate() {
            if rule.unit_target().is_some() {
                continue;
            }
            let mut partitions = Vec::new();
            self.partitions(&rule.rhs, start, end, &mut Vec::new(), &mut partitions);
            for children in partitions {
                cell.entry(rule.lhs.as_str()).or_default().push(Edge { rule, rule_index, children });
            }
        }

        close_units(&mut cell, units, start, end);

        // Edges follow rule declaration order, split points order edges of
        // the same rule
        for edges in cell.values_mut() {
            edges.sort_by_key(|edge| edge.rule_index);
        }

        if !cell.is_empty() {
            trace!("[{}, {}) {:?}", start, end, cell.keys().collect::<Vec<_>>());
        }
        let index = self.index(start, end);
        self.cells[index] = cell;
    }

    // Every way of covering [start, end) with `rhs`, one non-empty sub-span
    // per symbol, in lexicographic order of split points
    fn partitions(&self, rhs: &[Symbol], start: usize, end: usize, prefix: &mut Vec<Child>, out: &mut Vec<Vec<Child>>) {
        let Some((symbol, rest)) = rhs.split_first() else {
            if start == end {
                out.push(prefix.clone());
            }
            return;
        };
        if end - start < rhs.len() {
            return;
        }

        // The last symbol has to reach the end of the span
        let first_split = if rest.is_empty() { end } else { start + 1 };
        for split in first_split..=end - rest.len() {
            if let Some(child) = self.match_symbol(symbol, start, split) {
                prefix.push(child);
                self.partitions(rest, split, end, prefix, out);
                prefix.pop();
            }
        }
    }

    fn match_symbol(&self, symbol: &Symbol, start: usize, end: usize) -> Option<Child> {
        match symbol {
            Symbol::Terminal(_) => {
                let matches = end == start + 1 && self.grammar.is_terminal_value(&self.tokens[start], symbol);
                matches.then_some(Child::Token(start))
            }
            Symbol::Nonterminal(name) => {
                self.contains(start, end, name).then_some(Child::Entry { start, end })
            }
        }
    }

    pub fn grammar(&self) -> &'g Grammar {
        self.grammar
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Number of input tokens
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Whether `label` derives tokens[start..end]
    pub fn contains(&self, start: usize, end: usize, label: &str) -> bool {
        !self.edges(start, end, label).is_empty()
    }

    /// The edges of an entry in rule declaration order
    pub fn edges(&self, start: usize, end: usize, label: &str) -> &[Edge<'g>] {
        if start >= end || end > self.tokens.len() {
            return &[];
        }
        self.cells[self.index(start, end)]
            .get(label)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Nonterminals completed over [start, end), in grammar order
    pub fn labels(&self, start: usize, end: usize) -> Vec<&'g str> {
        self.grammar
            .nonterminals()
            .filter(|label| self.contains(start, end, label))
            .collect()
    }
}

// Unit productions `A -> B` over one span. Each unit rule adds at most one
// edge per span, so cycles such as `A -> B`, `B -> A` reach a fixed point.
fn close_units<'g>(cell: &mut Cell<'g>, units: &[(usize, &'g Rule)], start: usize, end: usize) {
    let mut added = vec![false; units.len()];
    loop {
        let mut changed = false;
        for (done, &(rule_index, rule)) in added.iter_mut().zip(units) {
            let Some(target) = rule.unit_target() else { continue };
            if !*done && cell.contains_key(target) {
                cell.entry(rule.lhs.as_str()).or_default().push(Edge {
                    rule,
                    rule_index,
                    children: vec![Child::Entry { start, end }],
                });
                *done = true;
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }
}
