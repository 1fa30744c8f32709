/*
    This module parses token sequences into every tree the grammar allows
*/

use std::fmt::Display;
use std::iter;

use log::debug;

use crate::chart::{Chart, Child, Edge};
use crate::grammar::{Grammar, Symbol};
use crate::tree::Tree;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ParseError {
    // There were no tokens to parse
    EmptyInput,
}

impl Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::EmptyInput => write!(f, "Cannot parse an empty sentence"),
        }
    }
}

impl std::error::Error for ParseError {}

/// Parses token sequences with a shared, read-only grammar. Every call to
/// `parse` builds its own chart.
#[derive(Debug, Clone, Copy)]
pub struct Parser<'g> {
    grammar: &'g Grammar,
}

impl<'g> Parser<'g> {
    pub fn new(grammar: &'g Grammar) -> Self {
        Parser { grammar }
    }

    /// Builds the chart for `tokens`. Not finding a derivation is not an
    /// error: the returned forest is simply empty.
    pub fn parse<S: AsRef<str>>(&self, tokens: &[S]) -> Result<Forest<'g>, ParseError> {
        if tokens.is_empty() {
            return Err(ParseError::EmptyInput);
        }

        let chart = Chart::build(self.grammar, tokens);
        let forest = Forest { chart };
        debug!(
            "parsed {} tokens, derivation for `{}`: {}",
            tokens.len(),
            self.grammar.start(),
            forest.has_derivation()
        );
        Ok(forest)
    }
}

/// All parses of one token sequence, enumerated on demand from the chart
#[derive(Debug)]
pub struct Forest<'g> {
    chart: Chart<'g>,
}

impl<'g> Forest<'g> {
    pub fn has_derivation(&self) -> bool {
        self.chart.contains(0, self.chart.len(), self.chart.grammar().start())
    }

    pub fn tokens(&self) -> &[String] {
        self.chart.tokens()
    }

    pub fn chart(&self) -> &Chart<'g> {
        &self.chart
    }

    /// Lazily yields every tree rooted at the start symbol covering all
    /// tokens. Order follows rule declaration order and split points, and is
    /// the same on every call.
    pub fn trees(&self) -> Trees<'_> {
        let start = self.chart.grammar().start();
        Trees {
            inner: entry_trees(&self.chart, 0, self.chart.len(), start, Vec::new()),
        }
    }
}

type Lazy<'c, T> = Box<dyn Iterator<Item = T> + 'c>;

pub struct Trees<'c> {
    inner: Lazy<'c, Tree>,
}

impl Iterator for Trees<'_> {
    type Item = Tree;

    fn next(&mut self) -> Option<Tree> {
        self.inner.next()
    }
}

// `expanding` holds the labels already being expanded over this same span
// through unit edges, a derivation never loops back into one of them
fn entry_trees<'c>(chart: &'c Chart<'c>, start: usize, end: usize, label: &'c str, mut expanding: Vec<&'c str>) -> Lazy<'c, Tree> {
    if expanding.contains(&label) {
        return Box::new(iter::empty());
    }
    expanding.push(label);

    Box::new(chart.edges(start, end, label).iter().flat_map(move |edge| edge_trees(chart, edge, &expanding)))
}

fn edge_trees<'c>(chart: &'c Chart<'c>, edge: &'c Edge<'c>, expanding: &[&'c str]) -> Lazy<'c, Tree> {
    let rule = edge.rule;
    let inherited = if rule.unit_target().is_some() { expanding.to_vec() } else { Vec::new() };

    Box::new(
        children_trees(chart, &rule.rhs, &edge.children, inherited)
            .map(move |children| Tree::node(rule.lhs.as_str(), children))
    )
}

// Cartesian product over the children, leftmost child varying slowest. The
// tail is re-enumerated for every head so nothing is materialized up front.
fn children_trees<'c>(chart: &'c Chart<'c>, rhs: &'c [Symbol], children: &'c [Child], expanding: Vec<&'c str>) -> Lazy<'c, Vec<Tree>> {
    let (Some((symbol, rest_rhs)), Some((&child, rest))) = (rhs.split_first(), children.split_first()) else {
        return Box::new(iter::once(Vec::new()));
    };

    let heads = child_trees(chart, symbol, child, expanding.clone());
    Box::new(heads.flat_map(move |head| {
        children_trees(chart, rest_rhs, rest, expanding.clone()).map(move |mut tail| {
            tail.insert(0, head.clone());
            tail
        })
    }))
}

fn child_trees<'c>(chart: &'c Chart<'c>, symbol: &'c Symbol, child: Child, expanding: Vec<&'c str>) -> Lazy<'c, Tree> {
    match child {
        Child::Token(position) => Box::new(iter::once(Tree::leaf(chart.tokens()[position].as_str()))),
        Child::Entry { start, end } => entry_trees(chart, start, end, symbol.name(), expanding),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::grammar::{sentence_grammar, GrammarBuilder, NONTERMINALS, TERMINALS};

    fn grammar(text: &str) -> Grammar {
        Grammar::from_text(text, "inline", None).unwrap()
    }

    fn tokens(sentence: &str) -> Vec<&str> {
        sentence.split_whitespace().collect()
    }

    fn parse_all(grammar: &Grammar, sentence: &str) -> Vec<Tree> {
        Parser::new(grammar).parse(&tokens(sentence)).unwrap().trees().collect()
    }

    #[test]
    fn single_parse() {
        let grammar = grammar("S -> NP VP\nNP -> \"he\"\nVP -> \"arrived\"");
        let trees = parse_all(&grammar, "he arrived");

        assert_eq!(trees, vec![Tree::node("S", vec![
            Tree::node("NP", vec![Tree::leaf("he")]),
            Tree::node("VP", vec![Tree::leaf("arrived")]),
        ])]);
    }

    #[test]
    fn verb_attachment_is_ambiguous() {
        // `VP -> V NP` next to `VP -> VP NP` gives two ways to attach the object
        let nonterminals = format!("{}VP -> V NP\n", NONTERMINALS);
        let grammar = Grammar::compile(TERMINALS, &nonterminals, "S").unwrap();
        let trees = parse_all(&grammar, "he lit the pipe and smiled");

        let rendered: Vec<String> = trees.iter().map(Tree::to_string).collect();
        assert_eq!(rendered, vec![
            "(S (NP (N he)) (VP (VP (VP (V lit)) (NP (Det the) (N pipe))) (Conj and) (VP (V smiled))))",
            "(S (NP (N he)) (VP (VP (V lit) (NP (Det the) (N pipe))) (Conj and) (VP (V smiled))))",
        ]);
    }

    #[test]
    fn conjunction_scope_is_ambiguous() {
        let grammar = sentence_grammar().unwrap();
        let trees = parse_all(&grammar, "she never said a word until we were at the door here");

        assert_eq!(trees.len(), 2);
        assert_ne!(trees[0], trees[1]);
        assert_eq!(
            trees[0].to_string(),
            "(S (S (NP (N she)) (VP (VP (ADP (Adv never) (VP (V said)))) (NP (Det a) (N word)))) \
             (Conj until) \
             (S (NP (N we)) (VP (ADP (VP (VP (V were)) (NP (P at) (NP (Det the) (N door)))) (Adv here)))))"
        );
    }

    #[test]
    fn conjoined_verb_phrases_multiply() {
        let grammar = sentence_grammar().unwrap();
        let sentence = "i had a country walk on thursday and came home in a dreadful mess";
        assert_eq!(parse_all(&grammar, sentence).len(), 3);
        assert_eq!(parse_all(&grammar, "holmes sat down and lit his pipe").len(), 2);
    }

    #[test]
    fn unknown_word_has_no_parse() {
        let grammar = sentence_grammar().unwrap();
        let forest = Parser::new(&grammar).parse(&tokens("holmes sat xyz")).unwrap();

        assert!(!forest.has_derivation());
        assert_eq!(forest.trees().count(), 0);
    }

    #[test]
    fn ungrammatical_sentence_has_no_parse() {
        let grammar = sentence_grammar().unwrap();
        assert!(parse_all(&grammar, "the the the").is_empty());
    }

    #[test]
    fn empty_input_is_an_error() {
        let grammar = sentence_grammar().unwrap();
        let empty: [&str; 0] = [];
        assert_eq!(Parser::new(&grammar).parse(&empty).unwrap_err(), ParseError::EmptyInput);
    }

    #[test]
    fn leaves_and_root_match_input() {
        let grammar = sentence_grammar().unwrap();
        for sentence in [
            "holmes sat",
            "holmes lit a pipe",
            "we arrived the day before thursday",
            "holmes sat in the red armchair and he chuckled",
            "my companion smiled an enigmatical smile",
            "holmes chuckled to himself",
            "she never said a word until we were at the door here",
        ] {
            let trees = parse_all(&grammar, sentence);
            assert!(!trees.is_empty(), "no parse for {:?}", sentence);
            for tree in trees {
                assert_eq!(tree.label(), Some("S"));
                assert_eq!(tree.leaves(), tokens(sentence));
            }
        }
    }

    #[test]
    fn enumeration_is_repeatable() {
        let grammar = sentence_grammar().unwrap();
        let parser = Parser::new(&grammar);
        let sentence = tokens("holmes sat in the red armchair and he chuckled");

        let forest = parser.parse(&sentence).unwrap();
        let first: Vec<Tree> = forest.trees().collect();
        let second: Vec<Tree> = forest.trees().collect();
        let reparsed: Vec<Tree> = parser.parse(&sentence).unwrap().trees().collect();

        assert_eq!(first, second);
        assert_eq!(first, reparsed);
    }

    #[test]
    fn independent_ambiguities_multiply() {
        // Each `x` is an A in two ways, three of them give 2 * 2 * 2 parses
        let grammar = GrammarBuilder::default()
            .rule("S", &["A", "A", "A"])
            .rule("A", &["B"])
            .rule("A", &["C"])
            .terminal("B", "x")
            .terminal("C", "x")
            .into_grammar("S")
            .unwrap();
        let trees = parse_all(&grammar, "x x x");

        assert_eq!(trees.len(), 8);
        assert_eq!(trees.iter().collect::<HashSet<_>>().len(), 8);
        // Declaration order, rightmost choice varying fastest
        assert_eq!(trees[0].to_string(), "(S (A (B x)) (A (B x)) (A (B x)))");
        assert_eq!(trees[1].to_string(), "(S (A (B x)) (A (B x)) (A (C x)))");
        assert_eq!(trees[7].to_string(), "(S (A (C x)) (A (C x)) (A (C x)))");
    }

    #[test]
    fn split_ambiguity_counts_bracketings() {
        // Catalan numbers: 1, 1, 2, 5, 14
        let grammar = grammar("X -> X X | \"a\"");
        for (n, expected) in [(1, 1), (2, 1), (3, 2), (4, 5), (5, 14)] {
            let sentence = vec!["a"; n].join(" ");
            assert_eq!(parse_all(&grammar, &sentence).len(), expected);
        }
    }

    #[test]
    fn enumeration_is_lazy() {
        // 2^40 parses, only the first few are ever built
        let mut builder = GrammarBuilder::default();
        let names: Vec<String> = (0..40).map(|i| format!("S{}", i)).collect();
        builder = builder.rule("S", &names);
        for name in &names {
            builder = builder.rule(name.as_str(), &["B"]).rule(name.as_str(), &["C"]);
        }
        let grammar = builder.terminal("B", "x").terminal("C", "x").into_grammar("S").unwrap();

        let sentence = vec!["x"; 40];
        let forest = Parser::new(&grammar).parse(&sentence).unwrap();
        assert_eq!(forest.trees().take(3).count(), 3);
    }

    #[test]
    fn unit_cycles_yield_finite_trees() {
        let grammar = grammar("A -> B | \"x\"\nB -> A");
        let trees = parse_all(&grammar, "x");

        assert_eq!(trees, vec![Tree::node("A", vec![Tree::leaf("x")])]);
        let b_trees: Vec<Tree> = Parser::new(&Grammar::from_text("B -> A\nA -> B | \"x\"", "inline", None).unwrap())
            .parse(&["x"])
            .unwrap()
            .trees()
            .collect();
        assert_eq!(b_trees, vec![Tree::node("B", vec![Tree::node("A", vec![Tree::leaf("x")])])]);
    }

    #[test]
    fn unit_rules_enumerate_in_declaration_order() {
        let grammar = grammar("S -> A | B B\nA -> B B\nB -> \"x\"");
        let trees: Vec<String> = parse_all(&grammar, "x x").iter().map(Tree::to_string).collect();

        assert_eq!(trees, vec!["(S (A (B x) (B x)))", "(S (B x) (B x))"]);
    }

    #[test]
    fn duplicate_rules_yield_one_tree() {
        let grammar = grammar("S -> A\nS -> A\nA -> \"x\"");
        let trees = parse_all(&grammar, "x");

        assert_eq!(trees, vec![Tree::node("S", vec![Tree::node("A", vec![Tree::leaf("x")])])]);
    }

    #[test]
    fn forest_exposes_tokens_and_chart() {
        let grammar = sentence_grammar().unwrap();
        let forest = Parser::new(&grammar).parse(&["holmes", "sat"]).unwrap();

        assert_eq!(forest.tokens(), ["holmes", "sat"]);
        assert_eq!(forest.chart().labels(0, 1), vec!["NP", "N"]);
        assert_eq!(forest.chart().labels(1, 2), vec!["VP", "V"]);
        assert!(forest.chart().contains(0, 2, "S"));
        assert!(forest.has_derivation());
    }

    #[test]
    fn parser_shares_grammar_across_threads() {
        let grammar = sentence_grammar().unwrap();
        let counts: Vec<usize> = std::thread::scope(|scope| {
            let handles: Vec<_> = ["holmes sat", "he lit the pipe and smiled"]
                .into_iter()
                .map(|sentence| {
                    let grammar = &grammar;
                    scope.spawn(move || Parser::new(grammar).parse(&tokens(sentence)).unwrap().trees().count())
                })
                .collect();
            handles.into_iter().map(|handle| handle.join().unwrap()).collect()
        });

        assert_eq!(counts[0], 1);
        assert!(counts[1] >= 2);
    }
}
