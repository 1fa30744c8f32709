/*
    The built-in grammar for short English sentences
*/

use super::{Grammar, GrammarResult};

pub const TERMINALS: &str = r#"
Adj -> "country" | "dreadful" | "enigmatical" | "little" | "moist" | "red"
Adv -> "down" | "here" | "never"
Conj -> "and" | "until"
Det -> "a" | "an" | "his" | "my" | "the"
N -> "armchair" | "companion" | "day" | "door" | "hand" | "he" | "himself"
N -> "holmes" | "home" | "i" | "mess" | "paint" | "palm" | "pipe" | "she"
N -> "smile" | "thursday" | "walk" | "we" | "word"
P -> "at" | "before" | "in" | "of" | "on" | "to"
V -> "arrived" | "came" | "chuckled" | "had" | "lit" | "said" | "sat"
V -> "smiled" | "tell" | "were"
"#;

pub const NONTERMINALS: &str = r#"
S -> NP VP | S Conj S
AJP -> Adj NP
ADP -> VP Adv | Adv VP
NP -> N | Det N | Det AJP | AJP | P NP
VP -> V | VP NP | VP Conj VP | ADP
"#;

/// Compiles the built-in sentence grammar, rooted at `S`
pub fn sentence_grammar() -> GrammarResult<Grammar> {
    Grammar::compile(TERMINALS, NONTERMINALS, "S")
}
