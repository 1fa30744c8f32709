//! Bottom-up chart parsing for ambiguous context-free grammars, with
//! extraction of minimal constituents such as noun phrase chunks.
//!
//! ```
//! use npchunk::{chunk, grammar, parser::Parser, preprocess::preprocess};
//!
//! let grammar = grammar::sentence_grammar().unwrap();
//! let tokens = preprocess("Holmes lit a pipe.");
//! let forest = Parser::new(&grammar).parse(&tokens).unwrap();
//! let tree = forest.trees().next().unwrap();
//!
//! let chunks: Vec<String> = chunk::noun_phrase_chunks(&tree)
//!     .iter()
//!     .map(|np| np.leaves().join(" "))
//!     .collect();
//! assert_eq!(chunks, vec!["holmes", "a pipe"]);
//! ```

pub mod chart;
pub mod chunk;
pub mod error_handling;
pub mod generator;
pub mod grammar;
pub mod parser;
pub mod preprocess;
pub mod tree;
