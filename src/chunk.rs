/*
    Extracts minimal constituents, such as noun phrase chunks, from trees
*/

use crate::tree::Tree;

pub const NOUN_PHRASE: &str = "NP";

// label -> direct children -> tokens
const CHUNK_HEIGHT: usize = 3;

/// Every subtree labeled `target_label` with height 3, in pre-order. A node
/// of that height cannot hold a nested node of the same label, so these are
/// exactly the innermost occurrences.
pub fn extract<'t>(tree: &'t Tree, target_label: &str) -> Vec<&'t Tree> {
    tree.subtrees_matching(|subtree| subtree.label() == Some(target_label) && subtree.height() == CHUNK_HEIGHT)
        .collect()
}

pub fn noun_phrase_chunks(tree: &Tree) -> Vec<&Tree> {
    extract(tree, NOUN_PHRASE)
}
