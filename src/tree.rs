/*
    Parse trees
*/

use std::fmt::{self, Display};

/// A parse tree. Every node owns its children, trees enumerated from the
/// same chart never share structure.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Tree {
    Leaf(String),
    Node { label: String, children: Vec<Tree> },
}

impl Tree {
    pub fn leaf(token: impl Into<String>) -> Tree {
        Tree::Leaf(token.into())
    }

    pub fn node(label: impl Into<String>, children: Vec<Tree>) -> Tree {
        debug_assert!(!children.is_empty(), "internal nodes have children");
        Tree::Node { label: label.into(), children }
    }

    /// The nonterminal of an internal node, `None` for leaves
    pub fn label(&self) -> Option<&str> {
        match self {
            Tree::Leaf(_) => None,
            Tree::Node { label, .. } => Some(label),
        }
    }

    pub fn children(&self) -> &[Tree] {
        match self {
            Tree::Leaf(_) => &[],
            Tree::Node { children, .. } => children,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Tree::Leaf(_))
    }

    /// Leaves have height 1, a node is one taller than its tallest child
    pub fn height(&self) -> usize {
        match self {
            Tree::Leaf(_) => 1,
            Tree::Node { children, .. } => 1 + children.iter().map(Tree::height).max().unwrap_or(0),
        }
    }

    /// Pre-order walk over this node and all of its descendants, leaves
    /// included. Each call starts over from this node.
    pub fn subtrees(&self) -> Subtrees<'_> {
        Subtrees { stack: vec![self] }
    }

    pub fn subtrees_matching<'a, P>(&'a self, predicate: P) -> std::iter::Filter<Subtrees<'a>, P>
        where P: FnMut(&&'a Tree) -> bool
    {
        self.subtrees().filter(predicate)
    }

    /// The tokens under this node from left to right
    pub fn leaves(&self) -> Vec<&str> {
        self.subtrees()
            .filter_map(|tree| match tree {
                Tree::Leaf(token) => Some(token.as_str()),
                Tree::Node { .. } => None,
            })
            .collect()
    }

    fn write_indented(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        write!(f, "{:width$}", "", width = depth * 2)?;
        match self {
            Tree::Leaf(token) => writeln!(f, "{}", token),
            Tree::Node { label, children } => {
                writeln!(f, "{}", label)?;
                children.iter().try_for_each(|child| child.write_indented(f, depth + 1))
            }
        }
    }
}

pub struct Subtrees<'a> {
    stack: Vec<&'a Tree>,
}

impl<'a> Iterator for Subtrees<'a> {
    type Item = &'a Tree;

    fn next(&mut self) -> Option<&'a Tree> {
        let tree = self.stack.pop()?;
        self.stack.extend(tree.children().iter().rev());
        Some(tree)
    }
}

// `(S (NP (N he)) (VP (V arrived)))`, or one node per line with `{:#}`
impl Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            return self.write_indented(f, 0);
        }
        match self {
            Tree::Leaf(token) => write!(f, "{}", token),
            Tree::Node { label, children } => {
                write!(f, "({}", label)?;
                for child in children {
                    write!(f, " {}", child)?;
                }
                write!(f, ")")
            }
        }
    }
}
