use crate::{traits::Symbol, Token};

/// A parse tree, rooted at a stack token.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(transparent))]
pub struct ParseTree<S>(Token<S>);

impl<S> From<Token<S>> for ParseTree<S> {
    fn from(root: Token<S>) -> Self {
        Self(root)
    }
}

impl<S: Symbol> ParseTree<S> {
    pub fn root(&self) -> &Token<S> {
        &self.0
    }

    pub fn into_root(self) -> Token<S> {
        self.0
    }

    pub fn kind(&self) -> S {
        self.0.kind
    }

    /// Walks the tree in pre-order.
    pub fn walk(&self) -> Walk<'_, S> {
        Walk {
            stack: vec![(0, &self.0)],
        }
    }

    /// The leaves, from the left to the right.
    ///
    /// For a complete tree these are the shifted tokens, in stream order.
    pub fn leaves(&self) -> impl Iterator<Item = &Token<S>> {
        self.walk()
            .filter(|(_, node)| node.is_leaf())
            .map(|(_, node)| node)
    }
}

/// Pre-order iterator over a tree, yields each node with its depth.
pub struct Walk<'a, S> {
    stack: Vec<(usize, &'a Token<S>)>,
}

impl<'a, S> Iterator for Walk<'a, S> {
    type Item = (usize, &'a Token<S>);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, node) = self.stack.pop()?;
        self.stack
            .extend(node.children.iter().rev().map(|child| (depth + 1, child)));
        Some((depth, node))
    }
}

impl<S: Symbol> std::fmt::Display for ParseTree<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (depth, node) in self.walk() {
            write!(f, "{:indent$}{}", "", node.kind, indent = depth * 2)?;

            if node.is_leaf() && node.value != node.kind.to_string() {
                write!(f, " {:?}", node.value)?;
            }

            writeln!(f)?;
        }

        Ok(())
    }
}
