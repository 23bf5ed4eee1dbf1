use crate::{traits::Symbol, ParseError, ParseTree};

/// The outcome of one branch.
///
/// The forest is the branch's stack popped from the top: a single tree when
/// the branch is accepted, whatever was left otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseResult<S> {
    pub forest: Vec<ParseTree<S>>,
    pub error: Option<ParseError<S>>,
}

impl<S: Symbol> ParseResult<S> {
    pub fn is_accepted(&self) -> bool {
        self.error.is_none()
    }

    pub fn error(&self) -> Option<&ParseError<S>> {
        self.error.as_ref()
    }

    /// The tree of an accepted branch.
    pub fn tree(&self) -> Option<&ParseTree<S>> {
        match self.forest.as_slice() {
            [tree] if self.is_accepted() => Some(tree),
            _ => None,
        }
    }

    pub fn into_forest(self) -> Vec<ParseTree<S>> {
        self.forest
    }
}

/// The overall outcome of a search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict<S> {
    /// Exactly one distinct tree was accepted.
    Accepted(ParseTree<S>),
    /// Several distinct trees were accepted.
    Ambiguous(Vec<ParseTree<S>>),
    /// Every branch failed, one error per branch.
    Rejected(Vec<ParseError<S>>),
}

impl<S: Symbol> Verdict<S> {
    /// Folds the results of a search.
    pub fn from_results<I>(results: I) -> Self
    where
        I: IntoIterator<Item = ParseResult<S>>,
    {
        let mut trees: Vec<ParseTree<S>> = vec![];
        let mut errors = vec![];

        for result in results {
            match result.error {
                Some(err) => errors.push(err),
                None => {
                    if let Some(tree) = result.forest.into_iter().next() {
                        if !trees.contains(&tree) {
                            trees.push(tree);
                        }
                    }
                }
            }
        }

        match trees.len() {
            0 => Self::Rejected(errors),
            1 => Self::Accepted(trees.remove(0)),
            _ => Self::Ambiguous(trees),
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }

    pub fn is_ambiguous(&self) -> bool {
        matches!(self, Self::Ambiguous(_))
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }
}
