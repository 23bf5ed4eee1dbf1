use itertools::Itertools as _;
use thiserror::Error;

use crate::{state::Phase, RuleId};

/// Errors raised while building a decision table.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GrammarError {
    #[error("the grammar has no rule")]
    EmptyGrammar,

    #[error("rule #{0} has no right-hand side symbol")]
    EmptyRule(RuleId),

    #[error("a rule with the same identifier already exists #{0}")]
    DuplicatedRule(RuleId),

    #[error("unknown symbol {0}")]
    UnknownSymbol(String),
}

pub type GrammarResult<T> = Result<T, GrammarError>;

/// A list of symbols, displayed as `a, b, c`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpectedSymbols<S>(Vec<S>);

impl<S> Default for ExpectedSymbols<S> {
    fn default() -> Self {
        Self(vec![])
    }
}

impl<S> std::ops::Deref for ExpectedSymbols<S> {
    type Target = [S];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S: Ord> FromIterator<S> for ExpectedSymbols<S> {
    /// Sorts and deduplicates the symbols.
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self(iter.into_iter().sorted().dedup().collect())
    }
}

impl<S: std::fmt::Display> std::fmt::Display for ExpectedSymbols<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0.is_empty() {
            return write!(f, "nothing");
        }
        self.0.iter().join(", ").fmt(f)
    }
}

/// The kinds of the stack tokens, bottom first, displayed as `a b c`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackKinds<S>(pub Vec<S>);

impl<S> std::ops::Deref for StackKinds<S> {
    type Target = [S];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S: std::fmt::Display> std::fmt::Display for StackKinds<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.iter().join(" ").fmt(f)
    }
}

/// The symbol found where another was expected, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Found<S>(pub Option<S>);

impl<S: std::fmt::Display> std::fmt::Display for Found<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.0 {
            Some(sym) => sym.fmt(f),
            None => write!(f, "nothing"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind<S> {
    #[error("unexpected end of stream")]
    StreamExhausted,

    #[error("cannot reduce, expecting {expected}, got {actual}")]
    ReductionMismatch {
        expected: ExpectedSymbols<S>,
        actual: Found<S>,
    },

    #[error("branch check failed, expecting {expected}, got {actual}")]
    BranchCheckMismatch { expected: S, actual: Found<S> },

    #[error("no applicable rule for {symbol}, expecting {expected}")]
    NoApplicableRule {
        symbol: Found<S>,
        expected: ExpectedSymbols<S>,
    },

    #[error("unfinished parse, stack settled on [{stack}]")]
    UnfinishedParse { stack: StackKinds<S> },
}

impl<S: Ord> ErrorKind<S> {
    pub fn reduction_mismatch<I>(expected: I, actual: Option<S>) -> Self
    where
        I: IntoIterator<Item = S>,
    {
        Self::ReductionMismatch {
            expected: expected.into_iter().collect(),
            actual: Found(actual),
        }
    }

    pub fn no_applicable_rule<I>(symbol: Option<S>, expected: I) -> Self
    where
        I: IntoIterator<Item = S>,
    {
        Self::NoApplicableRule {
            symbol: Found(symbol),
            expected: expected.into_iter().collect(),
        }
    }

    pub fn unfinished_parse<I>(stack: I) -> Self
    where
        I: IntoIterator<Item = S>,
    {
        Self::UnfinishedParse {
            stack: StackKinds(stack.into_iter().collect()),
        }
    }

    pub fn branch_check_mismatch(expected: S, actual: Option<S>) -> Self {
        Self::BranchCheckMismatch {
            expected,
            actual: Found(actual),
        }
    }
}

/// An error terminating one branch of the search.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("[{phase}] {kind}")]
pub struct ParseError<S> {
    /// Kind of error
    kind: ErrorKind<S>,
    /// Phase of the parse state when the error occurred
    phase: Phase,
    /// Position of the offending token in the stream.
    pub(crate) position: Option<usize>,
}

impl<S> ParseError<S> {
    pub fn new(kind: impl Into<ErrorKind<S>>, phase: Phase, position: Option<usize>) -> Self {
        Self {
            kind: kind.into(),
            phase,
            position,
        }
    }

    pub fn kind(&self) -> &ErrorKind<S> {
        &self.kind
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn position(&self) -> Option<usize> {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use crate::{state::Phase, Symbol};

    use super::{ErrorKind, ParseError};

    #[test]
    fn test_001_error_messages() {
        let err = ParseError::new(
            ErrorKind::reduction_mismatch([Symbol::term("n"), Symbol::nterm("T")], None),
            Phase::Reduce,
            None,
        );
        assert_eq!(err.to_string(), "[reduce] cannot reduce, expecting T, n, got nothing");

        let err = ParseError::new(
            ErrorKind::no_applicable_rule(Some(Symbol::eos()), [Symbol::term("id")]),
            Phase::Predict,
            Some(0),
        );
        assert_eq!(
            err.to_string(),
            "[predict] no applicable rule for <eos>, expecting id"
        );

        let kind = ErrorKind::unfinished_parse([Symbol::nterm("E"), Symbol::term("+")]);
        assert_eq!(kind.to_string(), "unfinished parse, stack settled on [E +]");
    }
}
