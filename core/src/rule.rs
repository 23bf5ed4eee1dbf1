use std::{
    collections::BTreeSet,
    hash::Hash,
    rc::Rc,
};

use itertools::Itertools;

use crate::{traits::Symbol, GrammarError, GrammarResult};

/// The rule's identifier in the grammar.
pub type RuleId = usize;

#[derive(Debug, Clone, Eq, PartialEq)]
/// A grammar rule
///
/// # Example
/// A -> w <eos>
pub struct Rule<S> {
    pub id: RuleId,
    pub lhs: S,
    pub rhs: Vec<S>,
}

impl<S: std::fmt::Display> std::fmt::Display for Rule<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({}) {} => {}",
            self.id,
            self.lhs,
            self.rhs.iter().map(|s| s.to_string()).join(" ")
        )
    }
}

impl<S: Hash> Hash for Rule<S> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.lhs.hash(state);
        self.rhs.hash(state);
    }
}

impl<S: Symbol> Rule<S> {
    pub fn new<I>(id: RuleId, lhs: S, rhs: I) -> Self
    where
        I: IntoIterator<Item = S>,
    {
        Self {
            id,
            lhs,
            rhs: rhs.into_iter().collect(),
        }
    }

    /// Check the rules contains a certain symbol in its RHS.
    #[inline(always)]
    pub fn contains(&self, sym: &S) -> bool {
        self.rhs.contains(sym)
    }

    /// The rule ends with the end-marker.
    pub fn is_terminating(&self) -> bool {
        self.rhs.last().map(S::is_eos).unwrap_or(false)
    }
}

/// Builds a list of rules, identifiers are given in declaration order.
///
/// # Example
/// ```ignore
/// let rules = rules! {
///     Sym::Source => Sym::Rule, Sym::Eof;
///     Sym::Rule => Sym::Id
/// };
/// ```
#[macro_export]
macro_rules! rules {
    ($($lhs:expr => $($rhs:expr),+);+ $(;)?) => {
        vec![$(($lhs, vec![$($rhs),+])),+]
            .into_iter()
            .enumerate()
            .map(|(id, (lhs, rhs))| $crate::Rule::new(id, lhs, rhs))
            .collect::<Vec<_>>()
    };
}

/// A validated set of rules, sorted by identifier.
///
/// The first rule defines the start symbol.
#[derive(Debug)]
pub struct RuleSet<S>(Vec<Rc<Rule<S>>>);

impl<S: Symbol> RuleSet<S> {
    pub fn new<I>(rules: I) -> GrammarResult<Self>
    where
        I: IntoIterator<Item = Rule<S>>,
    {
        let rules: Vec<_> = rules.into_iter().sorted_by_key(|rule| rule.id).collect();

        if rules.is_empty() {
            return Err(GrammarError::EmptyGrammar);
        }

        if let Some(rule) = rules.iter().find(|rule| rule.rhs.is_empty()) {
            return Err(GrammarError::EmptyRule(rule.id));
        }

        if let Some((_, rule)) = rules
            .iter()
            .tuple_windows()
            .find(|(prev, next)| prev.id == next.id)
        {
            return Err(GrammarError::DuplicatedRule(rule.id));
        }

        Ok(Self(rules.into_iter().map(Rc::new).collect()))
    }

    /// The start symbol, left-hand side of the first rule.
    pub fn start(&self) -> S {
        self.0[0].lhs
    }

    /// Iterate over all rules of the grammar
    pub fn iter(&self) -> impl Iterator<Item = &Rc<Rule<S>>> {
        self.0.iter()
    }

    pub fn iter_by_lhs<'a>(&'a self, sym: &S) -> impl Iterator<Item = &'a Rc<Rule<S>>> + 'a {
        let sym = *sym;
        self.iter().filter(move |rule| rule.lhs == sym)
    }

    pub fn get(&self, id: RuleId) -> Option<&Rc<Rule<S>>> {
        self.iter().find(|rule| rule.id == id)
    }

    /// Every symbol occurring in the rules, ordered.
    pub fn symbols(&self) -> BTreeSet<S> {
        self.iter()
            .flat_map(|rule| std::iter::once(rule.lhs).chain(rule.rhs.iter().copied()))
            .collect()
    }

    /// Symbols which can open a derivation of the given symbol, following the
    /// leftmost symbols of rules.
    ///
    /// The symbol itself belongs to the set only if the grammar is left-recursive on it.
    pub fn left_corners(&self, symbol: &S) -> BTreeSet<S> {
        let mut corners = BTreeSet::default();
        let mut stack = vec![*symbol];

        while let Some(symbol) = stack.pop() {
            for corner in self.iter_by_lhs(&symbol).filter_map(|rule| rule.rhs.first().copied()) {
                if corners.insert(corner) {
                    stack.push(corner);
                }
            }
        }

        corners
    }

    /// Fetch the terminal symbols reachable from the given symbol through the leftmost symbols of rules.
    pub fn first(&self, symbol: &S) -> BTreeSet<S> {
        if symbol.is_terminal() {
            return BTreeSet::from_iter([*symbol]);
        }

        self.left_corners(symbol)
            .into_iter()
            .filter(S::is_terminal)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
