use std::{collections::BTreeSet, rc::Rc};

use itertools::Itertools;

use crate::{traits::Symbol, Rule, RuleSet};

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Action {
    /// More symbols are required to complete the rule.
    Shift,
    /// The rule is complete.
    Reduce,
    /// The rule is complete and ends with the end-marker.
    Accept,
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Shift => write!(f, "shift"),
            Action::Reduce => write!(f, "reduce"),
            Action::Accept => write!(f, "acc"),
        }
    }
}

/// A rule item.
///
/// The dot sits on the symbol at `position`, which is the symbol found on top of the stack.
///
/// # Example
/// A -> w • eos
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item<S> {
    pub rule: Rc<Rule<S>>,
    pub position: usize,
    pub action: Action,
    /// Terminals which can follow the item, empty if the rule is complete.
    pub lookaheads: BTreeSet<S>,
}

impl<S: Symbol> std::fmt::Display for Item<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (done, rest) = self.rule.rhs.split_at(self.position + 1);

        write!(f, "[({}) {} -> {} •", self.rule.id, self.rule.lhs, done.iter().join(" "))?;

        if !rest.is_empty() {
            write!(f, " {}", rest.iter().join(" "))?;
        }

        if !self.lookaheads.is_empty() {
            write!(f, ", {}]", self.lookaheads.iter().join("/"))
        } else {
            write!(f, "]")
        }
    }
}

impl<S: Symbol> Item<S> {
    /// Creates a new item, the action is derived from the position.
    ///
    /// Returns None if the position is out of the rule's right-hand side.
    pub fn new(rule: Rc<Rule<S>>, position: usize) -> Option<Self> {
        let symbol = rule.rhs.get(position).copied()?;

        let action = if position + 1 < rule.rhs.len() {
            Action::Shift
        } else if symbol.is_eos() {
            Action::Accept
        } else {
            Action::Reduce
        };

        Some(Self {
            rule,
            position,
            action,
            lookaheads: BTreeSet::default(),
        })
    }

    /// Creates a new item and computes its lookaheads.
    pub fn with_lookaheads(rule: Rc<Rule<S>>, position: usize, rules: &RuleSet<S>) -> Option<Self> {
        Self::new(rule, position).map(|mut item| {
            item.lookaheads = item
                .next_symbol()
                .map(|sym| rules.first(&sym))
                .unwrap_or_default();
            item
        })
    }

    /// Returns the symbol under the dot.
    pub fn symbol(&self) -> S {
        self.rule.rhs[self.position]
    }

    /// Returns the next unconsumed symbol.
    /// If A -> w • eof, then returns eof. If A -> w eof •, then returns None.
    pub fn next_symbol(&self) -> Option<S> {
        self.rule.rhs.get(self.position + 1).copied()
    }

    /// Returns the symbol expected at the given distance from the top of the stack.
    ///
    /// The distance 1 is the symbol under the dot. Returns None when the rule has
    /// no symbol left at this distance.
    pub fn symbol_at(&self, distance: usize) -> Option<S> {
        if distance == 0 || distance > self.position + 1 {
            return None;
        }
        self.rule.rhs.get(self.position + 1 - distance).copied()
    }

    /// The number of stack tokens the item covers, the top included.
    #[inline(always)]
    pub fn span(&self) -> usize {
        self.position + 1
    }

    pub fn is_shift(&self) -> bool {
        matches!(self.action, Action::Shift)
    }

    pub fn is_accept(&self) -> bool {
        matches!(self.action, Action::Accept)
    }

    /// Check the item admits the next token of the stream.
    ///
    /// Complete items always admit it, shifting items require it to be in their lookaheads.
    pub fn admits(&self, next: Option<S>) -> bool {
        match self.action {
            Action::Shift => next.map(|sym| self.lookaheads.contains(&sym)).unwrap_or(false),
            Action::Reduce | Action::Accept => true,
        }
    }
}
