use prettytable::{Cell, Row, Table as PtTable};
use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;

use itertools::Itertools as _;

use crate::{traits::Symbol, GrammarResult, Item, Rule, RuleSet};

/// Maps every symbol of the grammar to the items whose dot sits on it.
///
/// The table is immutable once built and shared by every branch of a search.
#[derive(Debug)]
pub struct DecisionTable<S> {
    rules: RuleSet<S>,
    entries: BTreeMap<S, Vec<Item<S>>>,
    /// Symbols which may sit right above a given one on the stack.
    successors: BTreeMap<S, BTreeSet<S>>,
    /// Symbols which may sit at the bottom of the stack.
    bottoms: BTreeSet<S>,
    explicit_accept: bool,
}

impl<S: Symbol> DecisionTable<S> {
    /// Build the decision table from a set of rules.
    ///
    /// Rules are ordered by identifier, symbols by their own order, so that the
    /// table (and every search relying on it) is deterministic.
    pub fn build<I>(rules: I) -> GrammarResult<Self>
    where
        I: IntoIterator<Item = Rule<S>>,
    {
        let rules = RuleSet::new(rules)?;

        let mut entries: BTreeMap<S, Vec<Item<S>>> = rules
            .symbols()
            .into_iter()
            .map(|sym| (sym, Vec::default()))
            .collect();

        for rule in rules.iter() {
            for (position, sym) in rule.rhs.iter().enumerate() {
                if let Some(item) = Item::with_lookaheads(Rc::clone(rule), position, &rules) {
                    entries.entry(*sym).or_default().push(item);
                }
            }
        }

        log::debug!(
            "decision table built: {} rules, {} symbols, {} items",
            rules.len(),
            entries.len(),
            entries.values().map(Vec::len).sum::<usize>()
        );

        // A symbol is followed by the next one in a rule, or by anything opening it.
        let mut successors: BTreeMap<S, BTreeSet<S>> = BTreeMap::default();

        for rule in rules.iter() {
            for (below, next) in rule.rhs.iter().tuple_windows() {
                let set = successors.entry(*below).or_default();
                set.insert(*next);
                set.extend(rules.left_corners(next));
            }
        }

        let mut bottoms = rules.left_corners(&rules.start());
        bottoms.insert(rules.start());

        let explicit_accept = entries.values().flatten().any(Item::is_accept);

        Ok(Self {
            rules,
            entries,
            successors,
            bottoms,
            explicit_accept,
        })
    }

    /// Items whose dot sits on the given symbol.
    ///
    /// Returns an empty slice for symbols unknown to the grammar.
    pub fn items(&self, symbol: &S) -> &[Item<S>] {
        self.entries
            .get(symbol)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn contains(&self, symbol: &S) -> bool {
        self.entries.contains_key(symbol)
    }

    /// The start symbol.
    pub fn start(&self) -> S {
        self.rules.start()
    }

    pub fn rules(&self) -> &RuleSet<S> {
        &self.rules
    }

    pub fn symbols(&self) -> impl Iterator<Item = S> + '_ {
        self.entries.keys().copied()
    }

    pub fn first(&self, symbol: &S) -> BTreeSet<S> {
        self.rules.first(symbol)
    }

    /// Symbols which may sit right above `below` on the stack of a derivable
    /// input, `None` standing for the bottom of the stack.
    pub fn followers(&self, below: Option<&S>) -> impl Iterator<Item = S> + '_ {
        let set = match below {
            None => Some(&self.bottoms),
            Some(sym) => self.successors.get(sym),
        };

        set.into_iter().flatten().copied()
    }

    pub fn can_follow(&self, below: Option<&S>, top: &S) -> bool {
        match below {
            None => self.bottoms.contains(top),
            Some(sym) => self
                .successors
                .get(sym)
                .map(|set| set.contains(top))
                .unwrap_or(false),
        }
    }

    /// The grammar terminates its start rule with the end-marker.
    ///
    /// Otherwise, a branch is accepted once the stack holds the start symbol alone
    /// and the stream is settled.
    pub fn accepts_explicitly(&self) -> bool {
        self.explicit_accept
    }

    /// Iterate over every item of the table, symbol by symbol.
    pub fn iter(&self) -> impl Iterator<Item = (&S, &Item<S>)> {
        self.entries
            .iter()
            .flat_map(|(sym, items)| items.iter().map(move |item| (sym, item)))
    }
}

impl<S: Symbol> std::fmt::Display for DecisionTable<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut table = PtTable::new();

        table.set_titles(Row::new(
            ["symbol", "item", "action", "lookaheads"]
                .into_iter()
                .map(Cell::new)
                .collect(),
        ));

        for (sym, items) in self.entries.iter() {
            if items.is_empty() {
                table.add_row(Row::new(vec![
                    Cell::new(&sym.to_string()),
                    Cell::new("-"),
                    Cell::new(""),
                    Cell::new(""),
                ]));
            }

            for item in items {
                table.add_row(Row::new(vec![
                    Cell::new(&sym.to_string()),
                    Cell::new(&item.to_string()),
                    Cell::new(&item.action.to_string()),
                    Cell::new(&item.lookaheads.iter().join(", ")),
                ]));
            }
        }

        write!(f, "{}", table)
    }
}
