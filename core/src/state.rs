use std::collections::BTreeSet;

use crate::{
    traits::Symbol, Action, DecisionTable, ErrorKind, Item, ParseError, ParseResult, ParseTree,
    Token, TokenStream, TransactionalStack,
};

/// The phase a parse state is in, reported by errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Init,
    Predict,
    Shift,
    Reduce,
    Accept,
    CheckBranch,
    Complete,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Init => write!(f, "init"),
            Phase::Predict => write!(f, "predict"),
            Phase::Shift => write!(f, "shift"),
            Phase::Reduce => write!(f, "reduce"),
            Phase::Accept => write!(f, "accept"),
            Phase::CheckBranch => write!(f, "check-branch"),
            Phase::Complete => write!(f, "complete"),
        }
    }
}

/// A decision taken by a branch: the item to apply, and the symbol expected
/// on top of the stack once applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event<'table, S> {
    pub item: &'table Item<S>,
    pub expected: Option<S>,
}

impl<'table, S: Symbol> From<&'table Item<S>> for Event<'table, S> {
    fn from(item: &'table Item<S>) -> Self {
        Self {
            item,
            expected: item.next_symbol(),
        }
    }
}

impl<S: Symbol> std::fmt::Display for Event<'_, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.item.action, self.item)
    }
}

/// What the state was doing when it last stopped.
#[derive(Debug, Clone)]
pub struct Diagnostics<'table, S> {
    pub phase: Phase,
    /// Items considered by the last prediction, or the last applied one.
    pub considered: Vec<&'table Item<S>>,
    pub expected: Vec<S>,
    pub actual: Option<S>,
}

impl<S> Default for Diagnostics<'_, S> {
    fn default() -> Self {
        Self {
            phase: Phase::Init,
            considered: vec![],
            expected: vec![],
            actual: None,
        }
    }
}

/// One branch of the search.
///
/// A state is never copied: forking a branch means replaying its history on
/// a fresh state.
#[derive(Debug)]
pub struct ActiveParseState<'a, S> {
    table: &'a DecisionTable<S>,
    input: &'a TokenStream<S>,
    /// Index of the next token to shift.
    cursor: usize,
    stack: TransactionalStack<Token<S>>,
    steps: usize,
    done: bool,
    error: Option<ParseError<S>>,
    diagnostics: Diagnostics<'a, S>,
}

impl<'a, S: Symbol> ActiveParseState<'a, S> {
    /// Creates a new state, the first token of the stream is shifted.
    pub fn new(table: &'a DecisionTable<S>, input: &'a TokenStream<S>) -> Self {
        let mut state = Self {
            table,
            input,
            cursor: 0,
            stack: TransactionalStack::default(),
            steps: 0,
            done: false,
            error: None,
            diagnostics: Diagnostics::default(),
        };

        match state.shift() {
            Ok(()) => state.complete(),
            Err(err) => state.fail(err),
        }

        state
    }

    /// Creates a new state and applies the history.
    ///
    /// The replay stops at the first failing event, the state then holds the error.
    pub fn replay<I>(table: &'a DecisionTable<S>, input: &'a TokenStream<S>, history: I) -> Self
    where
        I: IntoIterator<Item = Event<'a, S>>,
    {
        let mut state = Self::new(table, input);

        for event in history {
            if state.apply(event).is_err() {
                break;
            }
        }

        state
    }

    /// Computes the events applicable to the current state.
    ///
    /// The stack is left untouched. An empty list means the branch is over,
    /// either done or failed.
    pub fn next_events(&mut self) -> Vec<Event<'a, S>> {
        if self.is_terminated() {
            return vec![];
        }

        self.enter(Phase::Predict);
        let events = self.predict();
        self.stack.rollback();

        match events {
            Ok(events) => events,
            Err(err) => {
                self.fail(err);
                vec![]
            }
        }
    }

    /// Applies an event, then checks the branch hint and the completion.
    pub fn apply(&mut self, event: Event<'a, S>) -> Result<(), ParseError<S>> {
        if let Some(err) = &self.error {
            return Err(err.clone());
        }

        self.steps += 1;
        self.diagnostics.considered = vec![event.item];
        log::trace!("#{} {}", self.steps, event);

        match self.step(&event) {
            Ok(()) => {
                self.complete();
                Ok(())
            }
            Err(err) => {
                self.fail(err.clone());
                Err(err)
            }
        }
    }

    /// Ends the branch without a decision, the stack is kept for diagnostic.
    pub fn interrupt(&mut self) {
        if self.is_terminated() {
            return;
        }

        self.enter(Phase::Complete);
        let err = self.error_at(
            ErrorKind::unfinished_parse(self.stack_kinds()),
            self.top_position(),
        );
        self.fail(err);
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    /// The branch is either done or failed.
    pub fn is_terminated(&self) -> bool {
        self.done || self.error.is_some()
    }

    pub fn error(&self) -> Option<&ParseError<S>> {
        self.error.as_ref()
    }

    pub fn diagnostics(&self) -> &Diagnostics<'a, S> {
        &self.diagnostics
    }

    /// Number of events applied so far.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Index of the next token to shift.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The kinds of the stack tokens, from the bottom to the top.
    pub fn stack_kinds(&self) -> Vec<S> {
        self.stack.iter().map(|tok| tok.kind).collect()
    }

    /// Turns the state into a result, the forest is the stack popped from the top.
    pub fn into_result(self) -> ParseResult<S> {
        ParseResult {
            forest: self.stack.drain().map(ParseTree::from).collect(),
            error: self.error,
        }
    }
}

impl<'a, S: Symbol> ActiveParseState<'a, S> {
    fn predict(&mut self) -> Result<Vec<Event<'a, S>>, ParseError<S>> {
        let table = self.table;
        let depth = self.stack.len();

        let Some((top, position, lookahead)) = self
            .stack
            .pop()
            .map(|tok| (tok.kind, tok.position, tok.lookahead_kind()))
        else {
            return Err(self.error_at(ErrorKind::no_applicable_rule(None, []), None));
        };

        let items = table.items(&top);

        if items.is_empty() {
            let kind = if self.is_settled() {
                self.stack.rollback();
                ErrorKind::unfinished_parse(self.stack_kinds())
            } else {
                ErrorKind::no_applicable_rule(Some(top), [])
            };

            return Err(self.error_at(kind, Some(position)));
        }

        let consumed = self.cursor == self.input.len();

        let candidates: Vec<&'a Item<S>> = items
            .iter()
            .filter(|item| item.span() <= depth)
            .filter(|item| !item.is_accept() || (item.span() == depth && consumed))
            .collect();

        self.diagnostics.considered = candidates.clone();

        match candidates.as_slice() {
            [] => {
                if items.iter().any(|item| item.is_accept() && item.span() == depth) {
                    self.check_consumed()?;
                }

                let expected = items
                    .iter()
                    .flat_map(|item| Self::lacking(table, item, depth))
                    .collect::<BTreeSet<_>>();

                Err(self.error_at(ErrorKind::no_applicable_rule(Some(top), expected), Some(position)))
            }
            [item] => Ok(vec![Event::from(*item)]),
            _ => self.disambiguate(top, position, lookahead, candidates),
        }
    }

    /// What an item misses at the bottom of a stack of the given depth.
    ///
    /// An item too deep lacks the first terminals of the symbol right under the
    /// stack, an accepting item too shallow needs its first symbol at the bottom.
    fn lacking(table: &DecisionTable<S>, item: &Item<S>, depth: usize) -> BTreeSet<S> {
        if item.span() > depth {
            item.symbol_at(depth + 1)
                .map(|sym| table.first(&sym))
                .unwrap_or_default()
        } else {
            item.symbol_at(item.span()).into_iter().collect()
        }
    }

    /// Narrows several candidates down by the lookahead, then by inspecting
    /// the stack deeper and deeper.
    ///
    /// Survivors are ordered by the distance at which they were settled, the
    /// smallest first.
    fn disambiguate(
        &mut self,
        top: S,
        position: usize,
        lookahead: Option<S>,
        candidates: Vec<&'a Item<S>>,
    ) -> Result<Vec<Event<'a, S>>, ParseError<S>> {
        let (mut live, refused): (Vec<_>, Vec<_>) = candidates
            .into_iter()
            .partition(|item| item.admits(lookahead));

        if live.is_empty() {
            let expected = refused
                .iter()
                .flat_map(|item| item.lookaheads.iter().copied())
                .collect::<Vec<_>>();

            return Err(self.error_at(
                ErrorKind::no_applicable_rule(lookahead, expected),
                Some(position + 1),
            ));
        }

        let mut solutions: Vec<&'a Item<S>> = vec![];
        let mut wanted = BTreeSet::<S>::default();
        let mut distance = 2;

        loop {
            let (settled, unsettled): (Vec<_>, Vec<_>) = live
                .into_iter()
                .partition(|item| item.symbol_at(distance).is_none());

            solutions.extend(settled);
            live = unsettled;

            if live.is_empty() || (live.len() == 1 && solutions.is_empty()) {
                break;
            }

            match self.stack.pop().map(|tok| tok.kind) {
                Some(kind) => {
                    wanted = live.iter().filter_map(|item| item.symbol_at(distance)).collect();
                    live.retain(|item| item.symbol_at(distance) == Some(kind));
                }
                None => {
                    live.clear();
                    break;
                }
            }

            distance += 1;
        }

        solutions.extend(live);

        if solutions.is_empty() {
            return Err(self.error_at(ErrorKind::no_applicable_rule(Some(top), wanted), Some(position)));
        }

        if solutions.len() > 1 {
            log::debug!(
                "{} candidates for {} after inspecting {} symbols",
                solutions.len(),
                top,
                distance - 1
            );
        }

        self.diagnostics.considered = solutions.clone();

        Ok(solutions.into_iter().map(Event::from).collect())
    }

    fn step(&mut self, event: &Event<'a, S>) -> Result<(), ParseError<S>> {
        match event.item.action {
            Action::Shift => self.shift()?,
            Action::Reduce => self.reduce(event.item)?,
            Action::Accept => {
                self.enter(Phase::Accept);
                self.check_consumed()?;
                self.reduce(event.item)?;
                self.enter(Phase::Accept);
                self.done = true;
            }
        }

        self.check_branch(event)
    }

    fn shift(&mut self) -> Result<(), ParseError<S>> {
        self.enter(Phase::Shift);

        let input = self.input;
        let tok = input
            .get(self.cursor)
            .ok_or_else(|| self.error_at(ErrorKind::StreamExhausted, None))?;

        self.stack.push(Token::clone(tok));
        self.cursor += 1;

        Ok(())
    }

    /// Pops the rule's right-hand side, from the right to the left, and pushes
    /// the reduced node.
    fn reduce(&mut self, item: &'a Item<S>) -> Result<(), ParseError<S>> {
        self.enter(Phase::Reduce);
        let rule = &item.rule;

        for expected in rule.rhs.iter().rev() {
            let found = self.stack.pop().map(|tok| (tok.kind, tok.position));

            if let Some((kind, _)) = found {
                if kind == *expected {
                    continue;
                }
            }

            self.stack.rollback();

            let mut symbols = self.table.first(expected);
            symbols.insert(*expected);

            return Err(self.error_at(
                ErrorKind::reduction_mismatch(symbols, found.map(|(kind, _)| kind)),
                found.map(|(_, position)| position),
            ));
        }

        let mut children = self.stack.commit();
        children.reverse();

        let below = self.stack.peek().map(|tok| tok.kind);
        self.stack.push(Token::reduce(rule.lhs, children));

        self.check_adjacency(below, rule.lhs)
    }

    /// Checks the reduced symbol may sit on the one under it, the branch is
    /// dead otherwise.
    fn check_adjacency(&mut self, below: Option<S>, top: S) -> Result<(), ParseError<S>> {
        let table = self.table;

        if table.can_follow(below.as_ref(), &top) {
            return Ok(());
        }

        self.enter(Phase::CheckBranch);

        Err(self.error_at(
            ErrorKind::no_applicable_rule(Some(top), table.followers(below.as_ref())),
            self.top_position(),
        ))
    }

    /// Checks nothing is left to shift.
    fn check_consumed(&self) -> Result<(), ParseError<S>> {
        match self.input.get(self.cursor) {
            Some(tok) => Err(self.error_at(
                ErrorKind::no_applicable_rule(Some(tok.kind), []),
                Some(tok.position),
            )),
            None => Ok(()),
        }
    }

    /// Checks the top of the stack against the hint of the event.
    fn check_branch(&mut self, event: &Event<'a, S>) -> Result<(), ParseError<S>> {
        let Some(expected) = event.expected else {
            return Ok(());
        };

        self.enter(Phase::CheckBranch);

        let top = self.stack.pop().map(|tok| (tok.kind, tok.position));
        self.stack.rollback();

        match top {
            Some((kind, _)) if kind == expected || event.item.lookaheads.contains(&kind) => Ok(()),
            top => Err(self.error_at(
                ErrorKind::branch_check_mismatch(expected, top.map(|(kind, _)| kind)),
                top.map(|(_, position)| position),
            )),
        }
    }

    /// Accepts the branch when the grammar never mentions the end-marker, the
    /// stack holds the start symbol alone and the stream is settled.
    fn complete(&mut self) {
        if self.is_terminated() || self.table.accepts_explicitly() {
            return;
        }

        let start = self.table.start();
        let single = self.stack.len() == 1 && self.stack.peek().map(|tok| tok.kind) == Some(start);

        if single && self.is_settled() {
            self.enter(Phase::Accept);
            self.cursor = self.input.len();
            self.done = true;
        }
    }

    /// Nothing but the end-marker is left to shift.
    fn is_settled(&self) -> bool {
        match self.input.len().saturating_sub(self.cursor) {
            0 => true,
            1 => self
                .input
                .get(self.cursor)
                .map(|tok| tok.kind.is_eos())
                .unwrap_or(false),
            _ => false,
        }
    }

    fn top_position(&self) -> Option<usize> {
        self.stack.peek().map(|tok| tok.position)
    }

    fn enter(&mut self, phase: Phase) {
        self.diagnostics.phase = phase;
    }

    fn error_at(&self, kind: ErrorKind<S>, position: Option<usize>) -> ParseError<S> {
        ParseError::new(kind, self.diagnostics.phase, position)
    }

    fn fail(&mut self, err: ParseError<S>) {
        let (expected, actual) = match err.kind() {
            ErrorKind::ReductionMismatch { expected, actual } => (expected.to_vec(), actual.0),
            ErrorKind::BranchCheckMismatch { expected, actual } => (vec![*expected], actual.0),
            ErrorKind::NoApplicableRule { symbol, expected } => (expected.to_vec(), symbol.0),
            ErrorKind::StreamExhausted | ErrorKind::UnfinishedParse { .. } => (vec![], None),
        };

        self.diagnostics.expected = expected;
        self.diagnostics.actual = actual;

        log::debug!("branch failed after {} steps: {}", self.steps, err);
        if self.error.is_none() {
            self.error = Some(err);
        }
    }
}
