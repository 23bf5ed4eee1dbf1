use crate::{
    traits::Symbol, ActiveParseState, DecisionTable, Event, ParseResult, ParseTree, SearchOptions,
    TokenStream, Verdict,
};

/// The events applied by a branch, from its start.
type History<'a, S> = Vec<Event<'a, S>>;

/// A backtracking parser driven by a decision table.
///
/// # Example
///
/// ```ignore
/// let table = grammar.table()?;
/// let parser = Parser::new(&table);
///
/// for result in parser.parse(&input) {
///     println!("{:?}", result);
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Parser<'a, S> {
    table: &'a DecisionTable<S>,
    options: SearchOptions,
}

impl<'a, S: Symbol> Parser<'a, S> {
    pub fn new(table: &'a DecisionTable<S>) -> Self {
        Self::with_options(table, SearchOptions::default())
    }

    pub fn with_options(table: &'a DecisionTable<S>, options: SearchOptions) -> Self {
        Self { table, options }
    }

    pub fn table(&self) -> &'a DecisionTable<S> {
        self.table
    }

    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    /// Starts a search over the stream.
    ///
    /// Nothing is parsed until the search is iterated.
    pub fn parse(&self, input: &'a TokenStream<S>) -> Search<'a, S> {
        Search {
            table: self.table,
            input,
            options: self.options,
            pending: vec![History::default()],
            emitted: vec![],
            explored: 0,
            forks: 0,
        }
    }
}

/// A lazy depth-first search over the parse branches.
///
/// Each iteration explores branches until one terminates, and yields its result.
/// When a prediction returns several events, every alternative is queued
/// and the leftmost one is explored first.
pub struct Search<'a, S> {
    table: &'a DecisionTable<S>,
    input: &'a TokenStream<S>,
    options: SearchOptions,
    /// Branches left to explore, the last one is explored next.
    pending: Vec<History<'a, S>>,
    /// Forests of the accepted results, when deduplicating.
    emitted: Vec<Vec<ParseTree<S>>>,
    explored: usize,
    forks: usize,
}

impl<'a, S: Symbol> Search<'a, S> {
    /// Drops every branch left to explore, the search ends.
    pub fn stop(&mut self) {
        if !self.pending.is_empty() {
            log::debug!("search stopped, {} branches dropped", self.pending.len());
        }
        self.pending.clear();
    }

    /// Number of branches which terminated so far.
    pub fn explored(&self) -> usize {
        self.explored
    }

    /// Number of branches left to explore.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Number of forks so far.
    pub fn forks(&self) -> usize {
        self.forks
    }

    /// Exhausts the search and folds its results.
    pub fn verdict(self) -> Verdict<S> {
        Verdict::from_results(self)
    }

    /// Replays the branch, then runs it until it terminates or forks.
    fn explore(&mut self, mut history: History<'a, S>) -> Option<ParseResult<S>> {
        let mut state = ActiveParseState::replay(self.table, self.input, history.iter().copied());

        while !state.is_terminated() {
            if let Some(max_steps) = self.options.max_steps {
                if history.len() >= max_steps {
                    state.interrupt();
                    break;
                }
            }

            let mut events = state.next_events();

            match events.len() {
                0 => break,
                1 => {
                    let event = events.remove(0);
                    history.push(event);

                    // A failure is recorded by the state.
                    let _ = state.apply(event);
                }
                n => {
                    self.forks += 1;
                    log::debug!(
                        "fork #{} at step {}: {} branches",
                        self.forks,
                        history.len(),
                        n
                    );

                    self.pending.extend(events.into_iter().rev().map(|event| {
                        let mut branch = history.clone();
                        branch.push(event);
                        branch
                    }));

                    return None;
                }
            }
        }

        self.explored += 1;

        match state.error() {
            Some(err) => log::debug!("branch #{} rejected: {}", self.explored, err),
            None => log::debug!("branch #{} accepted in {} steps", self.explored, history.len()),
        }

        Some(state.into_result())
    }
}

impl<S: Symbol> Iterator for Search<'_, S> {
    type Item = ParseResult<S>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(history) = self.pending.pop() {
            let Some(result) = self.explore(history) else {
                continue;
            };

            if self.options.deduplicate && result.is_accepted() {
                if self.emitted.contains(&result.forest) {
                    log::debug!("duplicated forest skipped");
                    continue;
                }
                self.emitted.push(result.forest.clone());
            }

            return Some(result);
        }

        None
    }
}
