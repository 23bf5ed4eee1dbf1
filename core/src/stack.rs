/// A stack whose pops can be refused.
///
/// Popped items are kept in an undo-log until the next [commit](Self::commit),
/// a [rollback](Self::rollback) pushes them back in reverse pop order.
#[derive(Debug, Clone)]
pub struct TransactionalStack<T> {
    items: Vec<T>,
    popped: Vec<T>,
}

impl<T> Default for TransactionalStack<T> {
    fn default() -> Self {
        Self {
            items: vec![],
            popped: vec![],
        }
    }
}

impl<T> TransactionalStack<T> {
    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    /// Pops the top item, returns None on underflow.
    pub fn pop(&mut self) -> Option<&T> {
        let item = self.items.pop()?;
        self.popped.push(item);
        self.popped.last()
    }

    pub fn peek(&self) -> Option<&T> {
        self.items.last()
    }

    /// Makes the pops permanent.
    ///
    /// Returns the popped items, in pop order (top first).
    pub fn commit(&mut self) -> Vec<T> {
        std::mem::take(&mut self.popped)
    }

    /// Restores every item popped since the last commit.
    pub fn rollback(&mut self) {
        while let Some(item) = self.popped.pop() {
            self.items.push(item);
        }
    }

    /// The number of items left on the stack.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of pops pending a commit or a rollback.
    pub fn pending(&self) -> usize {
        self.popped.len()
    }

    /// Iterate from the bottom to the top of the stack.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> {
        self.items.iter()
    }

    /// Drains the stack from the top to the bottom, pending pops are rolled back first.
    pub fn drain(mut self) -> impl Iterator<Item = T> {
        self.rollback();
        self.items.into_iter().rev()
    }
}
