//! Registered reactions awaiting settlement.

use crate::runtime::Task;
use crate::types::Outcome;

/// A reaction to one outcome, invoked with the recorded value.
pub type Reaction<V> = Box<dyn FnOnce(V) + Send + 'static>;

/// One `register_reactions` call: either side may be absent.
pub(crate) struct ReactionPair<T, E> {
    on_fulfilled: Option<Reaction<T>>,
    on_rejected: Option<Reaction<E>>,
}

impl<T, E> ReactionPair<T, E> {
    pub(crate) fn new(on_fulfilled: Option<Reaction<T>>, on_rejected: Option<Reaction<E>>) -> Self {
        Self {
            on_fulfilled,
            on_rejected,
        }
    }

    /// True when neither side can ever fire.
    pub(crate) fn is_empty(&self) -> bool {
        self.on_fulfilled.is_none() && self.on_rejected.is_none()
    }
}

impl<T, E> ReactionPair<T, E>
where
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    /// Builds the delivery task for `outcome`, dropping the other side.
    pub(crate) fn into_task(self, outcome: &Outcome<T, E>) -> Option<Task> {
        match outcome {
            Outcome::Fulfilled(value) => self.on_fulfilled.map(|reaction| {
                let value = value.clone();
                Task::new(move || reaction(value))
            }),
            Outcome::Rejected(value) => self.on_rejected.map(|reaction| {
                let value = value.clone();
                Task::new(move || reaction(value))
            }),
        }
    }
}

/// Append-only list of reactions, in registration order.
pub(crate) struct ReactionList<T, E> {
    pairs: Vec<ReactionPair<T, E>>,
}

impl<T, E> ReactionList<T, E> {
    pub(crate) const fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    pub(crate) fn push(&mut self, pair: ReactionPair<T, E>) {
        self.pairs.push(pair);
    }

    pub(crate) fn len(&self) -> usize {
        self.pairs.len()
    }
}

impl<T, E> ReactionList<T, E>
where
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    /// Empties the list, yielding delivery tasks for `outcome` in
    /// registration order.
    pub(crate) fn drain_into_tasks<'a>(
        &'a mut self,
        outcome: &'a Outcome<T, E>,
    ) -> impl Iterator<Item = Task> + 'a {
        self.pairs
            .drain(..)
            .filter_map(move |pair| pair.into_task(outcome))
    }
}
