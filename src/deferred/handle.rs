//! Settlement handles passed to producers.

use std::fmt;
use std::sync::Arc;

use super::Shared;
use crate::types::Outcome;

/// Settles the bound deferred value as fulfilled.
///
/// The first settlement through either handle wins; later calls are no-ops.
/// Holding a handle keeps the deferred value alive.
pub struct Fulfill<T, E> {
    shared: Arc<Shared<T, E>>,
}

/// Settles the bound deferred value as rejected.
///
/// The first settlement through either handle wins; later calls are no-ops.
/// Holding a handle keeps the deferred value alive.
pub struct Reject<T, E> {
    shared: Arc<Shared<T, E>>,
}

impl<T, E> Fulfill<T, E>
where
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    pub(super) fn new(shared: Arc<Shared<T, E>>) -> Self {
        Self { shared }
    }

    /// Records `value` and schedules fulfilment reactions, if still pending.
    pub fn settle(&self, value: T) {
        self.shared.settle(Outcome::Fulfilled(value));
    }
}

impl<T, E> Reject<T, E>
where
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    pub(super) fn new(shared: Arc<Shared<T, E>>) -> Self {
        Self { shared }
    }

    /// Records `value` and schedules rejection reactions, if still pending.
    pub fn settle(&self, value: E) {
        self.shared.settle(Outcome::Rejected(value));
    }
}

impl<T, E> Clone for Fulfill<T, E> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T, E> Clone for Reject<T, E> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T, E> fmt::Debug for Fulfill<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fulfill")
            .field("deferred", &self.shared.id)
            .finish()
    }
}

impl<T, E> fmt::Debug for Reject<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reject")
            .field("deferred", &self.shared.id)
            .finish()
    }
}
