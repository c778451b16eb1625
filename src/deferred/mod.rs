//! The deferred value primitive.
//!
//! A [`DeferredValue`] is settled at most once, by a producer, to either a
//! fulfilment value or a rejection value. Consumers register reactions that
//! fire exactly once after settlement, always in a later scheduler turn and
//! in registration order.
//!
//! # Lifecycle
//!
//! ```text
//! new(scheduler, producer)
//!   └─ producer(fulfill, reject) runs before `new` returns
//! fulfill.settle(v) / reject.settle(e)     (first one wins)
//!   └─ one Task per matching reaction → scheduler
//! register_reactions(..) after settlement
//!   └─ Task → scheduler (never inline)
//! ```
//!
//! # Example
//!
//! ```
//! use deferred::DeferredValue;
//! use deferred::runtime::TaskQueue;
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicI32, Ordering};
//!
//! let queue = Arc::new(TaskQueue::new());
//! let seen = Arc::new(AtomicI32::new(0));
//!
//! let value: DeferredValue<i32, String> = DeferredValue::new(queue.clone(), |ok, _| ok.settle(1));
//! let s = Arc::clone(&seen);
//! value.on_fulfilled(move |v| s.store(v, Ordering::SeqCst));
//!
//! // Nothing runs until the scheduler gets a turn.
//! assert_eq!(seen.load(Ordering::SeqCst), 0);
//! queue.run_until_idle();
//! assert_eq!(seen.load(Ordering::SeqCst), 1);
//! ```

mod handle;
mod reaction;

use std::any::{Any, type_name};
use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

pub use handle::{Fulfill, Reject};
pub use reaction::Reaction;

use reaction::{ReactionList, ReactionPair};

use crate::error::InvalidProducerError;
use crate::runtime::Schedule;
use crate::tracing_compat::{debug, trace};
use crate::types::{DeferredId, Outcome, State};

/// The boxed producer shape accepted by [`DeferredValue::from_dynamic`].
pub type Producer<T, E> = Box<dyn FnOnce(Fulfill<T, E>, Reject<T, E>) + 'static>;

struct Inner<T, E> {
    /// `None` while pending; written once.
    outcome: Option<Outcome<T, E>>,
    /// Reactions registered while pending. Empty once settled.
    reactions: ReactionList<T, E>,
}

pub(crate) struct Shared<T, E> {
    id: DeferredId,
    inner: Mutex<Inner<T, E>>,
    scheduler: Arc<dyn Schedule>,
}

impl<T, E> Shared<T, E>
where
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    fn new(scheduler: Arc<dyn Schedule>) -> Self {
        Self {
            id: DeferredId::next(),
            inner: Mutex::new(Inner {
                outcome: None,
                reactions: ReactionList::new(),
            }),
            scheduler,
        }
    }

    pub(crate) fn settle(&self, outcome: Outcome<T, E>) {
        let mut guard = self.inner.lock();
        let inner = &mut *guard;

        if inner.outcome.is_some() {
            trace!(
                deferred = %self.id,
                state = ?inner.outcome.as_ref().map(Outcome::state),
                attempted = %outcome.state(),
                "settlement ignored, already settled"
            );
            return;
        }

        for task in inner.reactions.drain_into_tasks(&outcome) {
            self.scheduler.schedule(task);
        }
        debug!(
            deferred = %self.id,
            state = %outcome.state(),
            "deferred value settled"
        );
        inner.outcome = Some(outcome);
    }

    fn register(&self, pair: ReactionPair<T, E>) {
        if pair.is_empty() {
            trace!(deferred = %self.id, "registration without reactions ignored");
            return;
        }

        let mut guard = self.inner.lock();
        let inner = &mut *guard;
        match &inner.outcome {
            Some(outcome) => {
                if let Some(task) = pair.into_task(outcome) {
                    trace!(
                        deferred = %self.id,
                        state = %outcome.state(),
                        "late registration scheduled"
                    );
                    self.scheduler.schedule(task);
                }
            }
            None => {
                inner.reactions.push(pair);
                trace!(
                    deferred = %self.id,
                    pending = inner.reactions.len(),
                    "reactions registered"
                );
            }
        }
    }
}

impl<T, E> Drop for Shared<T, E> {
    fn drop(&mut self) {
        let inner = self.inner.get_mut();
        if inner.outcome.is_none() && inner.reactions.len() > 0 {
            trace!(
                deferred = %self.id,
                unfired = inner.reactions.len(),
                "pending deferred value dropped"
            );
        }
    }
}

/// A value that a producer settles once, asynchronously.
///
/// Cloning yields another handle to the same instance. The instance lives as
/// long as any handle, settlement handle, or scheduled delivery refers to
/// it; reactions still pending when the last reference goes away are dropped
/// without being invoked.
pub struct DeferredValue<T, E> {
    shared: Arc<Shared<T, E>>,
}

impl<T, E> DeferredValue<T, E>
where
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    /// Creates a deferred value and runs `producer` immediately.
    ///
    /// `producer` receives the [`Fulfill`] and [`Reject`] handles bound to
    /// the new instance and runs exactly once, before `new` returns. A panic
    /// in `producer` propagates out of `new`.
    pub fn new<P>(scheduler: Arc<dyn Schedule>, producer: P) -> Self
    where
        P: FnOnce(Fulfill<T, E>, Reject<T, E>),
    {
        let shared = Arc::new(Shared::new(scheduler));
        trace!(deferred = %shared.id, "running producer");
        producer(
            Fulfill::new(Arc::clone(&shared)),
            Reject::new(Arc::clone(&shared)),
        );
        Self { shared }
    }

    /// Creates a deferred value whose producer may fail.
    ///
    /// An `Err(e)` returned by `producer` rejects the instance with `e`,
    /// unless the producer already settled it.
    pub fn new_fallible<P>(scheduler: Arc<dyn Schedule>, producer: P) -> Self
    where
        P: FnOnce(Fulfill<T, E>, Reject<T, E>) -> Result<(), E>,
    {
        let shared = Arc::new(Shared::new(scheduler));
        let reject = Reject::new(Arc::clone(&shared));
        trace!(deferred = %shared.id, "running fallible producer");
        if let Err(error) = producer(Fulfill::new(Arc::clone(&shared)), reject.clone()) {
            trace!(deferred = %shared.id, "producer failed, rejecting");
            reject.settle(error);
        }
        Self { shared }
    }

    /// Creates a deferred value from a type-erased producer.
    ///
    /// `producer` must be a boxed [`Producer<T, E>`]. Anything else is
    /// rejected with [`InvalidProducerError`] before an instance is created.
    ///
    /// ```
    /// use deferred::{DeferredValue, Producer};
    /// use deferred::runtime::TaskQueue;
    /// use std::any::Any;
    /// use std::sync::Arc;
    ///
    /// let queue = Arc::new(TaskQueue::new());
    /// let not_callable: Box<dyn Any> = Box::new(42);
    /// assert!(DeferredValue::<i32, String>::from_dynamic(queue.clone(), not_callable).is_err());
    ///
    /// let producer: Producer<i32, String> = Box::new(|ok, _| ok.settle(7));
    /// let value = DeferredValue::<i32, String>::from_dynamic(queue, Box::new(producer)).unwrap();
    /// assert!(value.state().is_terminal());
    /// ```
    pub fn from_dynamic(
        scheduler: Arc<dyn Schedule>,
        producer: Box<dyn Any>,
    ) -> Result<Self, InvalidProducerError> {
        let producer = producer
            .downcast::<Producer<T, E>>()
            .map_err(|_| InvalidProducerError::new(type_name::<Producer<T, E>>()))?;
        Ok(Self::new(scheduler, *producer))
    }

    /// Creates an instance already fulfilled with `value`.
    pub fn fulfilled(scheduler: Arc<dyn Schedule>, value: T) -> Self {
        Self::new(scheduler, move |fulfill, _| fulfill.settle(value))
    }

    /// Creates an instance already rejected with `error`.
    pub fn rejected(scheduler: Arc<dyn Schedule>, error: E) -> Self {
        Self::new(scheduler, move |_, reject| reject.settle(error))
    }

    /// Registers a pair of reactions. Either side may be `None`.
    ///
    /// The side matching the eventual outcome is invoked once with the
    /// recorded value, in a later scheduler turn, after every reaction
    /// registered before it. The other side is dropped.
    pub fn register_reactions(
        &self,
        on_fulfilled: Option<Reaction<T>>,
        on_rejected: Option<Reaction<E>>,
    ) {
        self.shared
            .register(ReactionPair::new(on_fulfilled, on_rejected));
    }

    /// Registers type-erased reactions.
    ///
    /// Each argument is honoured only if it is a boxed [`Reaction`] for the
    /// matching value type. Anything else is ignored without error.
    pub fn register_dynamic(
        &self,
        on_fulfilled: Option<Box<dyn Any + Send>>,
        on_rejected: Option<Box<dyn Any + Send>>,
    ) {
        let on_fulfilled = self.downcast_reaction::<T>(on_fulfilled, "fulfilled");
        let on_rejected = self.downcast_reaction::<E>(on_rejected, "rejected");
        self.register_reactions(on_fulfilled, on_rejected);
    }

    /// Registers both reactions.
    pub fn then<F, R>(&self, on_fulfilled: F, on_rejected: R)
    where
        F: FnOnce(T) + Send + 'static,
        R: FnOnce(E) + Send + 'static,
    {
        self.register_reactions(Some(Box::new(on_fulfilled)), Some(Box::new(on_rejected)));
    }

    /// Registers a fulfilment reaction only.
    pub fn on_fulfilled<F>(&self, on_fulfilled: F)
    where
        F: FnOnce(T) + Send + 'static,
    {
        self.register_reactions(Some(Box::new(on_fulfilled)), None);
    }

    /// Registers a rejection reaction only.
    pub fn on_rejected<R>(&self, on_rejected: R)
    where
        R: FnOnce(E) + Send + 'static,
    {
        self.register_reactions(None, Some(Box::new(on_rejected)));
    }

    /// Returns a copy of the recorded outcome, or `None` while pending.
    #[must_use]
    pub fn outcome(&self) -> Option<Outcome<T, E>> {
        self.shared.inner.lock().outcome.clone()
    }

    #[cfg_attr(not(feature = "tracing-integration"), allow(unused_variables))]
    fn downcast_reaction<V: 'static>(
        &self,
        candidate: Option<Box<dyn Any + Send>>,
        side: &'static str,
    ) -> Option<Reaction<V>> {
        match candidate?.downcast::<Reaction<V>>() {
            Ok(reaction) => Some(*reaction),
            Err(_) => {
                trace!(deferred = %self.shared.id, side, "non-callable reaction ignored");
                None
            }
        }
    }
}

impl<T, E> DeferredValue<T, E> {
    /// Returns the identifier used in log output.
    #[must_use]
    pub fn id(&self) -> DeferredId {
        self.shared.id
    }

    /// Returns the current state.
    #[must_use]
    pub fn state(&self) -> State {
        self.shared
            .inner
            .lock()
            .outcome
            .as_ref()
            .map_or(State::Pending, Outcome::state)
    }

    /// Returns true while no settlement has happened.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.state().is_pending()
    }

    /// Returns the number of registrations waiting for settlement.
    #[must_use]
    pub fn pending_reactions(&self) -> usize {
        self.shared.inner.lock().reactions.len()
    }
}

impl<T, E> Clone for DeferredValue<T, E> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T, E> fmt::Debug for DeferredValue<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeferredValue")
            .field("id", &self.id())
            .field("state", &self.state())
            .field("pending_reactions", &self.pending_reactions())
            .finish()
    }
}
