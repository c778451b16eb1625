//! Stored task type for deferred delivery.
//!
//! `Task` wraps a type-erased closure that a [`Schedule`](super::Schedule)
//! implementation holds until a later turn and then runs exactly once.

/// A type-erased unit of deferred work.
///
/// Reaction deliveries are wrapped as tasks that already captured the
/// reaction and its argument, so substrates can store heterogeneous work in
/// a single queue.
pub struct Task {
    /// The boxed closure to run.
    run: Box<dyn FnOnce() + Send + 'static>,
}

impl Task {
    /// Creates a new task from a closure.
    pub fn new<F>(f: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self { run: Box::new(f) }
    }

    /// Runs the task, consuming it.
    pub fn run(self) {
        (self.run)();
    }
}

impl std::fmt::Debug for Task {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Task").finish_non_exhaustive()
    }
}
