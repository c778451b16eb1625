//! Scheduling substrates for deferred delivery.
//!
//! A deferred value never runs a reaction inline. It hands a [`Task`] to a
//! [`Schedule`] implementation, which runs it in a later turn. Two
//! substrates ship with the crate:
//!
//! - [`TaskQueue`]: a FIFO drained explicitly by the host
//!   (single-threaded event-loop model).
//! - [`WorkerScheduler`]: a FIFO served by one dedicated thread.
//!
//! Any other facility honouring the [`Schedule`] contract can be injected.

pub mod stored_task;
pub mod task_queue;
pub mod worker;

use std::sync::Arc;

pub use stored_task::Task;
pub use task_queue::TaskQueue;
pub use worker::WorkerScheduler;

/// Deferred-task scheduling capability.
///
/// Implementations must:
///
/// - never run `task` inside the `schedule` call itself;
/// - run tasks in the order they were scheduled on this substrate.
///
/// Deferred values call `schedule` while holding their own state lock, so an
/// implementation that ran tasks inline would also deadlock.
pub trait Schedule: Send + Sync {
    /// Queues `task` to run in a later turn.
    fn schedule(&self, task: Task);
}

impl<S: Schedule + ?Sized> Schedule for Arc<S> {
    fn schedule(&self, task: Task) {
        (**self).schedule(task);
    }
}
