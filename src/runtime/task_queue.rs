//! Host-drained task queue.
//!
//! A thread-safe unbounded FIFO for deferred work. Nothing runs until the
//! host drains the queue, which models a single-threaded event loop: the
//! synchronous block that scheduled a task always finishes before the task
//! runs.

use super::{Schedule, Task};
use crossbeam_queue::SegQueue;

/// A FIFO scheduling substrate drained explicitly by its owner.
///
/// # Example
///
/// ```
/// use deferred::runtime::{Schedule, Task, TaskQueue};
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicUsize, Ordering};
///
/// let queue = TaskQueue::new();
/// let hits = Arc::new(AtomicUsize::new(0));
/// let h = Arc::clone(&hits);
/// queue.schedule(Task::new(move || {
///     h.fetch_add(1, Ordering::SeqCst);
/// }));
///
/// assert_eq!(hits.load(Ordering::SeqCst), 0);
/// assert_eq!(queue.run_until_idle(), 1);
/// assert_eq!(hits.load(Ordering::SeqCst), 1);
/// ```
#[derive(Debug, Default)]
pub struct TaskQueue {
    inner: SegQueue<Task>,
}

impl TaskQueue {
    /// Creates a new empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: SegQueue::new(),
        }
    }

    /// Runs the oldest queued task, if any.
    ///
    /// Returns `true` if a task ran.
    pub fn run_next(&self) -> bool {
        match self.inner.pop() {
            Some(task) => {
                task.run();
                true
            }
            None => false,
        }
    }

    /// Runs tasks until the queue is empty, including tasks queued by the
    /// tasks it runs. Returns the number of tasks run.
    ///
    /// A panicking task propagates out of this call; tasks behind it stay
    /// queued.
    pub fn run_until_idle(&self) -> usize {
        let mut ran = 0;
        while self.run_next() {
            ran += 1;
        }
        ran
    }

    /// Returns the number of queued tasks.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns true if no task is queued.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl Schedule for TaskQueue {
    fn schedule(&self, task: Task) {
        self.inner.push(task);
    }
}
