//! Single-thread worker scheduler.
//!
//! [`WorkerScheduler`] owns one OS thread that runs scheduled tasks in FIFO
//! order. It is the substrate to use when settlement happens on threads the
//! host does not otherwise drive, for example a blocking I/O thread that
//! fulfils a deferred value some time after construction.
//!
//! # Shutdown
//!
//! [`shutdown`](WorkerScheduler::shutdown) lets the worker finish every task
//! queued before the call, then joins the thread. Tasks scheduled afterwards
//! are dropped without running. Dropping the scheduler shuts it down.
//!
//! Without panic isolation a panicking task ends the worker thread. The
//! scheduler then counts as shut down: tasks still queued and tasks
//! scheduled later are dropped with a warning instead of waiting forever.

use std::collections::VecDeque;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread::{self, JoinHandle};

use parking_lot::{Condvar, Mutex};

use super::{Schedule, Task};
use crate::config::WorkerConfig;
use crate::error::Result;
use crate::tracing_compat::{debug, warn_event};

#[derive(Debug)]
struct WorkerState {
    /// Tasks waiting to run, oldest first.
    queue: VecDeque<Task>,
    /// Set once by `shutdown`; never cleared.
    shutdown: bool,
}

#[derive(Debug)]
struct WorkerShared {
    state: Mutex<WorkerState>,
    available: Condvar,
    executed: AtomicU64,
}

/// A FIFO scheduling substrate backed by a dedicated thread.
#[derive(Debug)]
pub struct WorkerScheduler {
    shared: Arc<WorkerShared>,
    handle: Mutex<Option<JoinHandle<()>>>,
    thread_name: String,
}

impl WorkerScheduler {
    /// Spawns the worker thread described by `config`.
    ///
    /// Fails with [`Error::Config`](crate::Error::Config) for an unusable
    /// configuration and [`Error::WorkerSpawn`](crate::Error::WorkerSpawn) when
    /// the OS refuses to create the thread.
    pub fn start(config: WorkerConfig) -> Result<Arc<Self>> {
        config.validate()?;
        let shared = Arc::new(WorkerShared {
            state: Mutex::new(WorkerState {
                queue: VecDeque::new(),
                shutdown: false,
            }),
            available: Condvar::new(),
            executed: AtomicU64::new(0),
        });

        let mut builder = thread::Builder::new().name(config.thread_name.clone());
        if let Some(bytes) = config.stack_size {
            builder = builder.stack_size(bytes);
        }

        let worker_shared = Arc::clone(&shared);
        let isolate_panics = config.isolate_panics;
        let handle = builder.spawn(move || run_worker(&worker_shared, isolate_panics))?;

        debug!(
            thread = %config.thread_name,
            isolate_panics,
            "worker scheduler started"
        );

        Ok(Arc::new(Self {
            shared,
            handle: Mutex::new(Some(handle)),
            thread_name: config.thread_name,
        }))
    }

    /// Spawns a worker with the default configuration.
    pub fn start_default() -> Result<Arc<Self>> {
        Self::start(WorkerConfig::default())
    }

    /// Stops accepting tasks, lets queued tasks finish, and joins the thread.
    ///
    /// Idempotent. When called from the worker thread itself the join is
    /// skipped; the thread exits once it returns to its loop.
    pub fn shutdown(&self) {
        self.shared.state.lock().shutdown = true;
        self.shared.available.notify_all();

        let Some(handle) = self.handle.lock().take() else {
            return;
        };
        if handle.thread().id() == thread::current().id() {
            return;
        }
        if handle.join().is_err() {
            warn_event!(thread = %self.thread_name, "worker thread terminated by panic");
        }
        debug!(
            thread = %self.thread_name,
            executed = self.executed(),
            "worker scheduler stopped"
        );
    }

    /// Returns true until [`shutdown`](Self::shutdown) is called or the
    /// worker thread dies from an unisolated panic.
    #[must_use]
    pub fn is_running(&self) -> bool {
        !self.shared.state.lock().shutdown
    }

    /// Returns the number of tasks the worker has finished, including tasks
    /// that panicked under panic isolation.
    #[must_use]
    pub fn executed(&self) -> u64 {
        self.shared.executed.load(Ordering::Acquire)
    }

    /// Returns the worker thread name.
    #[must_use]
    pub fn thread_name(&self) -> &str {
        &self.thread_name
    }
}

impl Schedule for WorkerScheduler {
    fn schedule(&self, task: Task) {
        let mut state = self.shared.state.lock();
        if state.shutdown {
            drop(state);
            warn_event!(thread = %self.thread_name, "task scheduled after shutdown dropped");
            return;
        }
        state.queue.push_back(task);
        drop(state);
        self.shared.available.notify_one();
    }
}

impl Drop for WorkerScheduler {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Marks the scheduler stopped if the worker thread unwinds.
struct StopOnUnwind<'a>(&'a WorkerShared);

impl Drop for StopOnUnwind<'_> {
    fn drop(&mut self) {
        if !thread::panicking() {
            return;
        }
        let orphaned = {
            let mut state = self.0.state.lock();
            state.shutdown = true;
            std::mem::take(&mut state.queue)
        };
        warn_event!(
            dropped = orphaned.len(),
            "worker thread panicked; queued tasks dropped"
        );
        // Dropped outside the lock: a task may own the last scheduler handle.
        drop(orphaned);
    }
}

fn run_worker(shared: &WorkerShared, isolate_panics: bool) {
    let _stop_on_unwind = StopOnUnwind(shared);
    loop {
        let task = {
            let mut state = shared.state.lock();
            loop {
                if let Some(task) = state.queue.pop_front() {
                    break task;
                }
                if state.shutdown {
                    return;
                }
                shared.available.wait(&mut state);
            }
        };

        if isolate_panics {
            if panic::catch_unwind(AssertUnwindSafe(|| task.run())).is_err() {
                warn_event!("scheduled task panicked; worker continues");
            }
        } else {
            task.run();
        }
        shared.executed.fetch_add(1, Ordering::AcqRel);
    }
}
