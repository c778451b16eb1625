//! Shared helpers for integration tests.

#![allow(dead_code)]

use deferred::Reaction;
use deferred::runtime::TaskQueue;
use parking_lot::Mutex;
use std::sync::Arc;

pub fn init_test_logging() {
    deferred::test_utils::init_test_logging();
}

pub fn queue() -> Arc<TaskQueue> {
    Arc::new(TaskQueue::new())
}

/// Records labelled reaction invocations in arrival order.
#[derive(Clone, Default)]
pub struct Recorder {
    calls: Arc<Mutex<Vec<String>>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a fulfilment reaction that records `label:value`.
    pub fn ok(&self, label: &'static str) -> Reaction<i32> {
        self.record(label)
    }

    /// Returns a rejection reaction that records `label:value`.
    pub fn err(&self, label: &'static str) -> Reaction<String> {
        self.record(label)
    }

    fn record<V>(&self, label: &'static str) -> Reaction<V>
    where
        V: std::fmt::Debug + Send + 'static,
    {
        let calls = Arc::clone(&self.calls);
        Box::new(move |value: V| calls.lock().push(format!("{label}:{value:?}")))
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.lock().is_empty()
    }
}
