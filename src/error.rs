//! Error types.
//!
//! The primitive itself raises exactly one error, [`InvalidProducerError`],
//! when a type-erased producer turns out not to be callable. Settlement and
//! reaction registration never fail. [`Error`] collects every error the crate
//! can surface for callers that prefer a single type.

use thiserror::Error;

/// Construction was handed something that is not a producer.
///
/// Returned by [`DeferredValue::from_dynamic`](crate::DeferredValue::from_dynamic)
/// before the instance exists, so no other effect has taken place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("producer must be callable: expected `{expected}`")]
pub struct InvalidProducerError {
    expected: &'static str,
}

impl InvalidProducerError {
    /// Creates the error, naming the producer type that was expected.
    #[must_use]
    pub const fn new(expected: &'static str) -> Self {
        Self { expected }
    }

    /// Returns the name of the producer type that was expected.
    #[must_use]
    pub const fn expected(&self) -> &'static str {
        self.expected
    }
}

/// Any error the crate can report.
#[derive(Debug, Error)]
pub enum Error {
    /// A type-erased producer was not callable.
    #[error(transparent)]
    InvalidProducer(#[from] InvalidProducerError),
    /// The worker configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),
    /// The worker thread could not be spawned.
    #[error("failed to start worker thread: {0}")]
    WorkerSpawn(#[from] std::io::Error),
}

/// Result alias using the crate-wide [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
