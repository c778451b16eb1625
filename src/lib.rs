//! Deferred: a settle-once deferred value with scheduled reactions.
//!
//! # Overview
//!
//! A [`DeferredValue`] stands for a result that is not known yet. A producer,
//! run synchronously when the value is created, receives a [`Fulfill`] and a
//! [`Reject`] handle and eventually settles the value through one of them.
//! Consumers register reactions that fire once the outcome is known.
//!
//! # Core Guarantees
//!
//! - **Settle once**: the first settlement wins; later settlements are no-ops
//! - **Never inline**: reactions run on an injected [`Schedule`] substrate,
//!   strictly after the synchronous block that triggered them
//! - **Fan-out in order**: every registration is delivered, in registration
//!   order
//! - **Exactly once**: each reaction is a `FnOnce` invoked at most once, and
//!   only for the outcome it was registered for
//!
//! # Module Structure
//!
//! - [`deferred`]: The deferred value, settlement handles, reactions
//! - [`runtime`]: The `Schedule` capability and the bundled substrates
//! - [`types`]: State, outcome, identifier types
//! - [`config`]: Worker scheduler configuration
//! - [`error`](mod@error): Error types
//! - `tracing_compat`: Optional tracing integration (`tracing-integration`
//!   feature)

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod deferred;
pub mod error;
pub mod runtime;
pub mod types;

mod tracing_compat;

// ── Test-only modules ───────────────────────────────────────────────────
#[cfg(any(test, feature = "test-internals"))]
pub mod test_utils;

pub use config::{ConfigError, WorkerConfig};
pub use deferred::{DeferredValue, Fulfill, Producer, Reaction, Reject};
pub use error::{Error, InvalidProducerError, Result};
pub use runtime::{Schedule, Task, TaskQueue, WorkerScheduler};
pub use types::{DeferredId, Outcome, State};
