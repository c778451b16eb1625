//! Core types for deferred values.
//!
//! - [`id`]: Identifier type (`DeferredId`)
//! - [`outcome`]: Settlement state and recorded outcome

pub mod id;
pub mod outcome;

pub use id::DeferredId;
pub use outcome::{Outcome, State};
