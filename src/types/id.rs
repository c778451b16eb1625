//! Identifier types for deferred values.
//!
//! Every [`DeferredValue`](crate::DeferredValue) receives a process-unique
//! [`DeferredId`] at construction so that log lines emitted by settlement,
//! registration, and delivery can be correlated.

use core::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_DEFERRED_ID: AtomicU64 = AtomicU64::new(1);

/// A unique identifier for a deferred value.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeferredId(u64);

impl DeferredId {
    /// Allocates the next identifier.
    #[must_use]
    pub(crate) fn next() -> Self {
        Self(NEXT_DEFERRED_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Creates an identifier for testing purposes.
    #[doc(hidden)]
    #[must_use]
    pub const fn new_for_test(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw numeric value.
    #[inline]
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for DeferredId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DeferredId({})", self.0)
    }
}

impl fmt::Display for DeferredId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "D{}", self.0)
    }
}
