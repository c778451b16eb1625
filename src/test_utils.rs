//! Test helpers: logging initialization and phase/assertion macros.
//!
//! Available under `cfg(test)` and with the `test-internals` feature so that
//! integration tests and downstream crates can reuse them.

use std::sync::Once;

#[doc(hidden)]
pub use tracing;

static INIT_LOGGING: Once = Once::new();

/// Installs a test-friendly `tracing` subscriber once per process.
///
/// The filter honours `RUST_LOG` and defaults to `deferred=trace`. Output
/// goes through the test writer so it is captured per test.
pub fn init_test_logging() {
    INIT_LOGGING.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("deferred=trace"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}

/// Logs the start of a named test phase.
#[macro_export]
macro_rules! test_phase {
    ($name:expr) => {
        $crate::test_utils::tracing::info!(phase = %$name, "test phase start");
    };
}

/// Logs the end of a named test.
#[macro_export]
macro_rules! test_complete {
    ($name:expr) => {
        $crate::test_utils::tracing::info!(test = %$name, "test complete");
    };
}

/// Asserts `cond`, logging the expected and actual values first.
#[macro_export]
macro_rules! assert_with_log {
    ($cond:expr, $msg:expr, $expected:expr, $actual:expr) => {{
        let passed = $cond;
        let expected = &$expected;
        let actual = &$actual;
        $crate::test_utils::tracing::debug!(
            expected = ?expected,
            actual = ?actual,
            passed,
            "{}",
            $msg
        );
        assert!(
            passed,
            "{}: expected {:?}, got {:?}",
            $msg, expected, actual
        );
    }};
}
