//! Optional tracing integration.
//!
//! With the `tracing-integration` feature the macros below forward to
//! [`tracing`](https://docs.rs/tracing). Without it they expand to nothing,
//! so logging call sites cost nothing in builds that do not want them.

macro_rules! trace {
    ($($arg:tt)*) => {{
        #[cfg(feature = "tracing-integration")]
        ::tracing::trace!($($arg)*);
    }};
}

macro_rules! debug {
    ($($arg:tt)*) => {{
        #[cfg(feature = "tracing-integration")]
        ::tracing::debug!($($arg)*);
    }};
}

// `warn` would clash with the built-in lint attribute once re-exported.
macro_rules! warn_event {
    ($($arg:tt)*) => {{
        #[cfg(feature = "tracing-integration")]
        ::tracing::warn!($($arg)*);
    }};
}

pub(crate) use {debug, trace, warn_event};
