//! Worker scheduler configuration.
//!
//! [`WorkerConfig`] is a plain serde-friendly struct with builder-style
//! setters. With the `config-file` feature it can be loaded from TOML:
//!
//! ```toml
//! thread_name = "reactions"
//! stack_size = 262144
//! isolate_panics = false
//! ```
//!
//! Missing keys fall back to [`WorkerConfig::default`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default name for the worker thread.
pub const DEFAULT_THREAD_NAME: &str = "deferred-worker";

/// Configuration for [`WorkerScheduler`](crate::runtime::WorkerScheduler).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkerConfig {
    /// Name given to the worker OS thread.
    pub thread_name: String,
    /// Stack size for the worker thread. `None` uses the platform default.
    pub stack_size: Option<usize>,
    /// Catch panics raised by tasks so the worker keeps running.
    pub isolate_panics: bool,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            thread_name: DEFAULT_THREAD_NAME.to_owned(),
            stack_size: None,
            isolate_panics: true,
        }
    }
}

impl WorkerConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the worker thread name.
    #[must_use]
    pub fn with_thread_name(mut self, name: impl Into<String>) -> Self {
        self.thread_name = name.into();
        self
    }

    /// Sets the worker thread stack size.
    #[must_use]
    pub const fn with_stack_size(mut self, bytes: usize) -> Self {
        self.stack_size = Some(bytes);
        self
    }

    /// Enables or disables panic isolation.
    #[must_use]
    pub const fn with_isolate_panics(mut self, isolate: bool) -> Self {
        self.isolate_panics = isolate;
        self
    }

    /// Checks that the worker thread can be spawned with this configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.thread_name.is_empty() {
            return Err(ConfigError::EmptyThreadName);
        }
        if self.thread_name.contains('\0') {
            return Err(ConfigError::NulInThreadName);
        }
        Ok(())
    }

    /// Parses and validates a configuration from a TOML document.
    #[cfg(feature = "config-file")]
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }
}

/// Error loading a [`WorkerConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The TOML document was not valid configuration.
    #[cfg(feature = "config-file")]
    #[error("invalid worker config: {0}")]
    Parse(#[from] toml::de::Error),
    /// `thread_name` was empty.
    #[error("invalid worker config: thread_name must not be empty")]
    EmptyThreadName,
    /// `thread_name` contained a NUL byte, which OS thread names cannot hold.
    #[error("invalid worker config: thread_name must not contain NUL")]
    NulInThreadName,
}
