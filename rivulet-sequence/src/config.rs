// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rivulet_core::{Result, RivuletError};
use std::env;
use std::num::NonZeroUsize;
use std::thread;

/// Environment variable that overrides the worker count of [`ParallelConfig::from_env`].
pub const PARALLELISM_ENV: &str = "RIVULET_PARALLELISM";

/// Sizing of the worker pool used by [`Parallel`](crate::Parallel).
///
/// # Examples
///
/// ```
/// use rivulet_sequence::ParallelConfig;
///
/// let config = ParallelConfig::default().with_workers(11).unwrap();
/// assert_eq!(config.workers(), 11);
///
/// assert!(ParallelConfig::default().with_workers(0).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParallelConfig {
    workers: NonZeroUsize,
}

impl Default for ParallelConfig {
    /// One worker per available CPU, or a single worker when that is unknown.
    fn default() -> Self {
        Self {
            workers: thread::available_parallelism().unwrap_or(NonZeroUsize::MIN),
        }
    }
}

impl ParallelConfig {
    /// Reads the worker count from `RIVULET_PARALLELISM`, falling back to the default.
    ///
    /// # Errors
    ///
    /// Returns [`RivuletError::ConfigurationError`] when the variable is set but is
    /// not a positive integer.
    pub fn from_env() -> Result<Self> {
        match env::var(PARALLELISM_ENV) {
            Ok(value) => Self::default().with_workers_str(&value),
            Err(env::VarError::NotPresent) => Ok(Self::default()),
            Err(env::VarError::NotUnicode(_)) => Err(RivuletError::configuration_error(format!(
                "{PARALLELISM_ENV} is not valid unicode"
            ))),
        }
    }

    /// # Errors
    ///
    /// Returns [`RivuletError::ConfigurationError`] when `workers` is zero.
    pub fn with_workers(self, workers: usize) -> Result<Self> {
        let workers = NonZeroUsize::new(workers).ok_or_else(|| {
            RivuletError::configuration_error("worker count must be greater than zero")
        })?;
        Ok(Self { workers })
    }

    /// Parses a textual worker count, as found in `RIVULET_PARALLELISM`.
    ///
    /// # Errors
    ///
    /// Returns [`RivuletError::ConfigurationError`] for anything but a positive integer.
    pub fn with_workers_str(self, workers: &str) -> Result<Self> {
        let parsed = workers.trim().parse::<usize>().map_err(|e| {
            RivuletError::configuration_error(format!(
                "invalid {PARALLELISM_ENV} value {workers:?}: {e}"
            ))
        })?;
        self.with_workers(parsed)
    }

    pub const fn workers(&self) -> usize {
        self.workers.get()
    }
}
