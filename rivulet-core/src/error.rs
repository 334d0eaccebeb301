// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Error types for the rivulet sequence and publisher libraries.
//!
//! A single root [`RivuletError`] covers every failure a pipeline or a publisher
//! can report: failed stream processing, expired time-bounded waits and invalid
//! configuration of the worker pool.
//!
//! # Examples
//!
//! ```
//! use rivulet_core::{Result, RivuletError};
//!
//! fn build_pool(workers: usize) -> Result<usize> {
//!     if workers == 0 {
//!         return Err(RivuletError::configuration_error("worker count must be positive"));
//!     }
//!     Ok(workers)
//! }
//!
//! assert!(build_pool(0).is_err());
//! ```

/// Root error type for all rivulet operations
///
/// Publishers carry these inside [`StreamItem::Error`](crate::StreamItem::Error);
/// an error is always the last signal a publisher emits.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RivuletError {
    /// Stream processing encountered an error
    ///
    /// General error for publisher operations that don't fit
    /// other specific categories.
    #[error("Stream processing error: {context}")]
    StreamProcessingError {
        /// Description of what went wrong during stream processing
        context: String,
    },

    /// A time-bounded wait expired
    #[error("Timeout error: {context}")]
    TimeoutError {
        /// Context about the timeout (e.g. duration)
        context: String,
    },

    /// Invalid configuration, such as a worker pool with zero workers
    #[error("Configuration error: {context}")]
    ConfigurationError {
        /// Which setting was rejected and why
        context: String,
    },
}

impl RivuletError {
    /// Create a stream processing error with the given context
    pub fn stream_error(context: impl Into<String>) -> Self {
        Self::StreamProcessingError {
            context: context.into(),
        }
    }

    /// Create a timeout error with the given context
    pub fn timeout_error(context: impl Into<String>) -> Self {
        Self::TimeoutError {
            context: context.into(),
        }
    }

    /// Create a configuration error with the given context
    pub fn configuration_error(context: impl Into<String>) -> Self {
        Self::ConfigurationError {
            context: context.into(),
        }
    }
}

/// Specialized Result type for rivulet operations
pub type Result<T> = std::result::Result<T, RivuletError>;
