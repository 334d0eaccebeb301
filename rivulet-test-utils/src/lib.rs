// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Test utilities and fixtures for the rivulet crates.
//!
//! This crate is meant for tests and benchmarks only.
//!
//! - [`StepVerifier`]: scripted verification of a publisher's signals, on the
//!   runtime clock or on a [`VirtualTimer`](rivulet_core::VirtualTimer)
//! - [`test_channel`] and [`test_channel_with_errors`]: publishers fed
//!   imperatively from the test body
//! - [`test_data`]: name and number fixtures
//! - [`helpers`]: assertion helpers built on tokio timeouts
//!
//! # Feeding a publisher from the test
//!
//! ```rust
//! use rivulet_test_utils::{test_channel, StepVerifier};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> anyhow::Result<()> {
//! let (tx, stream) = test_channel();
//! tx.send("Juan")?;
//! tx.send("Ana")?;
//! drop(tx);
//!
//! StepVerifier::create(stream)
//!     .expect_next(["Juan", "Ana"])
//!     .verify_complete()
//!     .await?;
//! # Ok(())
//! # }
//! ```

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
#[macro_use]
mod logging;
pub mod helpers;
pub mod step_verifier;
pub mod test_data;

use futures::{Stream, StreamExt};
use rivulet_core::StreamItem;
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;

pub use helpers::{assert_no_element_emitted, collect_values, unwrap_stream};
pub use step_verifier::{StepVerifier, VerificationError, DEFAULT_STEP_TIMEOUT};

/// Creates a publisher fed by the returned sender; every value sent is emitted
/// as `StreamItem::Value`. The publisher completes once the sender is dropped.
pub fn test_channel<T: Send + 'static>() -> (
    mpsc::UnboundedSender<T>,
    impl Stream<Item = StreamItem<T>> + Send,
) {
    let (tx, rx) = mpsc::unbounded_channel();
    let stream = UnboundedReceiverStream::new(rx).map(StreamItem::Value);
    (tx, stream)
}

/// Like [`test_channel`], but the test sends `StreamItem`s, so errors can be
/// injected at any point.
///
/// # Example
///
/// ```rust
/// use rivulet_core::{RivuletError, StreamItem};
/// use rivulet_test_utils::{test_channel_with_errors, StepVerifier};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> anyhow::Result<()> {
/// let (tx, stream) = test_channel_with_errors();
/// tx.send(StreamItem::Value(42))?;
/// tx.send(StreamItem::Error(RivuletError::stream_error("test error")))?;
///
/// StepVerifier::create(stream)
///     .expect_next([42])
///     .verify_error()
///     .await?;
/// # Ok(())
/// # }
/// ```
pub fn test_channel_with_errors<T: Send + 'static>() -> (
    mpsc::UnboundedSender<StreamItem<T>>,
    impl Stream<Item = StreamItem<T>> + Send,
) {
    let (tx, rx) = mpsc::unbounded_channel();
    let stream = UnboundedReceiverStream::new(rx);
    (tx, stream)
}
