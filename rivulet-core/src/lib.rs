// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Core types shared by the rivulet crates.
//!
//! - [`StreamItem`] and [`RivuletError`]: the signals a publisher emits
//! - [`Timer`], [`TokioTimer`] and [`VirtualTimer`]: clocks for time-based operators
//! - [`Subscriber`] and [`SubscribeExt`]: the receiving end of a publisher

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
#[macro_use]
mod logging;
pub mod error;
pub mod stream_item;
pub mod subscriber;
pub mod timer;
pub mod virtual_time;

pub use self::error::{Result, RivuletError};
pub use self::stream_item::StreamItem;
pub use self::subscriber::{CollectingSubscriber, SubscribeExt, Subscriber, Termination};
#[cfg(feature = "runtime-tokio")]
pub use self::timer::TokioTimer;
pub use self::timer::Timer;
pub use self::virtual_time::{VirtualInstant, VirtualSleep, VirtualTimer};
