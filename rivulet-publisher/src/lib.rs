// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Publishers: streams of [`StreamItem`](rivulet_core::StreamItem) emitted over time.
//!
//! A publisher is any `Stream<Item = StreamItem<T>>`. It emits zero or more values,
//! then ends either by completing (the stream returns `None`) or with a single
//! error item. Nothing happens until it is polled, and it can be consumed once.
//!
//! # Sources
//!
//! - [`just`] and [`Single`]: at most one value
//! - [`just_all`], [`from_iter`] and [`from_results`]: many values
//! - [`empty`] and [`error`]: no value at all
//!
//! # Operators
//!
//! | Operator | Behaviour |
//! |----------|-----------|
//! | [`map_items`](MapItemsExt::map_items) | transforms each value |
//! | [`filter_items`](FilterItemsExt::filter_items) | drops values failing a predicate |
//! | [`concat_with`](ConcatWithExt::concat_with) | all of A, then all of B |
//! | [`merge_with`](MergeWithExt::merge_with) | A and B interleaved by readiness |
//! | [`zip_with`](ZipWithExt::zip_with) | pairs the i-th values of A and B |
//! | [`delay_with_timer`](DelayExt::delay_with_timer) | shifts every value later |
//! | [`delay_elements_with_timer`](DelayElementsExt::delay_elements_with_timer) | spaces values out |
//!
//! Errors end every operator: once an error item has been forwarded, the
//! operator completes on the next poll and never polls its sources again.
//!
//! # Example
//!
//! ```
//! use futures::executor::block_on;
//! use rivulet_core::CollectingSubscriber;
//! use rivulet_publisher::prelude::*;
//!
//! let merged = just_all(["Juan", "Ana"]).merge_with(just_all(["Carlos", "Elena"]));
//! let mut subscriber = CollectingSubscriber::new();
//!
//! block_on(merged.subscribe_with(&mut subscriber)).unwrap();
//! assert_eq!(subscriber.values(), &["Juan", "Ana", "Carlos", "Elena"]);
//! ```

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
#[macro_use]
mod logging;
pub mod concat_with;
pub mod delay;
pub mod delay_elements;
pub mod filter_items;
pub mod map_items;
pub mod merge_with;
pub mod prelude;
pub mod single;
pub mod source;
pub mod zip_with;

pub use self::concat_with::{ConcatWith, ConcatWithExt};
pub use self::delay::{Delay, DelayExt};
pub use self::delay_elements::{DelayElements, DelayElementsExt};
pub use self::filter_items::{FilterItems, FilterItemsExt};
pub use self::map_items::{MapItems, MapItemsExt};
pub use self::merge_with::{MergeWith, MergeWithExt};
pub use self::single::Single;
pub use self::source::{
    empty, error, from_iter, from_results, just, just_all, FromIter, FromResults,
};
pub use self::zip_with::{ZipWith, ZipWithExt};
