// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! # Rivulet
//!
//! Two small toolkits for processing values, one synchronous and one asynchronous.
//!
//! **Sequences** ([`Sequence`]) are immutable, ordered collections. They are
//! transformed eagerly (`map`, `filter`, `reduce`, `all_match`, ...) or through a
//! lazy [`Pipeline`], and folded either on the calling thread ([`Sequential`]) or
//! on a fixed pool of workers ([`Parallel`]).
//!
//! ```
//! use rivulet::prelude::*;
//!
//! let names = Sequence::from(["Juan", "Ana", "Carlos", "Elena"]);
//!
//! let joined = names.reduce(String::new(), |acc, name| acc + " " + *name);
//! assert_eq!(joined.trim(), "Juan Ana Carlos Elena");
//! assert!(names.any_match(|name| name.starts_with('A')));
//! ```
//!
//! **Publishers** are streams of [`StreamItem`]s emitted over time. They are built
//! from sources such as [`just`] or [`from_iter`], combined with `concat_with`,
//! `merge_with` and `zip_with`, spread out with the delay operators, and consumed
//! once by a [`Subscriber`]. Time-based operators run on any [`Timer`]; with a
//! [`VirtualTimer`] tests control time explicitly and never sleep.
//!
//! ```
//! use futures::executor::block_on;
//! use rivulet::prelude::*;
//!
//! let pairs = just_all(["Juan", "Ana"])
//!     .zip_with(just_all(["Carlos", "Elena"]), |a, b| format!("{a} - {b}"));
//! let mut subscriber = CollectingSubscriber::new();
//!
//! block_on(pairs.subscribe_with(&mut subscriber)).unwrap();
//! assert_eq!(subscriber.values(), &["Juan - Carlos", "Ana - Elena"]);
//! ```
//!
//! # Crate layout
//!
//! | Crate | Contents |
//! |-------|----------|
//! | `rivulet-core` | errors, stream items, timers, the virtual clock, subscribers |
//! | `rivulet-sequence` | sequences, pipelines, fold strategies |
//! | `rivulet-publisher` | publisher sources and operators |
//! | `rivulet-test-utils` | `StepVerifier`, test channels and fixtures |

pub use rivulet_core::{
    CollectingSubscriber, Result, RivuletError, StreamItem, SubscribeExt, Subscriber, Termination,
    Timer, VirtualInstant, VirtualSleep, VirtualTimer,
};
#[cfg(feature = "runtime-tokio")]
pub use rivulet_core::TokioTimer;

pub use rivulet_sequence::{
    CostModel, FoldReport, Parallel, ParallelConfig, Pipeline, Sequence, Sequential, Strategy,
    PARALLELISM_ENV,
};

pub use rivulet_publisher::{
    empty, error, from_iter, from_results, just, just_all, ConcatWith, Delay, DelayElements,
    FilterItems, MapItems, MergeWith, Single, ZipWith,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use rivulet_core::{
        CollectingSubscriber, RivuletError, StreamItem, SubscribeExt, Subscriber, Timer,
        VirtualTimer,
    };
    pub use rivulet_publisher::prelude::*;
    pub use rivulet_sequence::{
        CostModel, Parallel, ParallelConfig, Sequence, Sequential, Strategy,
    };
}
