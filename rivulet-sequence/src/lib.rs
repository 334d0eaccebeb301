// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Immutable sequences with lazy pipelines and sequential or parallel folds.
//!
//! - [`Sequence`]: a finite, ordered, immutable collection with eager `map`,
//!   `filter`, `reduce`, `all_match` and `any_match`
//! - [`Pipeline`]: the lazy form of the same operations, evaluated by a terminal call
//! - [`Strategy`]: runs folds and maps either on the calling thread ([`Sequential`])
//!   or on a fixed-size worker pool ([`Parallel`])
//! - [`CostModel`]: turns a fold's partitioning into a deterministic elapsed time
//!
//! # Sequential versus parallel
//!
//! ```
//! use rivulet_sequence::{CostModel, Parallel, ParallelConfig, Sequence, Sequential};
//! use std::time::Duration;
//!
//! let numbers: Sequence<u64> = (1..=11).collect();
//! let cost = CostModel::per_item(Duration::from_secs(1));
//! let parallel = Parallel::new(&ParallelConfig::default().with_workers(11).unwrap()).unwrap();
//!
//! let sequential = numbers.fold_with(&Sequential, || 0u64, |acc, n| acc + n * n, |a, b| a + b);
//! let concurrent = numbers.fold_with(&parallel, || 0u64, |acc, n| acc + n * n, |a, b| a + b);
//!
//! assert_eq!(sequential.value, 506);
//! assert_eq!(concurrent.value, 506);
//! assert_eq!(cost.makespan(&sequential), Duration::from_secs(11));
//! assert_eq!(cost.makespan(&concurrent), Duration::from_secs(1));
//! ```

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
#[macro_use]
mod logging;
pub mod config;
pub mod cost;
pub mod pipeline;
pub mod sequence;
pub mod strategy;

pub use config::{ParallelConfig, PARALLELISM_ENV};
pub use cost::CostModel;
pub use pipeline::Pipeline;
pub use sequence::Sequence;
pub use strategy::{FoldReport, Parallel, Sequential, Strategy};
