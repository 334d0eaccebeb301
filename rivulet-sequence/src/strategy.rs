// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Execution strategies for folds and maps over a slice.
//!
//! [`Sequential`] runs everything on the calling thread. [`Parallel`] owns a
//! fixed-size rayon pool, cuts the input into one contiguous partition per worker,
//! folds every partition on the pool and combines the partial results left to right.
//! Partitioning depends only on the input length and the worker count, never on
//! scheduling, so the reported partition sizes are reproducible.

use crate::config::ParallelConfig;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use rivulet_core::{Result, RivuletError};
use std::sync::Arc;

/// Outcome of a fold: the value and how the input was partitioned.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FoldReport<A> {
    pub value: A,
    /// Length of every partition, in source order. Empty input has no partitions.
    pub partitions: Vec<usize>,
}

impl<A> FoldReport<A> {
    pub fn into_value(self) -> A {
        self.value
    }

    /// Length of the largest partition, the number of elements on the critical path.
    pub fn critical_path(&self) -> usize {
        self.partitions.iter().copied().max().unwrap_or(0)
    }

    /// Number of elements folded across all partitions.
    pub fn total_work(&self) -> usize {
        self.partitions.iter().sum()
    }
}

pub trait Strategy: Clone + Send + Sync {
    fn fold<T, A, ID, F, R>(
        &self,
        items: &[T],
        identity: ID,
        fold_op: F,
        reduce_op: R,
    ) -> FoldReport<A>
    where
        T: Sync,
        A: Send,
        ID: Fn() -> A + Send + Sync,
        F: Fn(A, &T) -> A + Send + Sync,
        R: Fn(A, A) -> A + Send + Sync;

    /// Maps every element, preserving source order in the output.
    fn map<T, U, F>(&self, items: &[T], f: F) -> Vec<U>
    where
        T: Sync,
        U: Send,
        F: Fn(&T) -> U + Send + Sync;
}

#[derive(Default, Debug, Clone, Copy)]
pub struct Sequential;

impl Strategy for Sequential {
    fn fold<T, A, ID, F, R>(
        &self,
        items: &[T],
        identity: ID,
        fold_op: F,
        _reduce_op: R,
    ) -> FoldReport<A>
    where
        T: Sync,
        A: Send,
        ID: Fn() -> A + Send + Sync,
        F: Fn(A, &T) -> A + Send + Sync,
        R: Fn(A, A) -> A + Send + Sync,
    {
        let partitions = if items.is_empty() {
            Vec::new()
        } else {
            vec![items.len()]
        };

        FoldReport {
            value: items.iter().fold(identity(), fold_op),
            partitions,
        }
    }

    fn map<T, U, F>(&self, items: &[T], f: F) -> Vec<U>
    where
        T: Sync,
        U: Send,
        F: Fn(&T) -> U + Send + Sync,
    {
        items.iter().map(f).collect()
    }
}

#[derive(Debug, Clone)]
pub struct Parallel {
    thread_pool: Arc<ThreadPool>,
    workers: usize,
}

impl Parallel {
    /// Builds a dedicated pool with `config.workers()` threads.
    ///
    /// # Errors
    ///
    /// Returns [`RivuletError::ConfigurationError`] if the pool cannot be created.
    pub fn new(config: &ParallelConfig) -> Result<Self> {
        let workers = config.workers();
        let thread_pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|index| format!("rivulet-worker-{index}"))
            .build()
            .map_err(|e| {
                RivuletError::configuration_error(format!(
                    "failed to build a pool of {workers} workers: {e}"
                ))
            })?;

        debug!("parallel strategy ready with {} workers", workers);
        Ok(Self::from(Arc::new(thread_pool)))
    }

    pub const fn workers(&self) -> usize {
        self.workers
    }

    fn partition_len(&self, len: usize) -> usize {
        len.div_ceil(self.workers).max(1)
    }
}

impl From<Arc<ThreadPool>> for Parallel {
    fn from(thread_pool: Arc<ThreadPool>) -> Self {
        let workers = thread_pool.current_num_threads().max(1);
        Self {
            thread_pool,
            workers,
        }
    }
}

impl Strategy for Parallel {
    fn fold<T, A, ID, F, R>(
        &self,
        items: &[T],
        identity: ID,
        fold_op: F,
        reduce_op: R,
    ) -> FoldReport<A>
    where
        T: Sync,
        A: Send,
        ID: Fn() -> A + Send + Sync,
        F: Fn(A, &T) -> A + Send + Sync,
        R: Fn(A, A) -> A + Send + Sync,
    {
        let partition_len = self.partition_len(items.len());
        let partitions: Vec<usize> = items.chunks(partition_len).map(<[T]>::len).collect();
        debug!(
            "folding {} items in {} partitions on {} workers",
            items.len(),
            partitions.len(),
            self.workers
        );

        let partials: Vec<A> = self.thread_pool.install(|| {
            items
                .par_chunks(partition_len)
                .map(|chunk| chunk.iter().fold(identity(), &fold_op))
                .collect()
        });

        let value = partials
            .into_iter()
            .reduce(&reduce_op)
            .unwrap_or_else(&identity);

        FoldReport { value, partitions }
    }

    fn map<T, U, F>(&self, items: &[T], f: F) -> Vec<U>
    where
        T: Sync,
        U: Send,
        F: Fn(&T) -> U + Send + Sync,
    {
        self.thread_pool.install(|| items.par_iter().map(f).collect())
    }
}
