// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Lazy, pull-based pipelines over a [`Sequence`].
//!
//! Intermediate operations (`map`, `filter`, `inspect`) only build up the pipeline.
//! Elements are pulled one at a time when a terminal operation runs, so no
//! intermediate collection is ever allocated and short-circuiting terminals stop
//! pulling as soon as the answer is known.
//!
//! ```
//! use rivulet_sequence::Sequence;
//!
//! let names = Sequence::from(["Juan", "Ana", "Carlos", "Elena"]);
//!
//! let upper = names
//!     .pipeline()
//!     .filter(|name| name.len() > 3)
//!     .map(str::to_uppercase)
//!     .collect();
//!
//! assert_eq!(upper.as_slice(), &["JUAN", "CARLOS", "ELENA"]);
//! ```

use crate::sequence::Sequence;
use core::iter::{Filter, Inspect, Map, Sum};

/// A deferred chain of transformations, materialized by a terminal operation.
#[derive(Clone, Debug)]
#[must_use = "pipelines are lazy and do nothing unless a terminal operation runs"]
pub struct Pipeline<I> {
    iter: I,
}

impl<I: Iterator> Pipeline<I> {
    pub fn new(iter: I) -> Self {
        Self { iter }
    }

    pub fn map<U, F>(self, f: F) -> Pipeline<Map<I, F>>
    where
        F: FnMut(I::Item) -> U,
    {
        Pipeline::new(self.iter.map(f))
    }

    pub fn filter<P>(self, predicate: P) -> Pipeline<Filter<I, P>>
    where
        P: FnMut(&I::Item) -> bool,
    {
        Pipeline::new(self.iter.filter(predicate))
    }

    /// Observes each element as it flows past, without changing it.
    pub fn inspect<F>(self, f: F) -> Pipeline<Inspect<I, F>>
    where
        F: FnMut(&I::Item),
    {
        Pipeline::new(self.iter.inspect(f))
    }

    pub fn collect(self) -> Sequence<I::Item> {
        self.iter.collect()
    }

    pub fn for_each<F>(self, f: F)
    where
        F: FnMut(I::Item),
    {
        self.iter.for_each(f);
    }

    /// Left fold from `seed`; returns `seed` when the pipeline yields nothing.
    pub fn reduce<A, F>(self, seed: A, combine: F) -> A
    where
        F: FnMut(A, I::Item) -> A,
    {
        self.iter.fold(seed, combine)
    }

    pub fn reduce_first<F>(self, combine: F) -> Option<I::Item>
    where
        F: FnMut(I::Item, I::Item) -> I::Item,
    {
        self.iter.reduce(combine)
    }

    pub fn all_match<P>(mut self, predicate: P) -> bool
    where
        P: FnMut(I::Item) -> bool,
    {
        self.iter.all(predicate)
    }

    pub fn any_match<P>(mut self, predicate: P) -> bool
    where
        P: FnMut(I::Item) -> bool,
    {
        self.iter.any(predicate)
    }

    pub fn count(self) -> usize {
        self.iter.count()
    }

    pub fn sum<S>(self) -> S
    where
        S: Sum<I::Item>,
    {
        self.iter.sum()
    }
}

impl<I: Iterator> IntoIterator for Pipeline<I> {
    type Item = I::Item;
    type IntoIter = I;

    fn into_iter(self) -> I {
        self.iter
    }
}
