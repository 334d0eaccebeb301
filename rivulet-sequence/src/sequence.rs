// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::pipeline::Pipeline;
use crate::strategy::{FoldReport, Strategy};
use core::fmt::{self, Debug};
use core::iter::{Cloned, Sum};
use core::slice;
use std::sync::Arc;

/// An immutable, finite, ordered collection of values.
///
/// Every operation leaves the sequence untouched and returns a new sequence or a
/// scalar. Clones share the same backing storage, so handing a sequence to another
/// thread or keeping the original around after a transformation is cheap.
///
/// # Examples
///
/// ```
/// use rivulet_sequence::Sequence;
///
/// let numbers = Sequence::from(vec![1, 2, 3, 4]);
///
/// let doubled = numbers.map(|n| n * 2);
/// let evens = numbers.filter(|n| n % 2 == 0);
///
/// assert_eq!(doubled.as_slice(), &[2, 4, 6, 8]);
/// assert_eq!(evens.as_slice(), &[2, 4]);
/// assert_eq!(numbers.as_slice(), &[1, 2, 3, 4]);
/// assert_eq!(numbers.reduce(0, |acc, n| acc + n), 10);
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Sequence<T> {
    items: Arc<[T]>,
}

impl<T> Sequence<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items: items.into(),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.items.to_vec()
    }

    /// Starts a lazy pipeline over owned copies of the elements.
    ///
    /// Nothing runs until a terminal operation such as
    /// [`collect`](Pipeline::collect) or [`reduce`](Pipeline::reduce).
    pub fn pipeline(&self) -> Pipeline<Cloned<slice::Iter<'_, T>>>
    where
        T: Clone,
    {
        Pipeline::new(self.items.iter().cloned())
    }

    /// Applies `f` to every element, preserving order and length.
    pub fn map<U, F>(&self, f: F) -> Sequence<U>
    where
        F: FnMut(&T) -> U,
    {
        self.items.iter().map(f).collect()
    }

    /// Keeps the elements for which `predicate` holds, in their original order.
    pub fn filter<P>(&self, mut predicate: P) -> Sequence<T>
    where
        T: Clone,
        P: FnMut(&T) -> bool,
    {
        self.items
            .iter()
            .filter(|&item| predicate(item))
            .cloned()
            .collect()
    }

    /// Runs `f` on every element in order.
    pub fn for_each<F>(&self, f: F)
    where
        F: FnMut(&T),
    {
        self.items.iter().for_each(f);
    }

    /// Folds left to right starting from `seed`. An empty sequence yields `seed`.
    pub fn reduce<A, F>(&self, seed: A, combine: F) -> A
    where
        F: FnMut(A, &T) -> A,
    {
        self.items.iter().fold(seed, combine)
    }

    /// Folds left to right starting from the first element, `None` when empty.
    pub fn reduce_first<F>(&self, combine: F) -> Option<T>
    where
        T: Clone,
        F: FnMut(T, T) -> T,
    {
        self.items.iter().cloned().reduce(combine)
    }

    /// `true` when every element satisfies `predicate`; `true` for an empty sequence.
    ///
    /// Stops at the first element that fails.
    pub fn all_match<P>(&self, predicate: P) -> bool
    where
        P: FnMut(&T) -> bool,
    {
        self.items.iter().all(predicate)
    }

    /// `true` when some element satisfies `predicate`; `false` for an empty sequence.
    ///
    /// Stops at the first element that matches.
    pub fn any_match<P>(&self, predicate: P) -> bool
    where
        P: FnMut(&T) -> bool,
    {
        self.items.iter().any(predicate)
    }

    pub fn sum(&self) -> T
    where
        T: Clone + Sum<T>,
    {
        self.items.iter().cloned().sum()
    }

    /// Maps every element on `strategy`, keeping source order in the result.
    pub fn map_with<U, F, S>(&self, strategy: &S, f: F) -> Sequence<U>
    where
        T: Sync,
        U: Send,
        F: Fn(&T) -> U + Send + Sync,
        S: Strategy,
    {
        Sequence::new(strategy.map(&self.items, f))
    }

    /// Folds the sequence on `strategy`.
    ///
    /// Each partition starts from `identity()` and folds with `fold_op`; partial
    /// results are combined left to right with `reduce_op`. The result matches a
    /// sequential fold whenever `reduce_op` is associative and `identity()` is its
    /// neutral element.
    pub fn fold_with<A, ID, F, R, S>(
        &self,
        strategy: &S,
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
        S: Strategy,
    {
        strategy.fold(&self.items, identity, fold_op, reduce_op)
    }
}

impl<T> Default for Sequence<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: Debug> Debug for Sequence<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.items.iter()).finish()
    }
}

impl<T> From<Vec<T>> for Sequence<T> {
    fn from(items: Vec<T>) -> Self {
        Self::new(items)
    }
}

impl<T, const N: usize> From<[T; N]> for Sequence<T> {
    fn from(items: [T; N]) -> Self {
        Self::new(Vec::from(items))
    }
}

impl<T> FromIterator<T> for Sequence<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a, T> IntoIterator for &'a Sequence<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
