// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Multi-value publisher sources.
//!
//! Every source emits synchronously on its first polls: values are ready as soon
//! as the subscriber asks for them. Use the delay operators to spread them over time.

use crate::single::Single;
use core::pin::Pin;
use core::task::{Context, Poll};
use futures::future::Ready;
use futures::stream::{self, Iter};
use futures::Stream;
use rivulet_core::{RivuletError, StreamItem};

/// Publisher emitting one value and completing.
///
/// Shorthand for [`Single::just`].
pub fn just<T>(value: T) -> Single<Ready<StreamItem<T>>> {
    Single::just(value)
}

/// Publisher emitting every value of `values`, in order, then completing.
pub fn just_all<T, const N: usize>(values: [T; N]) -> FromIter<core::array::IntoIter<T, N>> {
    from_iter(values)
}

/// Publisher emitting every element of `iter`, in iteration order, then completing.
///
/// # Examples
///
/// ```
/// use futures::executor::block_on;
/// use futures::StreamExt;
/// use rivulet_publisher::from_iter;
///
/// let values: Vec<_> = block_on(from_iter(1..=3).map(|item| item.unwrap()).collect());
/// assert_eq!(values, vec![1, 2, 3]);
/// ```
pub fn from_iter<I>(iter: I) -> FromIter<I::IntoIter>
where
    I: IntoIterator,
{
    FromIter {
        inner: stream::iter(iter),
    }
}

/// Publisher emitting the `Ok` values of `iter` until the first `Err`.
///
/// The first error is emitted as [`StreamItem::Error`] and ends the publisher;
/// the rest of the iterator is never pulled.
pub fn from_results<I, T>(iter: I) -> FromResults<I::IntoIter>
where
    I: IntoIterator<Item = Result<T, RivuletError>>,
{
    FromResults {
        iter: Some(iter.into_iter()),
    }
}

/// Publisher completing without emitting anything.
pub fn empty<T>() -> stream::Empty<StreamItem<T>> {
    stream::empty()
}

/// Publisher failing with `error` without emitting any value.
pub fn error<T>(error: RivuletError) -> Single<Ready<StreamItem<T>>> {
    Single::error(error)
}

/// Stream returned by [`from_iter`] and [`just_all`].
#[derive(Debug, Clone)]
#[must_use = "publishers do nothing unless subscribed"]
pub struct FromIter<I> {
    inner: Iter<I>,
}

impl<I> Stream for FromIter<I>
where
    I: Iterator,
{
    type Item = StreamItem<I::Item>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.inner)
            .poll_next(cx)
            .map(|next| next.map(StreamItem::Value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

/// Stream returned by [`from_results`].
#[derive(Debug, Clone)]
#[must_use = "publishers do nothing unless subscribed"]
pub struct FromResults<I> {
    iter: Option<I>,
}

impl<I> Unpin for FromResults<I> {}

impl<I, T> Stream for FromResults<I>
where
    I: Iterator<Item = Result<T, RivuletError>>,
{
    type Item = StreamItem<T>;

    fn poll_next(mut self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let Some(iter) = self.iter.as_mut() else {
            return Poll::Ready(None);
        };

        match iter.next() {
            Some(Ok(value)) => Poll::Ready(Some(StreamItem::Value(value))),
            Some(Err(error)) => {
                self.iter = None;
                Poll::Ready(Some(StreamItem::Error(error)))
            }
            None => {
                self.iter = None;
                Poll::Ready(None)
            }
        }
    }
}
