// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Pairwise combination of two publishers.

use core::pin::Pin;
use core::task::{Context, Poll};
use futures::stream::{FusedStream, Stream};
use pin_project::pin_project;
use rivulet_core::{RivuletError, StreamItem};

/// Extension trait providing the `zip_with` operator.
pub trait ZipWithExt<T>: Stream<Item = StreamItem<T>> + Sized {
    /// Emits `combiner(a, b)` for the i-th value `a` of `self` and the i-th value
    /// `b` of `other`.
    ///
    /// Each pair is emitted as soon as both of its halves have arrived, so a fast
    /// side waits for the slow one. The result is as long as the shorter side:
    /// once either side completes with no value waiting for a partner, the zip
    /// completes. An error from either side is forwarded and ends the zip.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use futures::executor::block_on;
    /// use futures::StreamExt;
    /// use rivulet_publisher::{just_all, ZipWithExt};
    ///
    /// let pairs = just_all(["Juan", "Ana"])
    ///     .zip_with(just_all(["Carlos", "Elena", "Alberto"]), |a, b| format!("{a} - {b}"));
    /// let values: Vec<_> = block_on(pairs.map(|item| item.unwrap()).collect());
    ///
    /// assert_eq!(values, vec!["Juan - Carlos", "Ana - Elena"]);
    /// ```
    fn zip_with<S2, U, R, F>(self, other: S2, combiner: F) -> ZipWith<Self, S2, F, T, U>
    where
        S2: Stream<Item = StreamItem<U>>,
        F: FnMut(T, U) -> R;
}

impl<S, T> ZipWithExt<T> for S
where
    S: Stream<Item = StreamItem<T>>,
{
    fn zip_with<S2, U, R, F>(self, other: S2, combiner: F) -> ZipWith<Self, S2, F, T, U>
    where
        S2: Stream<Item = StreamItem<U>>,
        F: FnMut(T, U) -> R,
    {
        ZipWith {
            left: self,
            right: other,
            combiner,
            left_value: None,
            right_value: None,
            left_done: false,
            right_done: false,
            terminated: false,
        }
    }
}

#[pin_project]
#[must_use = "publishers do nothing unless subscribed"]
pub struct ZipWith<S1, S2, F, T, U> {
    #[pin]
    left: S1,
    #[pin]
    right: S2,
    combiner: F,
    left_value: Option<T>,
    right_value: Option<U>,
    left_done: bool,
    right_done: bool,
    terminated: bool,
}

/// Pulls the next value of one side into `slot` unless one is already waiting.
///
/// Returns the side's error, if it produced one.
fn fill_slot<S, V>(
    stream: Pin<&mut S>,
    slot: &mut Option<V>,
    done: &mut bool,
    cx: &mut Context<'_>,
) -> Option<RivuletError>
where
    S: Stream<Item = StreamItem<V>>,
{
    if slot.is_some() || *done {
        return None;
    }

    match stream.poll_next(cx) {
        Poll::Ready(Some(StreamItem::Value(value))) => {
            *slot = Some(value);
            None
        }
        Poll::Ready(Some(StreamItem::Error(error))) => Some(error),
        Poll::Ready(None) => {
            *done = true;
            None
        }
        Poll::Pending => None,
    }
}

impl<S1, S2, F, T, U, R> Stream for ZipWith<S1, S2, F, T, U>
where
    S1: Stream<Item = StreamItem<T>>,
    S2: Stream<Item = StreamItem<U>>,
    F: FnMut(T, U) -> R,
{
    type Item = StreamItem<R>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.project();
        if *this.terminated {
            return Poll::Ready(None);
        }

        if let Some(error) = fill_slot(this.left, this.left_value, this.left_done, cx) {
            *this.terminated = true;
            return Poll::Ready(Some(StreamItem::Error(error)));
        }
        if let Some(error) = fill_slot(this.right, this.right_value, this.right_done, cx) {
            *this.terminated = true;
            return Poll::Ready(Some(StreamItem::Error(error)));
        }

        match (this.left_value.take(), this.right_value.take()) {
            (Some(left), Some(right)) => {
                return Poll::Ready(Some(StreamItem::Value((this.combiner)(left, right))));
            }
            (left, right) => {
                *this.left_value = left;
                *this.right_value = right;
            }
        }

        let left_exhausted = *this.left_done && this.left_value.is_none();
        let right_exhausted = *this.right_done && this.right_value.is_none();
        if left_exhausted || right_exhausted {
            debug!("zip: one side exhausted, completing");
            *this.terminated = true;
            return Poll::Ready(None);
        }

        Poll::Pending
    }
}

impl<S1, S2, F, T, U, R> FusedStream for ZipWith<S1, S2, F, T, U>
where
    S1: Stream<Item = StreamItem<T>>,
    S2: Stream<Item = StreamItem<U>>,
    F: FnMut(T, U) -> R,
{
    fn is_terminated(&self) -> bool {
        self.terminated
    }
}
