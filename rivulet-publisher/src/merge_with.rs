// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Arrival-order merge of two publishers.

use core::pin::Pin;
use core::task::{Context, Poll};
use futures::stream::{FusedStream, Stream};
use pin_project::pin_project;
use rivulet_core::StreamItem;

/// Extension trait providing the `merge_with` operator.
pub trait MergeWithExt<T>: Stream<Item = StreamItem<T>> + Sized {
    /// Interleaves the items of `self` and `other` in the order they become ready.
    ///
    /// Declaration order does not matter: a delayed item of `self` is overtaken by
    /// every item `other` produces meanwhile. When both sides are ready on the
    /// same poll, `self` goes first. Each side keeps its own order.
    ///
    /// The merge completes once both sides have completed. The first error from
    /// either side is forwarded and ends the merge.
    fn merge_with<S2>(self, other: S2) -> MergeWith<Self, S2>
    where
        S2: Stream<Item = StreamItem<T>>;
}

impl<S, T> MergeWithExt<T> for S
where
    S: Stream<Item = StreamItem<T>>,
{
    fn merge_with<S2>(self, other: S2) -> MergeWith<Self, S2>
    where
        S2: Stream<Item = StreamItem<T>>,
    {
        MergeWith {
            left: self,
            right: other,
            left_done: false,
            right_done: false,
            terminated: false,
        }
    }
}

#[pin_project]
#[must_use = "publishers do nothing unless subscribed"]
pub struct MergeWith<S1, S2> {
    #[pin]
    left: S1,
    #[pin]
    right: S2,
    left_done: bool,
    right_done: bool,
    terminated: bool,
}

/// Outcome of polling one side of the merge.
enum Side<T> {
    Emit(StreamItem<T>),
    Completed,
    Pending,
}

fn poll_side<S, T>(stream: Pin<&mut S>, done: &mut bool, cx: &mut Context<'_>) -> Side<T>
where
    S: Stream<Item = StreamItem<T>>,
{
    if *done {
        return Side::Completed;
    }

    match stream.poll_next(cx) {
        Poll::Ready(Some(item)) => Side::Emit(item),
        Poll::Ready(None) => {
            *done = true;
            Side::Completed
        }
        Poll::Pending => Side::Pending,
    }
}

impl<S1, S2, T> Stream for MergeWith<S1, S2>
where
    S1: Stream<Item = StreamItem<T>>,
    S2: Stream<Item = StreamItem<T>>,
{
    type Item = StreamItem<T>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.project();
        if *this.terminated {
            return Poll::Ready(None);
        }

        let left = poll_side(this.left, this.left_done, cx);
        let item = match left {
            Side::Emit(item) => Some(item),
            Side::Completed | Side::Pending => match poll_side(this.right, this.right_done, cx) {
                Side::Emit(item) => Some(item),
                Side::Completed | Side::Pending => None,
            },
        };

        match item {
            Some(StreamItem::Error(error)) => {
                debug!("merge: terminated by error: {}", error);
                *this.terminated = true;
                Poll::Ready(Some(StreamItem::Error(error)))
            }
            Some(value) => Poll::Ready(Some(value)),
            None if *this.left_done && *this.right_done => {
                *this.terminated = true;
                Poll::Ready(None)
            }
            None => Poll::Pending,
        }
    }
}

impl<S1, S2, T> FusedStream for MergeWith<S1, S2>
where
    S1: Stream<Item = StreamItem<T>>,
    S2: Stream<Item = StreamItem<T>>,
{
    fn is_terminated(&self) -> bool {
        self.terminated
    }
}
