// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Strictly ordered concatenation of two publishers.

use core::pin::Pin;
use core::task::{ready, Context, Poll};
use futures::stream::{FusedStream, Stream};
use pin_project::pin_project;
use rivulet_core::StreamItem;

/// Extension trait providing the `concat_with` operator.
pub trait ConcatWithExt<T>: Stream<Item = StreamItem<T>> + Sized {
    /// Emits every item of `self`, then every item of `other`.
    ///
    /// `other` is not polled before `self` completes, so nothing it produces can
    /// overtake `self`, whatever the timing. If `self` errors, the error is
    /// forwarded and `other` is never polled.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use futures::executor::block_on;
    /// use futures::StreamExt;
    /// use rivulet_publisher::{just_all, ConcatWithExt};
    ///
    /// let names = just_all(["Juan", "Ana"]).concat_with(just_all(["Carlos", "Elena"]));
    /// let values: Vec<_> = block_on(names.map(|item| item.unwrap()).collect());
    ///
    /// assert_eq!(values, vec!["Juan", "Ana", "Carlos", "Elena"]);
    /// ```
    fn concat_with<S2>(self, other: S2) -> ConcatWith<Self, S2>
    where
        S2: Stream<Item = StreamItem<T>>;
}

impl<S, T> ConcatWithExt<T> for S
where
    S: Stream<Item = StreamItem<T>>,
{
    fn concat_with<S2>(self, other: S2) -> ConcatWith<Self, S2>
    where
        S2: Stream<Item = StreamItem<T>>,
    {
        ConcatWith {
            first: self,
            second: other,
            state: ConcatState::First,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConcatState {
    First,
    Second,
    Done,
}

#[pin_project]
#[must_use = "publishers do nothing unless subscribed"]
pub struct ConcatWith<S1, S2> {
    #[pin]
    first: S1,
    #[pin]
    second: S2,
    state: ConcatState,
}

impl<S1, S2, T> Stream for ConcatWith<S1, S2>
where
    S1: Stream<Item = StreamItem<T>>,
    S2: Stream<Item = StreamItem<T>>,
{
    type Item = StreamItem<T>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        loop {
            let next = match *this.state {
                ConcatState::First => ready!(this.first.as_mut().poll_next(cx)),
                ConcatState::Second => ready!(this.second.as_mut().poll_next(cx)),
                ConcatState::Done => return Poll::Ready(None),
            };

            match next {
                Some(StreamItem::Value(value)) => {
                    return Poll::Ready(Some(StreamItem::Value(value)));
                }
                Some(StreamItem::Error(error)) => {
                    *this.state = ConcatState::Done;
                    return Poll::Ready(Some(StreamItem::Error(error)));
                }
                None if *this.state == ConcatState::First => {
                    debug!("concat: first publisher completed, switching to second");
                    *this.state = ConcatState::Second;
                }
                None => {
                    *this.state = ConcatState::Done;
                    return Poll::Ready(None);
                }
            }
        }
    }
}

impl<S1, S2, T> FusedStream for ConcatWith<S1, S2>
where
    S1: Stream<Item = StreamItem<T>>,
    S2: Stream<Item = StreamItem<T>>,
{
    fn is_terminated(&self) -> bool {
        self.state == ConcatState::Done
    }
}
