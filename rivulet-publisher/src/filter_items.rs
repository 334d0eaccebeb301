// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Filter operator for publishers.

use core::pin::Pin;
use core::task::{ready, Context, Poll};
use futures::Stream;
use pin_project::pin_project;
use rivulet_core::StreamItem;

/// Extension trait providing the `filter_items` operator.
pub trait FilterItemsExt<T>: Stream<Item = StreamItem<T>> + Sized {
    /// Forwards only the values for which `predicate` holds, in emission order.
    ///
    /// Errors are always forwarded.
    fn filter_items<P>(self, predicate: P) -> FilterItems<Self, P>
    where
        P: FnMut(&T) -> bool;
}

impl<S, T> FilterItemsExt<T> for S
where
    S: Stream<Item = StreamItem<T>>,
{
    fn filter_items<P>(self, predicate: P) -> FilterItems<Self, P>
    where
        P: FnMut(&T) -> bool,
    {
        FilterItems {
            stream: self,
            predicate,
        }
    }
}

#[pin_project]
#[must_use = "publishers do nothing unless subscribed"]
pub struct FilterItems<S, P> {
    #[pin]
    stream: S,
    predicate: P,
}

impl<S, P, T> Stream for FilterItems<S, P>
where
    S: Stream<Item = StreamItem<T>>,
    P: FnMut(&T) -> bool,
{
    type Item = StreamItem<T>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        loop {
            match ready!(this.stream.as_mut().poll_next(cx)) {
                Some(StreamItem::Value(value)) if !(this.predicate)(&value) => continue,
                next => return Poll::Ready(next),
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (_, upper) = self.stream.size_hint();
        (0, upper)
    }
}
