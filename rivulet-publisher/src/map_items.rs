// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Map operator for publishers.

use core::pin::Pin;
use core::task::{Context, Poll};
use futures::Stream;
use pin_project::pin_project;
use rivulet_core::StreamItem;

/// Extension trait providing the `map_items` operator.
pub trait MapItemsExt<T>: Stream<Item = StreamItem<T>> + Sized {
    /// Transforms every value with `f`, preserving emission order.
    ///
    /// Errors pass through untouched and still end the publisher.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use futures::executor::block_on;
    /// use futures::StreamExt;
    /// use rivulet_publisher::{just_all, MapItemsExt};
    ///
    /// let upper = just_all(["Juan", "Ana"]).map_items(str::to_uppercase);
    /// let values: Vec<_> = block_on(upper.map(|item| item.unwrap()).collect());
    ///
    /// assert_eq!(values, vec!["JUAN", "ANA"]);
    /// ```
    fn map_items<U, F>(self, f: F) -> MapItems<Self, F>
    where
        F: FnMut(T) -> U;
}

impl<S, T> MapItemsExt<T> for S
where
    S: Stream<Item = StreamItem<T>>,
{
    fn map_items<U, F>(self, f: F) -> MapItems<Self, F>
    where
        F: FnMut(T) -> U,
    {
        MapItems { stream: self, f }
    }
}

#[pin_project]
#[must_use = "publishers do nothing unless subscribed"]
pub struct MapItems<S, F> {
    #[pin]
    stream: S,
    f: F,
}

impl<S, F, T, U> Stream for MapItems<S, F>
where
    S: Stream<Item = StreamItem<T>>,
    F: FnMut(T) -> U,
{
    type Item = StreamItem<U>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.project();
        let f = this.f;
        this.stream
            .poll_next(cx)
            .map(|next| next.map(|item| item.map(&mut *f)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.stream.size_hint()
    }
}
