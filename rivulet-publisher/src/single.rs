// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Zero-or-one value publishers.

use core::future::Future;
use core::pin::Pin;
use core::task::{ready, Context, Poll};
use futures::future::{self, FutureExt, Map, Ready};
use futures::stream::{FusedStream, Stream};
use pin_project::pin_project;
use rivulet_core::{RivuletError, StreamItem};

/// A publisher that emits at most one item: a value or an error.
///
/// The item is produced by the wrapped future on the first poll that finds it
/// ready; the stream ends right after.
///
/// # Examples
///
/// ```
/// use futures::executor::block_on;
/// use futures::StreamExt;
/// use rivulet_publisher::Single;
///
/// let mut single = Single::just("Juan");
///
/// block_on(async {
///     assert_eq!(single.next().await.map(|item| item.unwrap()), Some("Juan"));
///     assert!(single.next().await.is_none());
/// });
/// ```
#[pin_project]
#[derive(Debug)]
#[must_use = "publishers do nothing unless subscribed"]
pub struct Single<F> {
    #[pin]
    future: Option<F>,
}

impl<T> Single<Ready<StreamItem<T>>> {
    pub fn just(value: T) -> Self {
        Self::new(future::ready(StreamItem::Value(value)))
    }

    pub fn error(error: RivuletError) -> Self {
        Self::new(future::ready(StreamItem::Error(error)))
    }
}

impl<Fut, T> Single<Map<Fut, fn(T) -> StreamItem<T>>>
where
    Fut: Future<Output = T>,
{
    /// Emits the output of `future` once it resolves.
    pub fn from_future(future: Fut) -> Self {
        Self::new(future.map(StreamItem::Value as fn(T) -> StreamItem<T>))
    }
}

impl<F> Single<F> {
    /// Wraps a future that resolves to the single item.
    pub fn new(future: F) -> Self {
        Self {
            future: Some(future),
        }
    }
}

impl<F, T> Stream for Single<F>
where
    F: Future<Output = StreamItem<T>>,
{
    type Item = StreamItem<T>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();
        let Some(future) = this.future.as_mut().as_pin_mut() else {
            return Poll::Ready(None);
        };

        let item = ready!(future.poll(cx));
        this.future.set(None);
        Poll::Ready(Some(item))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.future.is_some() {
            (0, Some(1))
        } else {
            (0, Some(0))
        }
    }
}

impl<F, T> FusedStream for Single<F>
where
    F: Future<Output = StreamItem<T>>,
{
    fn is_terminated(&self) -> bool {
        self.future.is_none()
    }
}
