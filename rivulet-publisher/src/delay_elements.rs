// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Delay-elements operator: spaces values out one `duration` apart.

use core::pin::Pin;
use core::task::{ready, Context, Poll};
use core::time::Duration;
use futures::stream::{FusedStream, Stream};
use futures::Future;
use pin_project::pin_project;
use rivulet_core::{StreamItem, Timer};

/// Extension trait providing the `delay_elements` operator.
pub trait DelayElementsExt<T>: Stream<Item = StreamItem<T>> + Sized {
    /// Spaces values `duration` apart on the tokio clock.
    ///
    /// See [`delay_elements_with_timer`](DelayElementsExt::delay_elements_with_timer).
    #[cfg(feature = "runtime-tokio")]
    fn delay_elements(
        self,
        duration: Duration,
    ) -> DelayElements<Self, rivulet_core::TokioTimer, T> {
        self.delay_elements_with_timer(duration, rivulet_core::TokioTimer)
    }

    /// Spaces values `duration` apart on `timer`.
    ///
    /// The next upstream value is only requested once the previous one has been
    /// emitted, and is then held for `duration`. A source that is ready at once
    /// therefore emits its n-th value after `n * duration`. Completion and errors
    /// are forwarded without delay.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use futures::{FutureExt, StreamExt};
    /// use rivulet_core::VirtualTimer;
    /// use rivulet_publisher::{just_all, DelayElementsExt};
    /// use std::time::Duration;
    ///
    /// let timer = VirtualTimer::new();
    /// let mut names = just_all(["Juan", "Ana"])
    ///     .delay_elements_with_timer(Duration::from_secs(1), timer.clone());
    ///
    /// assert!(names.next().now_or_never().is_none());
    /// timer.advance(Duration::from_secs(1));
    /// let first = names.next().now_or_never().flatten();
    /// assert_eq!(first.map(|item| item.unwrap()), Some("Juan"));
    /// ```
    fn delay_elements_with_timer<TM>(
        self,
        duration: Duration,
        timer: TM,
    ) -> DelayElements<Self, TM, T>
    where
        TM: Timer;
}

impl<S, T> DelayElementsExt<T> for S
where
    S: Stream<Item = StreamItem<T>>,
{
    fn delay_elements_with_timer<TM>(
        self,
        duration: Duration,
        timer: TM,
    ) -> DelayElements<Self, TM, T>
    where
        TM: Timer,
    {
        DelayElements {
            stream: self,
            timer,
            duration,
            sleep: None,
            held: None,
            terminated: false,
        }
    }
}

#[pin_project]
#[must_use = "publishers do nothing unless subscribed"]
pub struct DelayElements<S, TM: Timer, T> {
    #[pin]
    stream: S,
    timer: TM,
    duration: Duration,
    #[pin]
    sleep: Option<TM::Sleep>,
    held: Option<T>,
    terminated: bool,
}

impl<S, TM, T> Stream for DelayElements<S, TM, T>
where
    S: Stream<Item = StreamItem<T>>,
    TM: Timer,
{
    type Item = StreamItem<T>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();
        if *this.terminated {
            return Poll::Ready(None);
        }

        if this.held.is_none() {
            match ready!(this.stream.as_mut().poll_next(cx)) {
                Some(StreamItem::Value(value)) => {
                    *this.held = Some(value);
                    this.sleep.set(Some(this.timer.sleep_future(*this.duration)));
                }
                Some(StreamItem::Error(error)) => {
                    *this.terminated = true;
                    return Poll::Ready(Some(StreamItem::Error(error)));
                }
                None => {
                    *this.terminated = true;
                    return Poll::Ready(None);
                }
            }
        }

        if let Some(sleep) = this.sleep.as_mut().as_pin_mut() {
            ready!(sleep.poll(cx));
            this.sleep.set(None);
        }

        Poll::Ready(this.held.take().map(StreamItem::Value))
    }
}

impl<S, TM, T> FusedStream for DelayElements<S, TM, T>
where
    S: Stream<Item = StreamItem<T>>,
    TM: Timer,
{
    fn is_terminated(&self) -> bool {
        self.terminated
    }
}
