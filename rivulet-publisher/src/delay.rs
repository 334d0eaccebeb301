// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Delay operator: shifts every value later by a fixed duration.

use core::future::Future;
use core::pin::Pin;
use core::task::{Context, Poll};
use core::time::Duration;
use futures::stream::{FusedStream, FuturesOrdered, Stream, StreamExt};
use pin_project::pin_project;
use rivulet_core::{StreamItem, Timer};

/// Extension trait providing the `delay` operator.
pub trait DelayExt<T>: Stream<Item = StreamItem<T>> + Sized {
    /// Delays each value by `duration` on the tokio clock.
    ///
    /// See [`delay_with_timer`](DelayExt::delay_with_timer).
    #[cfg(feature = "runtime-tokio")]
    fn delay(self, duration: Duration) -> Delay<Self, rivulet_core::TokioTimer, T> {
        self.delay_with_timer(duration, rivulet_core::TokioTimer)
    }

    /// Delays each value by `duration` on `timer`.
    ///
    /// Every value becomes ready `duration` after it arrived from upstream, so
    /// values that arrive close together stay close together. Source order is
    /// preserved. Errors are not delayed: an error is forwarded at once and ends
    /// the publisher, dropping values still in flight.
    fn delay_with_timer<TM>(self, duration: Duration, timer: TM) -> Delay<Self, TM, T>
    where
        TM: Timer;
}

impl<S, T> DelayExt<T> for S
where
    S: Stream<Item = StreamItem<T>>,
{
    fn delay_with_timer<TM>(self, duration: Duration, timer: TM) -> Delay<Self, TM, T>
    where
        TM: Timer,
    {
        Delay {
            stream: self,
            timer,
            duration,
            in_flight: FuturesOrdered::new(),
            upstream_done: false,
            terminated: false,
        }
    }
}

#[pin_project]
struct DelayedValue<F, T> {
    #[pin]
    sleep: F,
    value: Option<T>,
}

impl<F, T> Future for DelayedValue<F, T>
where
    F: Future<Output = ()>,
{
    type Output = Option<T>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.project();
        this.sleep.poll(cx).map(|()| this.value.take())
    }
}

#[pin_project]
#[must_use = "publishers do nothing unless subscribed"]
pub struct Delay<S, TM: Timer, T> {
    #[pin]
    stream: S,
    timer: TM,
    duration: Duration,
    in_flight: FuturesOrdered<DelayedValue<TM::Sleep, T>>,
    upstream_done: bool,
    terminated: bool,
}

impl<S, TM, T> Stream for Delay<S, TM, T>
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

        while !*this.upstream_done {
            match this.stream.as_mut().poll_next(cx) {
                Poll::Ready(Some(StreamItem::Value(value))) => {
                    this.in_flight.push_back(DelayedValue {
                        sleep: this.timer.sleep_future(*this.duration),
                        value: Some(value),
                    });
                }
                Poll::Ready(Some(StreamItem::Error(error))) => {
                    debug!(
                        "delay: error dropped {} value(s) in flight",
                        this.in_flight.len()
                    );
                    *this.terminated = true;
                    return Poll::Ready(Some(StreamItem::Error(error)));
                }
                Poll::Ready(None) => *this.upstream_done = true,
                Poll::Pending => break,
            }
        }

        loop {
            match this.in_flight.poll_next_unpin(cx) {
                Poll::Ready(Some(Some(value))) => {
                    return Poll::Ready(Some(StreamItem::Value(value)));
                }
                // A delayed value is only ever yielded once
                Poll::Ready(Some(None)) => continue,
                Poll::Ready(None) if *this.upstream_done => {
                    *this.terminated = true;
                    return Poll::Ready(None);
                }
                Poll::Ready(None) | Poll::Pending => return Poll::Pending,
            }
        }
    }
}

impl<S, TM, T> FusedStream for Delay<S, TM, T>
where
    S: Stream<Item = StreamItem<T>>,
    TM: Timer,
{
    fn is_terminated(&self) -> bool {
        self.terminated
    }
}
