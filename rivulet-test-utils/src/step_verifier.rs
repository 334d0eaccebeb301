// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Step-by-step verification of a publisher's signals.
//!
//! A [`StepVerifier`] subscribes to a publisher once, checks each expectation
//! against the signals in the order they arrive, and finishes with a terminal
//! expectation: completion, an error, or cancellation.
//!
//! Two clocks are supported:
//!
//! - [`StepVerifier::create`] waits on the runtime clock. Each step gives up after
//!   the step timeout (5 seconds unless changed with
//!   [`with_step_timeout`](StepVerifier::with_step_timeout)). Under
//!   `tokio::time::pause()` the runtime clock jumps ahead on its own.
//! - [`StepVerifier::with_virtual_time`] drives a [`VirtualTimer`]: whenever the
//!   publisher is pending, the clock jumps straight to the next scheduled
//!   deadline, so delays of hours verify instantly and deterministically.
//!
//! Verification must run inside a tokio runtime.
//!
//! # Example
//!
//! ```
//! use futures::stream;
//! use rivulet_core::StreamItem;
//! use rivulet_test_utils::StepVerifier;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> anyhow::Result<()> {
//! let publisher = stream::iter(["Juan", "Ana", "Carlos"].map(StreamItem::Value));
//!
//! StepVerifier::create(publisher)
//!     .expect_next(["Juan", "Ana"])
//!     .expect_next_matches("starts with C", |name| name.starts_with('C'))
//!     .verify_complete()
//!     .await?;
//! # Ok(())
//! # }
//! ```

use core::fmt::Debug;
use core::pin::Pin;
use core::task::Poll;
use futures::{FutureExt, Stream, StreamExt};
use rivulet_core::{RivuletError, StreamItem, Timer, VirtualInstant, VirtualTimer};
use std::future::poll_fn;
use std::time::Duration;
use thiserror::Error;

/// Default time a single step may wait for a signal on the runtime clock.
pub const DEFAULT_STEP_TIMEOUT: Duration = Duration::from_secs(5);

/// Why a verification failed.
#[derive(Debug, Error)]
pub enum VerificationError {
    #[error("expected {expected} at position {index}, got value {actual}")]
    UnexpectedValue {
        index: usize,
        expected: String,
        actual: String,
    },

    #[error("value {actual} at position {index} does not match: {description}")]
    PredicateFailed {
        index: usize,
        description: String,
        actual: String,
    },

    #[error("expected {expected} at position {index}, but the publisher completed")]
    UnexpectedCompletion { index: usize, expected: String },

    #[error("expected {expected} at position {index}, but the publisher failed: {error}")]
    UnexpectedError {
        index: usize,
        expected: String,
        error: RivuletError,
    },

    #[error("expected no signal for {duration:?}, got {actual}")]
    UnexpectedEvent { duration: Duration, actual: String },

    #[error("no signal within {timeout:?} while expecting {expected} at position {index}")]
    Timeout {
        index: usize,
        expected: String,
        timeout: Duration,
    },

    #[error("the publisher failed with an unexpected error: {error}")]
    ErrorMismatch { error: RivuletError },
}

type Predicate<T> = Box<dyn FnMut(&T) -> bool>;

enum Step<T> {
    Next(T),
    NextMatches {
        description: String,
        predicate: Predicate<T>,
    },
    NextCount(usize),
    NoEvent(Duration),
    Await(Duration),
}

enum Clock {
    Runtime,
    Virtual(VirtualTimer),
}

/// Measures elapsed time on whichever clock drives the verification.
enum Stopwatch {
    Runtime(tokio::time::Instant),
    Virtual(VirtualTimer, VirtualInstant),
}

impl Stopwatch {
    fn elapsed(&self) -> Duration {
        match self {
            Self::Runtime(start) => start.elapsed(),
            Self::Virtual(timer, start) => timer.now() - *start,
        }
    }
}

/// Scripted expectations over one subscription to a publisher.
#[must_use = "a StepVerifier does nothing until one of the verify methods is awaited"]
pub struct StepVerifier<S, T> {
    publisher: Pin<Box<S>>,
    clock: Clock,
    step_timeout: Duration,
    steps: Vec<Step<T>>,
    received: usize,
}

impl<S, T> StepVerifier<S, T>
where
    S: Stream<Item = StreamItem<T>>,
    T: Debug + PartialEq,
{
    /// Verifies `publisher` on the runtime clock.
    pub fn create(publisher: S) -> Self {
        Self::with_clock(publisher, Clock::Runtime)
    }

    /// Verifies `publisher` on `timer`, which must be the clock its time-based
    /// operators were built with.
    pub fn with_virtual_time(publisher: S, timer: VirtualTimer) -> Self {
        Self::with_clock(publisher, Clock::Virtual(timer))
    }

    fn with_clock(publisher: S, clock: Clock) -> Self {
        Self {
            publisher: Box::pin(publisher),
            clock,
            step_timeout: DEFAULT_STEP_TIMEOUT,
            steps: Vec::new(),
            received: 0,
        }
    }

    /// Sets how long each step waits for a signal before failing.
    pub fn with_step_timeout(mut self, timeout: Duration) -> Self {
        self.step_timeout = timeout;
        self
    }

    /// Expects the next values to equal `values`, in order.
    pub fn expect_next<I>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        self.steps.extend(values.into_iter().map(Step::Next));
        self
    }

    /// Expects the next value to satisfy `predicate`.
    pub fn expect_next_matches<P>(mut self, description: impl Into<String>, predicate: P) -> Self
    where
        P: FnMut(&T) -> bool + 'static,
    {
        self.steps.push(Step::NextMatches {
            description: description.into(),
            predicate: Box::new(predicate),
        });
        self
    }

    /// Expects `count` more values, whatever they are.
    pub fn expect_next_count(mut self, count: usize) -> Self {
        self.steps.push(Step::NextCount(count));
        self
    }

    /// Expects no signal at all while `duration` elapses.
    ///
    /// The window includes its end: a signal due exactly after `duration` fails the step.
    pub fn expect_no_event(mut self, duration: Duration) -> Self {
        self.steps.push(Step::NoEvent(duration));
        self
    }

    /// Lets `duration` elapse without consuming any signal.
    pub fn then_await(mut self, duration: Duration) -> Self {
        self.steps.push(Step::Await(duration));
        self
    }

    /// Runs the steps, then expects the publisher to complete.
    ///
    /// Returns the time elapsed on the verification clock.
    ///
    /// # Errors
    ///
    /// Returns the first [`VerificationError`] encountered.
    pub async fn verify_complete(self) -> Result<Duration, VerificationError> {
        self.verify(|index, signal| match signal {
            None => Ok(()),
            Some(StreamItem::Value(value)) => Err(VerificationError::UnexpectedValue {
                index,
                expected: "completion".to_string(),
                actual: format!("{value:?}"),
            }),
            Some(StreamItem::Error(error)) => Err(VerificationError::UnexpectedError {
                index,
                expected: "completion".to_string(),
                error,
            }),
        })
        .await
    }

    /// Runs the steps, then expects the publisher to fail with any error.
    ///
    /// # Errors
    ///
    /// Returns the first [`VerificationError`] encountered.
    pub async fn verify_error(self) -> Result<Duration, VerificationError> {
        self.verify_error_matches(|_| true).await
    }

    /// Runs the steps, then expects the publisher to fail with an error
    /// satisfying `predicate`.
    ///
    /// # Errors
    ///
    /// Returns the first [`VerificationError`] encountered.
    pub async fn verify_error_matches<P>(self, predicate: P) -> Result<Duration, VerificationError>
    where
        P: FnOnce(&RivuletError) -> bool,
    {
        self.verify(|index, signal| match signal {
            Some(StreamItem::Error(error)) if predicate(&error) => Ok(()),
            Some(StreamItem::Error(error)) => Err(VerificationError::ErrorMismatch { error }),
            Some(StreamItem::Value(value)) => Err(VerificationError::UnexpectedValue {
                index,
                expected: "an error".to_string(),
                actual: format!("{value:?}"),
            }),
            None => Err(VerificationError::UnexpectedCompletion {
                index,
                expected: "an error".to_string(),
            }),
        })
        .await
    }

    /// Runs the steps, then drops the subscription without waiting for a
    /// terminal signal.
    ///
    /// # Errors
    ///
    /// Returns the first [`VerificationError`] encountered.
    pub async fn verify_then_cancel(mut self) -> Result<Duration, VerificationError> {
        let stopwatch = self.stopwatch();
        let steps = std::mem::take(&mut self.steps);
        for step in steps {
            self.run_step(step).await?;
        }
        Ok(stopwatch.elapsed())
    }

    async fn verify<C>(mut self, check_terminal: C) -> Result<Duration, VerificationError>
    where
        C: FnOnce(usize, Option<StreamItem<T>>) -> Result<(), VerificationError>,
    {
        let stopwatch = self.stopwatch();
        let steps = std::mem::take(&mut self.steps);
        for step in steps {
            self.run_step(step).await?;
        }

        let index = self.received;
        let signal = self.next_signal("a terminal signal").await?;
        check_terminal(index, signal).inspect_err(|e| warn!("verification failed: {}", e))?;
        Ok(stopwatch.elapsed())
    }

    fn stopwatch(&self) -> Stopwatch {
        match &self.clock {
            Clock::Runtime => Stopwatch::Runtime(tokio::time::Instant::now()),
            Clock::Virtual(timer) => Stopwatch::Virtual(timer.clone(), timer.now()),
        }
    }

    async fn run_step(&mut self, step: Step<T>) -> Result<(), VerificationError> {
        let result = match step {
            Step::Next(expected) => {
                let description = format!("value {expected:?}");
                self.next_value(&description).await.and_then(|(index, actual)| {
                    if actual == expected {
                        Ok(())
                    } else {
                        Err(VerificationError::UnexpectedValue {
                            index,
                            expected: description,
                            actual: format!("{actual:?}"),
                        })
                    }
                })
            }
            Step::NextMatches {
                description,
                mut predicate,
            } => self.next_value(&description).await.and_then(|(index, actual)| {
                if predicate(&actual) {
                    Ok(())
                } else {
                    Err(VerificationError::PredicateFailed {
                        index,
                        description,
                        actual: format!("{actual:?}"),
                    })
                }
            }),
            Step::NextCount(count) => {
                let mut result = Ok(());
                for _ in 0..count {
                    if let Err(e) = self.next_value("any value").await {
                        result = Err(e);
                        break;
                    }
                }
                result
            }
            Step::NoEvent(duration) => self.expect_silence(duration).await,
            Step::Await(duration) => {
                match &self.clock {
                    Clock::Runtime => tokio::time::sleep(duration).await,
                    Clock::Virtual(timer) => {
                        timer.advance(duration);
                    }
                }
                Ok(())
            }
        };

        result.inspect_err(|e| warn!("verification failed: {}", e))
    }

    /// Waits for the next signal, which must be a value. Returns it with its position.
    async fn next_value(&mut self, expected: &str) -> Result<(usize, T), VerificationError> {
        let index = self.received;
        match self.next_signal(expected).await? {
            Some(StreamItem::Value(value)) => {
                self.received += 1;
                Ok((index, value))
            }
            Some(StreamItem::Error(error)) => Err(VerificationError::UnexpectedError {
                index,
                expected: expected.to_string(),
                error,
            }),
            None => Err(VerificationError::UnexpectedCompletion {
                index,
                expected: expected.to_string(),
            }),
        }
    }

    /// Polls the publisher until it yields a signal, jumping the virtual clock
    /// to the next deadline whenever the publisher is pending.
    async fn next_signal(
        &mut self,
        expected: &str,
    ) -> Result<Option<StreamItem<T>>, VerificationError> {
        let publisher = &mut self.publisher;
        let timer = match &self.clock {
            Clock::Runtime => None,
            Clock::Virtual(timer) => Some(timer),
        };

        let signal = poll_fn(|cx| loop {
            match publisher.as_mut().poll_next(cx) {
                Poll::Ready(signal) => return Poll::Ready(signal),
                Poll::Pending => match timer {
                    Some(timer) if timer.advance_to_next().is_some() => continue,
                    _ => return Poll::Pending,
                },
            }
        });

        tokio::time::timeout(self.step_timeout, signal)
            .await
            .map_err(|_| VerificationError::Timeout {
                index: self.received,
                expected: expected.to_string(),
                timeout: self.step_timeout,
            })
    }

    async fn expect_silence(&mut self, duration: Duration) -> Result<(), VerificationError> {
        let unexpected = |signal: Option<StreamItem<T>>| VerificationError::UnexpectedEvent {
            duration,
            actual: match signal {
                Some(StreamItem::Value(value)) => format!("value {value:?}"),
                Some(StreamItem::Error(error)) => format!("error {error}"),
                None => "completion".to_string(),
            },
        };

        match &self.clock {
            Clock::Runtime => match tokio::time::timeout(duration, self.publisher.next()).await {
                Ok(signal) => Err(unexpected(signal)),
                Err(_) => Ok(()),
            },
            Clock::Virtual(timer) => {
                let target = timer.now() + duration;
                loop {
                    if let Some(signal) = self.publisher.next().now_or_never() {
                        return Err(unexpected(signal));
                    }
                    match timer.next_deadline() {
                        Some(deadline) if deadline < target => {
                            timer.advance_to_next();
                        }
                        _ => break,
                    }
                }
                // The window is closed: a signal due exactly at its end counts as an event
                timer.advance_to(target);
                match self.publisher.next().now_or_never() {
                    Some(signal) => Err(unexpected(signal)),
                    None => Ok(()),
                }
            }
        }
    }
}
