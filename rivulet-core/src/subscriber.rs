// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Subscribers: the receiving end of a publisher.
//!
//! A publisher is any `Stream<Item = StreamItem<T>>`. Subscribing consumes it and
//! delivers every value to [`Subscriber::on_next`] in emission order, followed by
//! exactly one terminal signal: [`Subscriber::on_complete`] when the stream ends or
//! [`Subscriber::on_error`] when an error item arrives.

use crate::error::{Result, RivuletError};
use crate::stream_item::StreamItem;
use async_trait::async_trait;
use futures::{Stream, StreamExt};

/// Receives the signals of one subscription.
pub trait Subscriber<T> {
    /// Called once before the first item is requested.
    fn on_subscribe(&mut self) {}

    /// Called for every emitted value, in order.
    fn on_next(&mut self, value: T);

    /// Called when the publisher fails. No other signal follows.
    fn on_error(&mut self, error: RivuletError);

    /// Called when the publisher completes. No other signal follows.
    fn on_complete(&mut self);
}

/// How a subscription ended.
#[derive(Debug, Clone)]
pub enum Termination {
    Completed,
    Errored(RivuletError),
}

impl Termination {
    pub const fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

/// A subscriber that records everything it receives.
#[derive(Debug)]
pub struct CollectingSubscriber<T> {
    values: Vec<T>,
    termination: Option<Termination>,
    subscribed: bool,
}

impl<T> Default for CollectingSubscriber<T> {
    fn default() -> Self {
        Self {
            values: Vec::new(),
            termination: None,
            subscribed: false,
        }
    }
}

impl<T> CollectingSubscriber<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Values received so far, in emission order.
    pub fn values(&self) -> &[T] {
        &self.values
    }

    pub fn into_values(self) -> Vec<T> {
        self.values
    }

    /// The terminal signal, once one has been received.
    pub const fn termination(&self) -> Option<&Termination> {
        self.termination.as_ref()
    }

    pub const fn is_subscribed(&self) -> bool {
        self.subscribed
    }
}

impl<T> Subscriber<T> for CollectingSubscriber<T> {
    fn on_subscribe(&mut self) {
        self.subscribed = true;
    }

    fn on_next(&mut self, value: T) {
        self.values.push(value);
    }

    fn on_error(&mut self, error: RivuletError) {
        self.termination = Some(Termination::Errored(error));
    }

    fn on_complete(&mut self) {
        self.termination = Some(Termination::Completed);
    }
}

/// Extension trait driving a publisher into a [`Subscriber`].
#[async_trait]
pub trait SubscribeExt<T>: Stream<Item = StreamItem<T>> + Sized {
    /// Consumes the publisher, forwarding every signal to `subscriber`.
    ///
    /// # Errors
    ///
    /// Returns the publisher's error after it has been passed to
    /// [`Subscriber::on_error`]. Items after an error are never requested.
    async fn subscribe_with<S>(self, subscriber: &mut S) -> Result<()>
    where
        S: Subscriber<T> + Send;
}

#[async_trait]
impl<P, T> SubscribeExt<T> for P
where
    P: Stream<Item = StreamItem<T>> + Send + 'static,
    T: Send + 'static,
{
    async fn subscribe_with<S>(self, subscriber: &mut S) -> Result<()>
    where
        S: Subscriber<T> + Send,
    {
        let mut publisher = Box::pin(self);
        let mut delivered = 0usize;

        subscriber.on_subscribe();
        debug!("subscription started");

        while let Some(item) = publisher.next().await {
            match item {
                StreamItem::Value(value) => {
                    delivered += 1;
                    subscriber.on_next(value);
                }
                StreamItem::Error(error) => {
                    warn!("subscription errored after {} item(s): {}", delivered, error);
                    let returned = error.clone();
                    subscriber.on_error(error);
                    return Err(returned);
                }
            }
        }

        debug!("subscription completed after {} item(s)", delivered);
        subscriber.on_complete();
        Ok(())
    }
}
