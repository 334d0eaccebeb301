// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use futures::stream::StreamExt;
use futures::Stream;
use rivulet_core::{RivuletError, StreamItem};
use std::time::Duration;
use tokio::time::{sleep, timeout};

/// Panics if `stream` yields anything within `timeout_ms` milliseconds.
pub async fn assert_no_element_emitted<S, T>(stream: &mut S, timeout_ms: u64)
where
    S: Stream<Item = T> + Unpin,
{
    tokio::select! {
        _item = stream.next() => {
            panic!("Unexpected item emitted, expected no output.");
        }
        () = sleep(Duration::from_millis(timeout_ms)) => {}
    }
}

/// Waits up to `timeout_ms` milliseconds for the next value of a publisher.
///
/// # Errors
///
/// Returns the publisher's error, a stream error if it completed, or a timeout
/// error if nothing arrived in time.
pub async fn unwrap_stream<S, T>(stream: &mut S, timeout_ms: u64) -> Result<T, RivuletError>
where
    S: Stream<Item = StreamItem<T>> + Unpin,
{
    match timeout(Duration::from_millis(timeout_ms), stream.next()).await {
        Ok(Some(StreamItem::Value(value))) => Ok(value),
        Ok(Some(StreamItem::Error(error))) => Err(error),
        Ok(None) => Err(RivuletError::stream_error("Stream ended")),
        Err(_) => Err(RivuletError::timeout_error(format!(
            "no item within {timeout_ms} ms"
        ))),
    }
}

/// Drains a finite publisher, returning its values or its error.
///
/// # Errors
///
/// Returns the first error item the publisher emits.
pub async fn collect_values<S, T>(stream: S) -> Result<Vec<T>, RivuletError>
where
    S: Stream<Item = StreamItem<T>>,
{
    let mut stream = Box::pin(stream);
    let mut values = Vec::new();
    while let Some(item) = stream.next().await {
        match item {
            StreamItem::Value(value) => values.push(value),
            StreamItem::Error(error) => return Err(error),
        }
    }
    Ok(values)
}
