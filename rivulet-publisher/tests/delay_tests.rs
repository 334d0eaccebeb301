// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use futures::{FutureExt, StreamExt};
use rivulet_core::{RivuletError, StreamItem, Timer, VirtualTimer};
use rivulet_publisher::prelude::*;
use rivulet_test_utils::test_data::{ANA, CARLOS, JUAN};
use rivulet_test_utils::{
    assert_no_element_emitted, test_channel, test_channel_with_errors, unwrap_stream, StepVerifier,
};
use std::time::Duration;
use tokio::time::{advance, pause};

#[tokio::test]
async fn test_delay_shifts_each_value_by_duration() -> anyhow::Result<()> {
    // Arrange
    pause();
    let (tx, stream) = test_channel();
    let mut delayed = stream.delay(Duration::from_secs(1));

    // Act & Assert
    tx.send(JUAN)?;
    advance(Duration::from_millis(100)).await;
    assert_no_element_emitted(&mut delayed, 100).await;

    advance(Duration::from_millis(900)).await;
    assert_eq!(unwrap_stream(&mut delayed, 100).await?, JUAN);

    tx.send(ANA)?;
    advance(Duration::from_millis(100)).await;
    assert_no_element_emitted(&mut delayed, 100).await;

    advance(Duration::from_millis(900)).await;
    assert_eq!(unwrap_stream(&mut delayed, 100).await?, ANA);

    Ok(())
}

#[tokio::test]
async fn test_delay_keeps_values_that_arrive_together_together() -> anyhow::Result<()> {
    // Arrange
    let timer = VirtualTimer::new();
    let delayed = just_all([JUAN, ANA, CARLOS])
        .delay_with_timer(Duration::from_secs(2), timer.clone());

    // Act
    let elapsed = StepVerifier::with_virtual_time(delayed, timer)
        .expect_no_event(Duration::from_millis(1999))
        .expect_next([JUAN, ANA, CARLOS])
        .verify_complete()
        .await?;

    // Assert
    assert_eq!(elapsed, Duration::from_secs(2));
    Ok(())
}

#[tokio::test]
async fn test_delay_preserves_source_order() -> anyhow::Result<()> {
    // Arrange
    let timer = VirtualTimer::new();
    let (tx, stream) = test_channel();
    let mut delayed = stream.delay_with_timer(Duration::from_secs(1), timer.clone());

    // Act
    tx.send(1)?;
    assert!(delayed.next().now_or_never().is_none());
    timer.advance(Duration::from_millis(500));
    tx.send(2)?;
    assert!(delayed.next().now_or_never().is_none());

    // Assert
    timer.advance(Duration::from_millis(500));
    assert_eq!(delayed.next().now_or_never().flatten().map(StreamItem::unwrap), Some(1));
    assert!(delayed.next().now_or_never().is_none());

    timer.advance(Duration::from_millis(500));
    assert_eq!(delayed.next().now_or_never().flatten().map(StreamItem::unwrap), Some(2));
    assert_eq!(timer.now().since_start(), Duration::from_millis(1500));
    Ok(())
}

#[tokio::test]
async fn test_delay_forwards_errors_immediately() -> anyhow::Result<()> {
    // Arrange
    let timer = VirtualTimer::new();
    let (tx, stream) = test_channel_with_errors();
    let mut delayed = stream.delay_with_timer(Duration::from_secs(1), timer.clone());

    // Act
    tx.send(StreamItem::Value(JUAN))?;
    tx.send(StreamItem::Error(RivuletError::stream_error("delay error")))?;

    // Assert: the error overtakes the value still in flight and ends the publisher
    assert!(matches!(delayed.next().now_or_never(), Some(Some(StreamItem::Error(_)))));
    timer.advance(Duration::from_secs(1));
    assert!(matches!(delayed.next().now_or_never(), Some(None)));
    Ok(())
}

#[tokio::test]
async fn test_delay_completes_after_last_value() -> anyhow::Result<()> {
    let timer = VirtualTimer::new();

    let elapsed = StepVerifier::with_virtual_time(
        just(JUAN).delay_with_timer(Duration::from_secs(30), timer.clone()),
        timer,
    )
    .expect_next([JUAN])
    .verify_complete()
    .await?;

    assert_eq!(elapsed, Duration::from_secs(30));
    Ok(())
}
