// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use futures::StreamExt;
use rivulet_core::{RivuletError, StreamItem};
use rivulet_publisher::prelude::*;
use rivulet_test_utils::test_data::{ANA, CARLOS, ELENA, JUAN};
use rivulet_test_utils::{test_channel_with_errors, unwrap_stream, StepVerifier};

#[tokio::test]
async fn test_map_items_upper_cases_names() -> anyhow::Result<()> {
    // Arrange
    let publisher = just_all([JUAN, ANA, CARLOS, ELENA]).map_items(str::to_uppercase);

    // Act & Assert
    StepVerifier::create(publisher)
        .expect_next(["JUAN", "ANA", "CARLOS", "ELENA"].map(String::from))
        .verify_complete()
        .await?;

    Ok(())
}

#[tokio::test]
async fn test_filter_items_keeps_names_starting_with_a() -> anyhow::Result<()> {
    let publisher = just_all([JUAN, ANA, CARLOS, ELENA]).filter_items(|name| name.starts_with('A'));

    StepVerifier::create(publisher)
        .expect_next([ANA])
        .verify_complete()
        .await?;

    Ok(())
}

#[tokio::test]
async fn test_filter_then_map_chain() -> anyhow::Result<()> {
    let publisher = from_iter(1..=10)
        .filter_items(|n| n % 2 == 0)
        .map_items(|n| n * 10);

    StepVerifier::create(publisher)
        .expect_next([20, 40, 60, 80, 100])
        .verify_complete()
        .await?;

    Ok(())
}

#[tokio::test]
async fn test_map_items_passes_errors_through() -> anyhow::Result<()> {
    // Arrange
    let (tx, stream) = test_channel_with_errors();
    let mut mapped = stream.map_items(|n: i32| n + 1);

    // Act
    tx.send(StreamItem::Value(1))?;
    tx.send(StreamItem::Error(RivuletError::stream_error("map error")))?;

    // Assert
    assert_eq!(unwrap_stream(&mut mapped, 500).await?, 2);
    assert!(matches!(mapped.next().await, Some(StreamItem::Error(_))));
    Ok(())
}

#[tokio::test]
async fn test_filter_items_never_drops_errors() -> anyhow::Result<()> {
    // Arrange
    let (tx, stream) = test_channel_with_errors();
    let filtered = stream.filter_items(|_: &i32| false);

    // Act
    tx.send(StreamItem::Value(1))?;
    tx.send(StreamItem::Error(RivuletError::stream_error("filter error")))?;

    // Assert
    StepVerifier::create(filtered).verify_error().await?;
    Ok(())
}
