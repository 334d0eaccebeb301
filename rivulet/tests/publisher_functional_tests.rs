// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rivulet::prelude::*;
use rivulet_test_utils::test_data::{
    all_names, first_names, second_names, squares_up_to, ANA, CARLOS, ELENA, JUAN,
};
use rivulet_test_utils::StepVerifier;
use std::time::Duration;

#[tokio::test]
async fn test_single_value() -> anyhow::Result<()> {
    StepVerifier::create(just(JUAN))
        .expect_next([JUAN])
        .verify_complete()
        .await?;

    Ok(())
}

#[tokio::test]
async fn test_fixed_values() -> anyhow::Result<()> {
    StepVerifier::create(just_all(all_names()))
        .expect_next(all_names())
        .verify_complete()
        .await?;

    Ok(())
}

#[tokio::test]
async fn test_values_from_collection() -> anyhow::Result<()> {
    let names: Vec<String> = all_names().iter().map(ToString::to_string).collect();

    StepVerifier::create(from_iter(names.clone()))
        .expect_next(names)
        .verify_complete()
        .await?;

    Ok(())
}

#[tokio::test]
async fn test_map_to_upper_case() -> anyhow::Result<()> {
    StepVerifier::create(just_all(all_names()).map_items(|name| name.to_uppercase()))
        .expect_next(["JUAN", "ANA", "CARLOS", "ELENA"].map(String::from))
        .verify_complete()
        .await?;

    Ok(())
}

#[tokio::test]
async fn test_filter_starting_with_a() -> anyhow::Result<()> {
    StepVerifier::create(just_all(all_names()).filter_items(|name| name.starts_with('A')))
        .expect_next([ANA])
        .verify_complete()
        .await?;

    Ok(())
}

#[tokio::test]
async fn test_delayed_squares() -> anyhow::Result<()> {
    // Arrange
    let timer = VirtualTimer::new();
    let squares = from_iter(1..=11u64)
        .delay_elements_with_timer(Duration::from_secs(1), timer.clone())
        .map_items(|n| n * n);

    // Act
    let elapsed = StepVerifier::with_virtual_time(squares, timer)
        .expect_next(squares_up_to(11))
        .verify_complete()
        .await?;

    // Assert
    assert_eq!(elapsed, Duration::from_secs(11));
    Ok(())
}

#[tokio::test]
async fn test_concat_then_merge_then_zip() -> anyhow::Result<()> {
    StepVerifier::create(just_all(first_names()).concat_with(just_all(second_names())))
        .expect_next([JUAN, ANA, CARLOS, ELENA])
        .verify_complete()
        .await?;

    let timer = VirtualTimer::new();
    let delayed = just_all(first_names())
        .delay_elements_with_timer(Duration::from_secs(1), timer.clone());
    StepVerifier::with_virtual_time(delayed.merge_with(just_all(second_names())), timer)
        .expect_next([CARLOS, ELENA, JUAN, ANA])
        .verify_complete()
        .await?;

    let zipped = just_all(first_names())
        .zip_with(just_all(second_names()), |a, b| format!("{a} - {b}"));
    StepVerifier::create(zipped)
        .expect_next(["Juan - Carlos", "Ana - Elena"].map(String::from))
        .verify_complete()
        .await?;

    Ok(())
}
