// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rivulet::prelude::*;
use rivulet::{FoldReport, PARALLELISM_ENV};
use rivulet_test_utils::test_data::{all_names, numbers_up_to, ALBERTO, ANA};
use std::time::Duration;

fn sum_of_squares<S: Strategy>(numbers: &Sequence<u64>, strategy: &S) -> FoldReport<u64> {
    numbers.fold_with(strategy, || 0, |acc, n| acc + n * n, |a, b| a + b)
}

#[test]
fn test_names_to_upper_case() {
    // Arrange
    let names = Sequence::from(all_names());

    // Act
    let upper = names.map(|name| name.to_uppercase());

    // Assert
    assert_eq!(upper.as_slice(), &["JUAN", "ANA", "CARLOS", "ELENA"]);
    assert_eq!(names.as_slice(), &all_names());
}

#[test]
fn test_names_starting_with_a() {
    let names = Sequence::from(all_names());

    let with_a = names.filter(|name| name.starts_with('A'));

    assert_eq!(with_a.as_slice(), &[ANA]);
}

#[test]
fn test_for_each_visits_names_in_order() {
    let names = Sequence::from(all_names());
    let mut seen = Vec::new();

    names.for_each(|name| seen.push(name.to_uppercase()));

    assert_eq!(seen, vec!["JUAN", "ANA", "CARLOS", "ELENA"]);
}

#[test]
fn test_reduce_joins_names() {
    let names = Sequence::from(all_names());

    let joined = names.reduce(String::new(), |acc, name| acc + " " + *name);

    assert_eq!(joined.trim(), "Juan Ana Carlos Elena");
}

#[test]
fn test_match_predicates_on_names() {
    let names = Sequence::from(all_names());
    let a_names = Sequence::from([ANA, ALBERTO]);

    assert!(a_names.all_match(|name| name.starts_with('A')));
    assert!(!names.all_match(|name| name.starts_with('A')));
    assert!(names.any_match(|name| name.starts_with('A')));
    assert!(!names.any_match(|name| name.starts_with('Z')));
}

#[test]
fn test_integer_operations() {
    // Arrange
    let four = Sequence::from(vec![1, 2, 3, 4]);
    let five = Sequence::from(vec![1, 2, 3, 4, 5]);

    // Act & Assert
    assert_eq!(four.map(|n| n * 2).as_slice(), &[2, 4, 6, 8]);
    assert_eq!(four.filter(|n| n % 2 == 0).as_slice(), &[2, 4]);
    assert_eq!(five.reduce(0, |acc, n| acc + n), 15);
    assert!(five.all_match(|n| *n > 0));
    assert!(!five.all_match(|n| n % 2 == 0));
}

#[test]
fn test_lazy_pipeline_matches_eager_operations() {
    let names = Sequence::from(all_names());

    let lazy = names
        .pipeline()
        .filter(|name| name.len() > 3)
        .map(str::to_uppercase)
        .collect();
    let eager = names
        .filter(|name| name.len() > 3)
        .map(|name| name.to_uppercase());

    assert_eq!(lazy, eager);
}

#[test]
fn test_sum_of_squares_sequential_versus_parallel() -> anyhow::Result<()> {
    // Arrange
    let numbers = Sequence::from(numbers_up_to(11));
    let cost = CostModel::per_item(Duration::from_secs(1));
    let parallel = Parallel::new(&ParallelConfig::default().with_workers(11)?)?;

    // Act
    let sequential = sum_of_squares(&numbers, &Sequential);
    let concurrent = sum_of_squares(&numbers, &parallel);

    // Assert
    assert_eq!(sequential.value, 506);
    assert_eq!(concurrent.value, 506);
    assert_eq!(cost.makespan(&sequential), Duration::from_secs(11));
    assert_eq!(cost.makespan(&concurrent), Duration::from_secs(1));
    assert_eq!(cost.total(&concurrent), cost.total(&sequential));
    Ok(())
}

#[test]
fn test_parallelism_read_from_environment() -> anyhow::Result<()> {
    // Arrange
    std::env::set_var(PARALLELISM_ENV, "11");

    // Act
    let config = ParallelConfig::from_env();
    std::env::remove_var(PARALLELISM_ENV);
    let parallel = Parallel::new(&config?)?;

    // Assert
    assert_eq!(parallel.workers(), 11);
    let report = sum_of_squares(&Sequence::from(numbers_up_to(11)), &parallel);
    assert_eq!(report.partitions.len(), 11);
    Ok(())
}
