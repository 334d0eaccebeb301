// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rivulet_sequence::{CostModel, Parallel, ParallelConfig, Sequence, Sequential};
use std::collections::HashSet;
use std::sync::Mutex;
use std::time::Duration;

fn parallel(workers: usize) -> anyhow::Result<Parallel> {
    Ok(Parallel::new(&ParallelConfig::default().with_workers(workers)?)?)
}

fn sum_of_squares(acc: u64, n: &u64) -> u64 {
    acc + n * n
}

#[test]
fn test_sum_of_squares_sequential() -> anyhow::Result<()> {
    // Arrange
    let numbers: Sequence<u64> = (1..=11).collect();
    let cost = CostModel::per_item(Duration::from_secs(1));

    // Act
    let report = numbers.fold_with(&Sequential, || 0, sum_of_squares, |a, b| a + b);

    // Assert
    assert_eq!(report.value, 506);
    assert_eq!(cost.makespan(&report), Duration::from_secs(11));
    Ok(())
}

#[test]
fn test_sum_of_squares_parallel_matches_sequential_and_is_faster() -> anyhow::Result<()> {
    // Arrange
    let numbers: Sequence<u64> = (1..=11).collect();
    let cost = CostModel::per_item(Duration::from_secs(1));
    let strategy = parallel(11)?;

    // Act
    let sequential = numbers.fold_with(&Sequential, || 0, sum_of_squares, |a, b| a + b);
    let concurrent = numbers.fold_with(&strategy, || 0, sum_of_squares, |a, b| a + b);

    // Assert
    assert_eq!(concurrent.value, sequential.value);
    assert_eq!(concurrent.partitions, vec![1; 11]);
    assert_eq!(cost.makespan(&concurrent), Duration::from_secs(1));
    assert_eq!(cost.total(&concurrent), cost.total(&sequential));
    assert!(cost.makespan(&concurrent) < cost.makespan(&sequential));
    Ok(())
}

#[test]
fn test_fewer_workers_than_items_balances_partitions() -> anyhow::Result<()> {
    let numbers: Sequence<u64> = (1..=11).collect();

    let report = numbers.fold_with(&parallel(4)?, || 0, sum_of_squares, |a, b| a + b);

    assert_eq!(report.value, 506);
    assert_eq!(report.partitions, vec![3, 3, 3, 2]);
    assert_eq!(report.critical_path(), 3);
    Ok(())
}

#[test]
fn test_parallel_fold_runs_on_worker_threads() -> anyhow::Result<()> {
    // Arrange
    let numbers: Sequence<u64> = (1..=64).collect();
    let threads = Mutex::new(HashSet::new());

    // Act
    let report = numbers.fold_with(
        &parallel(4)?,
        || 0,
        |acc, n| {
            if let Some(name) = std::thread::current().name() {
                threads.lock().unwrap().insert(name.to_string());
            }
            acc + n
        },
        |a, b| a + b,
    );

    // Assert
    assert_eq!(report.value, 64 * 65 / 2);
    let threads = threads.into_inner().unwrap();
    assert!(!threads.is_empty());
    assert!(threads.iter().all(|name| name.starts_with("rivulet-worker-")));
    Ok(())
}

#[test]
fn test_map_with_parallel_matches_sequential() -> anyhow::Result<()> {
    let names = Sequence::from(["Juan", "Ana", "Carlos", "Elena"]);

    let sequential = names.map_with(&Sequential, |name| name.to_uppercase());
    let concurrent = names.map_with(&parallel(3)?, |name| name.to_uppercase());

    assert_eq!(sequential, concurrent);
    assert_eq!(concurrent.as_slice(), &["JUAN", "ANA", "CARLOS", "ELENA"]);
    Ok(())
}
