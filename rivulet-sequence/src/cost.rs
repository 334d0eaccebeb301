// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Logical cost accounting for folds.
//!
//! Instead of sleeping inside the fold and timing it with a wall clock, a
//! [`CostModel`] assigns a fixed processing cost to every element and derives the
//! elapsed time from a [`FoldReport`]'s partitions. The result is exact and
//! independent of the machine running the fold.

use crate::strategy::FoldReport;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CostModel {
    per_item: Duration,
}

impl CostModel {
    pub const fn per_item(per_item: Duration) -> Self {
        Self { per_item }
    }

    /// Elapsed time when partitions run concurrently: the slowest partition.
    pub fn makespan<A>(&self, report: &FoldReport<A>) -> Duration {
        self.scaled(report.critical_path())
    }

    /// Elapsed time if every element were processed one after another.
    pub fn total<A>(&self, report: &FoldReport<A>) -> Duration {
        self.scaled(report.total_work())
    }

    /// Saturates at `Duration::MAX` instead of overflowing.
    fn scaled(&self, items: usize) -> Duration {
        u32::try_from(items)
            .ok()
            .and_then(|items| self.per_item.checked_mul(items))
            .unwrap_or(Duration::MAX)
    }
}
