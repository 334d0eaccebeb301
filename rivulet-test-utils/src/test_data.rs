// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Name and number fixtures shared by the test suites.

pub const JUAN: &str = "Juan";
pub const ANA: &str = "Ana";
pub const CARLOS: &str = "Carlos";
pub const ELENA: &str = "Elena";
pub const ALBERTO: &str = "Alberto";

/// The first pair of names used by the combination scenarios.
pub const fn first_names() -> [&'static str; 2] {
    [JUAN, ANA]
}

/// The second pair of names used by the combination scenarios.
pub const fn second_names() -> [&'static str; 2] {
    [CARLOS, ELENA]
}

pub const fn all_names() -> [&'static str; 4] {
    [JUAN, ANA, CARLOS, ELENA]
}

/// `1..=n` as a vector.
pub fn numbers_up_to(n: u64) -> Vec<u64> {
    (1..=n).collect()
}

/// Squares of `1..=n`, in order.
pub fn squares_up_to(n: u64) -> Vec<u64> {
    (1..=n).map(|i| i * i).collect()
}
