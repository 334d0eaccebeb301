// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Operator traits and sources in one import.
//!
//! ```
//! use rivulet_publisher::prelude::*;
//!
//! let names = just_all(["Juan", "Ana"])
//!     .map_items(str::to_uppercase)
//!     .concat_with(just("CARLOS".to_string()));
//! # drop(names);
//! ```

pub use crate::concat_with::ConcatWithExt;
pub use crate::delay::DelayExt;
pub use crate::delay_elements::DelayElementsExt;
pub use crate::filter_items::FilterItemsExt;
pub use crate::map_items::MapItemsExt;
pub use crate::merge_with::MergeWithExt;
pub use crate::single::Single;
pub use crate::source::{empty, error, from_iter, from_results, just, just_all};
pub use crate::zip_with::ZipWithExt;
pub use rivulet_core::{StreamItem, SubscribeExt, Subscriber};
