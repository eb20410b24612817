// Copyright 2026 quadtree-rs Developers
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use thiserror::Error;

/// Errors reported by tree operations.
///
/// Queries that merely find nothing are not errors: searching an empty
/// region returns an empty result.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A bucket capacity of zero was requested. Rejected eagerly with no
    /// side effect on the tree.
    #[error("bucket capacity must be at least 1, got {0}")]
    InvalidBucketCapacity(usize),

    /// `insert` needs a bounds function, but the tree was built without
    /// one. Use `insert_with_bounds` instead.
    #[error("tree has no bounds function")]
    MissingBoundsFunction,

    /// The item to remove is not stored in the tree.
    #[error("item not found")]
    NotFound,
}
