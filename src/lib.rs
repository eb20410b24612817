// Copyright 2026 quadtree-rs Developers
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! A bucketed region quadtree over 2D axis-aligned rectangles.
//!
//! [`QuadTree`] recursively partitions a bounded region into four quadrants
//! so that range searches, insertion, and removal run faster than a linear
//! scan. Each node holds a capacity-bounded bucket of items whose bounds do
//! not fit cleanly into a single child quadrant; children are created lazily
//! on first use. Items are opaque, cheaply clonable handles owned by the
//! caller; the tree only records them alongside their bounding rectangles.
//!
//! ```
//! use quadtree::{QuadTree, Rect};
//!
//! let mut tree = QuadTree::new(Rect::new(0.0, 0.0, 100.0, 100.0));
//! tree.insert_with_bounds(1, Rect::new(10.0, 10.0, 20.0, 20.0));
//! tree.insert_with_bounds(2, Rect::new(60.0, 60.0, 80.0, 80.0));
//!
//! let found = tree.search(&Rect::new(0.0, 0.0, 30.0, 30.0));
//! assert_eq!(found, vec![1]);
//! assert!(tree.remove(&2).is_ok());
//! assert_eq!(tree.len(), 1);
//! ```
//!
//! The tree is not thread-safe; callers needing concurrent access must wrap
//! it in their own synchronization.

pub mod geometry;
pub mod tree;

mod error;

pub use error::Error;
pub use geometry::{Point, Rect};
pub use tree::quad::{
    advised_max_depth, Iter, QuadLeaf, QuadNode, QuadTree, QuadTreeStats, RectQuery,
    SpatialQuery, DEFAULT_BUCKET_CAPACITY, MAX_ADVISED_DEPTH,
};

use num::{Bounded, Float, FromPrimitive, Signed, ToPrimitive};
use std::fmt::Debug;
use std::ops::{AddAssign, MulAssign};

/// The bounds required of a coordinate scalar, as a trait alias.
/// `f32` and `f64` are the intended instantiations.
pub trait FP:
    Float
    + Signed
    + Bounded
    + MulAssign
    + AddAssign
    + ToPrimitive
    + FromPrimitive
    + Copy
    + Debug
    + Default
{
}

impl<P> FP for P where
    P: Float
        + Signed
        + Bounded
        + MulAssign
        + AddAssign
        + ToPrimitive
        + FromPrimitive
        + Copy
        + Debug
        + Default
{
}
