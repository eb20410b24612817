// Copyright 2026 quadtree-rs Developers
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use crate::geometry::Rect;
use crate::tree::quad::{QuadLeaf, QuadTreeStats};
use crate::FP;
use log::trace;
use std::fmt::Debug;
use std::io;

/// One of the four equal subdivisions of a node's extent, split at the
/// extent's midpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Quadrant {
    SouthWest = 0,
    SouthEast = 1,
    NorthWest = 2,
    NorthEast = 3,
}

impl Quadrant {
    /// The quadrant of `bounds` that wholly contains `rect`, or None if
    /// `rect` straddles a midpoint on either axis. Each axis is decided
    /// independently; a rect touching a midpoint exactly resolves to the
    /// lower half, so placement is deterministic for degenerate rects.
    pub(crate) fn containing<P: FP>(bounds: &Rect<P>, rect: &Rect<P>) -> Option<Quadrant> {
        let center = bounds.center();
        let east = if rect.max.x <= center.x {
            Some(false)
        } else if rect.min.x >= center.x {
            Some(true)
        } else {
            None
        };
        let north = if rect.max.y <= center.y {
            Some(false)
        } else if rect.min.y >= center.y {
            Some(true)
        } else {
            None
        };
        match (east, north) {
            (Some(false), Some(false)) => Some(Quadrant::SouthWest),
            (Some(true), Some(false)) => Some(Quadrant::SouthEast),
            (Some(false), Some(true)) => Some(Quadrant::NorthWest),
            (Some(true), Some(true)) => Some(Quadrant::NorthEast),
            _ => None,
        }
    }

    /// The extent this quadrant covers within `bounds`. The four quadrants
    /// tile `bounds` exactly, with no gap or overlap.
    pub(crate) fn bounds_within<P: FP>(self, bounds: &Rect<P>) -> Rect<P> {
        let center = bounds.center();
        match self {
            Quadrant::SouthWest => Rect::from_corners(bounds.min, center),
            Quadrant::SouthEast => Rect::new(center.x, bounds.min.y, bounds.max.x, center.y),
            Quadrant::NorthWest => Rect::new(bounds.min.x, center.y, center.x, bounds.max.y),
            Quadrant::NorthEast => Rect::from_corners(center, bounds.max),
        }
    }
}

/// Subdivision parameters threaded through an insertion descent.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SplitLimits<P> {
    /// Bucket size for subnodes created during this descent.
    pub bucket_capacity: usize,
    /// Hard depth ceiling; 0 means unlimited.
    pub max_depth: usize,
    /// Smallest quadrant edge worth subdividing into. A subnode narrower
    /// or flatter than this is never created; without it, coincident or
    /// tightly clustered rects would recurse forever.
    pub min_extent: P,
    /// Skip the bucket-room fast path and descend whenever a quadrant
    /// fits the item.
    pub force_subnodes: bool,
}

/// A tree node: one rectangular extent, a bucket of directly stored
/// leaves, and up to four lazily created subnodes.
#[derive(Debug)]
pub struct QuadNode<P, T> {
    bounds: Rect<P>,
    max_items: usize,
    leaves: Vec<QuadLeaf<P, T>>,
    subnodes: [Option<Box<QuadNode<P, T>>>; 4],
}

impl<P: FP, T> QuadNode<P, T> {
    pub(crate) fn new(bounds: Rect<P>, max_items: usize) -> QuadNode<P, T> {
        QuadNode {
            bounds,
            max_items,
            leaves: Vec::new(),
            subnodes: [None, None, None, None],
        }
    }

    /// The extent this node covers
    pub fn bounds(&self) -> &Rect<P> {
        &self.bounds
    }

    /// Leaves bucketed directly on this node
    pub fn bucket(&self) -> &[QuadLeaf<P, T>] {
        &self.leaves
    }

    pub(crate) fn subnodes(&self) -> &[Option<Box<QuadNode<P, T>>>; 4] {
        &self.subnodes
    }

    fn has_subnodes(&self) -> bool {
        self.subnodes.iter().any(|subnode| subnode.is_some())
    }

    /// Place `leaf` in this node's bucket or descend into the quadrant
    /// wholly containing it. Buckets are unbounded for leaves that cannot
    /// descend: straddling the midpoint, hitting the depth ceiling, or
    /// hitting the subdivision floor all park the leaf here.
    pub(crate) fn insert(&mut self, leaf: QuadLeaf<P, T>, limits: &SplitLimits<P>, depth: usize) {
        if !self.has_subnodes() && self.leaves.len() < self.max_items && !limits.force_subnodes {
            self.leaves.push(leaf);
            return;
        }
        if limits.max_depth != 0 && depth >= limits.max_depth {
            self.leaves.push(leaf);
            return;
        }
        let quadrant = match Quadrant::containing(&self.bounds, &leaf.bounds) {
            Some(quadrant) => quadrant,
            None => {
                self.leaves.push(leaf);
                return;
            }
        };
        let child_bounds = quadrant.bounds_within(&self.bounds);
        // Far from the origin the midpoint can round onto an edge, leaving
        // a quadrant equal to this node's own extent; descending into it
        // would never terminate.
        if child_bounds == self.bounds
            || child_bounds.width() < limits.min_extent
            || child_bounds.height() < limits.min_extent
        {
            self.leaves.push(leaf);
            return;
        }
        let capacity = limits.bucket_capacity;
        self.subnodes[quadrant as usize]
            .get_or_insert_with(|| {
                trace!("creating {:?} subnode at depth {}", quadrant, depth + 1);
                Box::new(QuadNode::new(child_bounds, capacity))
            })
            .insert(leaf, limits, depth + 1);
    }

    /// Remove one leaf holding `item`, walking the containment path that
    /// an insertion of `bounds` would take. Returns false if no bucket on
    /// that path holds the item. Bucket order is not preserved.
    pub(crate) fn remove(&mut self, item: &T, bounds: &Rect<P>) -> bool
    where
        T: PartialEq,
    {
        if let Some(at) = self.leaves.iter().position(|leaf| leaf.item == *item) {
            self.leaves.swap_remove(at);
            return true;
        }
        if let Some(quadrant) = Quadrant::containing(&self.bounds, bounds) {
            if let Some(ref mut subnode) = self.subnodes[quadrant as usize] {
                return subnode.remove(item, bounds);
            }
        }
        false
    }

    /// Collect every item whose bounds overlap `query`, descending only
    /// into subnodes whose extents overlap it.
    pub(crate) fn search_into(&self, query: &Rect<P>, found: &mut Vec<T>)
    where
        T: Clone,
    {
        for leaf in &self.leaves {
            if leaf.bounds.overlapped_by(query) {
                found.push(leaf.item.clone());
            }
        }
        for subnode in self.subnodes.iter().flatten() {
            if subnode.bounds.overlapped_by(query) {
                subnode.search_into(query, found);
            }
        }
    }

    /// Same traversal as `search_into`, stopping at the first overlap.
    pub(crate) fn has_match(&self, query: &Rect<P>) -> bool {
        if self.leaves.iter().any(|leaf| leaf.bounds.overlapped_by(query)) {
            return true;
        }
        self.subnodes.iter().flatten().any(|subnode| {
            subnode.bounds.overlapped_by(query) && subnode.has_match(query)
        })
    }

    pub(crate) fn collect_stats(&self, depth: usize, stats: &mut QuadTreeStats) {
        stats.node_count += 1;
        stats.item_count += self.leaves.len();
        stats.max_depth = stats.max_depth.max(depth);
        stats.max_bucket_size = stats.max_bucket_size.max(self.leaves.len());
        for subnode in self.subnodes.iter().flatten() {
            subnode.collect_stats(depth + 1, stats);
        }
    }

    pub(crate) fn dump<W: io::Write>(&self, out: &mut W, depth: usize) -> io::Result<()>
    where
        T: Debug,
    {
        let pad = "  ".repeat(depth);
        writeln!(
            out,
            "{}node ({:?}, {:?})-({:?}, {:?}), depth {}, {} items",
            pad,
            self.bounds.min.x,
            self.bounds.min.y,
            self.bounds.max.x,
            self.bounds.max.y,
            depth + 1,
            self.leaves.len()
        )?;
        for leaf in &self.leaves {
            writeln!(
                out,
                "{}  {:?} at ({:?}, {:?})-({:?}, {:?})",
                pad,
                leaf.item,
                leaf.bounds.min.x,
                leaf.bounds.min.y,
                leaf.bounds.max.x,
                leaf.bounds.max.y
            )?;
        }
        for subnode in self.subnodes.iter().flatten() {
            subnode.dump(out, depth + 1)?;
        }
        Ok(())
    }
}
