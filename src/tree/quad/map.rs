// Copyright 2026 quadtree-rs Developers
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use crate::error::Error;
use crate::geometry::Rect;
use crate::tree::quad::node::SplitLimits;
use crate::tree::quad::{
    QuadLeaf, QuadNode, QuadTreeStats, RectQuery, SpatialQuery, DEFAULT_BUCKET_CAPACITY,
};
use crate::FP;
use log::debug;
use num::{Float, One};
use std::collections::HashMap;
use std::fmt::{self, Debug};
use std::hash::Hash;
use std::io;
use std::slice::Iter as SliceIter;

/// Derives an item's bounds at insertion time
type BoundsFn<P, T> = Box<dyn Fn(&T) -> Rect<P>>;

/// A bucketed region quadtree over 2D axis-aligned rectangles.
///
/// Items are cheap, hashable handles (`T: Eq + Hash + Clone`); the tree
/// stores each handle in exactly one node's bucket together with its
/// bounds, and keeps a reverse index from handle to cached bounds so
/// removal never rescans the tree. Item bounds may protrude outside the
/// global bounds; such items simply never descend below the root.
///
/// Not thread-safe: every operation is a bounded synchronous traversal
/// with no internal locking.
pub struct QuadTree<P, T> {
    root: QuadNode<P, T>,
    bucket_capacity: usize,
    max_depth: usize,
    force_subnodes: bool,
    min_extent: P,
    bounds_fn: Option<BoundsFn<P, T>>,
    index: HashMap<T, Rect<P>>,
    len: usize,
}

impl<P: FP, T: Eq + Hash + Clone> QuadTree<P, T> {
    /// Create a tree covering `bounds`. Every insertion must supply
    /// explicit bounds via `insert_with_bounds`.
    ///
    /// Zero-area `bounds` are legal: such a tree never subdivides and
    /// degenerates to a single root bucket.
    pub fn new(bounds: Rect<P>) -> QuadTree<P, T> {
        QuadTree::build(bounds, None)
    }

    /// Create a tree covering `bounds` with a bounds function, letting
    /// callers use `insert`. The function is invoked once per insertion
    /// and the result cached; it must stay consistent for a given item
    /// while the item is stored.
    pub fn new_with_bounds_fn<F>(bounds: Rect<P>, bounds_fn: F) -> QuadTree<P, T>
    where
        F: Fn(&T) -> Rect<P> + 'static,
    {
        QuadTree::build(bounds, Some(Box::new(bounds_fn)))
    }

    fn build(bounds: Rect<P>, bounds_fn: Option<BoundsFn<P, T>>) -> QuadTree<P, T> {
        // Subdivision floor, relative to the global extent so differently
        // scaled coordinate systems behave alike. The one() floor keeps
        // zero-area global bounds from disabling the halt.
        let span = bounds.width().max(bounds.height()).max(P::one());
        QuadTree {
            root: QuadNode::new(bounds, DEFAULT_BUCKET_CAPACITY),
            bucket_capacity: DEFAULT_BUCKET_CAPACITY,
            max_depth: 0,
            force_subnodes: false,
            min_extent: span * P::epsilon(),
            bounds_fn,
            index: HashMap::new(),
            len: 0,
        }
    }

    /// Bucket size for nodes created from now on. Existing nodes,
    /// the root included, keep the capacity they were created with.
    pub fn set_bucket_capacity(&mut self, capacity: usize) -> Result<(), Error> {
        if capacity == 0 {
            return Err(Error::InvalidBucketCapacity(capacity));
        }
        self.bucket_capacity = capacity;
        Ok(())
    }

    pub fn bucket_capacity(&self) -> usize {
        self.bucket_capacity
    }

    /// Hard ceiling on node depth; 0 (the default) means unlimited, with
    /// the subdivision floor as the adaptive stop. See `advised_max_depth`
    /// for a recommendation based on an expected item count.
    pub fn set_max_depth(&mut self, max_depth: usize) {
        self.max_depth = max_depth;
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Always descend into a fitting quadrant instead of filling the
    /// current node's bucket first. Deepens the tree in exchange for
    /// tighter placement. Cannot be unset.
    pub fn force_use_of_subnodes(&mut self) {
        self.force_subnodes = true;
    }

    /// Insert an item, deriving its bounds from the tree's bounds
    /// function. Fails with `MissingBoundsFunction` on a tree built
    /// without one.
    pub fn insert(&mut self, item: T) -> Result<(), Error> {
        let bounds = match self.bounds_fn {
            Some(ref bounds_fn) => bounds_fn(&item),
            None => return Err(Error::MissingBoundsFunction),
        };
        self.insert_with_bounds(item, bounds);
        Ok(())
    }

    /// Insert an item under explicit bounds. The deepest node whose
    /// quadrant wholly contains `bounds` receives the item; items
    /// straddling quadrant midpoints stay higher up, and items outside
    /// the global bounds stay at the root.
    pub fn insert_with_bounds(&mut self, item: T, bounds: Rect<P>) {
        let limits = self.split_limits();
        self.index.insert(item.clone(), bounds);
        self.root.insert(QuadLeaf::new(bounds, item), &limits, 1);
        self.len += 1;
    }

    /// Remove an item under the bounds recorded at insertion.
    pub fn remove(&mut self, item: &T) -> Result<(), Error> {
        match self.index.get(item).copied() {
            Some(bounds) => self.remove_located(item, &bounds),
            None => {
                debug!("remove of an item absent from the index");
                Err(Error::NotFound)
            }
        }
    }

    /// Remove an item, falling back on `bounds` to locate it when the
    /// index holds no entry. The indexed bounds are preferred: they are
    /// the ones the item was actually stored under.
    pub fn remove_with_bounds(&mut self, item: &T, bounds: &Rect<P>) -> Result<(), Error> {
        let located = self.index.get(item).copied().unwrap_or(*bounds);
        self.remove_located(item, &located)
    }

    fn remove_located(&mut self, item: &T, bounds: &Rect<P>) -> Result<(), Error> {
        if self.root.remove(item, bounds) {
            self.index.remove(item);
            self.len -= 1;
            Ok(())
        } else {
            debug!("remove of an item absent from the tree");
            Err(Error::NotFound)
        }
    }

    /// All items whose bounds overlap `query`, in discovery order. The
    /// overlap test is inclusive: rects sharing only an edge or corner
    /// match. Each stored item appears at most once.
    pub fn search(&self, query: &Rect<P>) -> Vec<T> {
        let mut found = Vec::new();
        self.root.search_into(query, &mut found);
        found
    }

    /// Whether any stored item's bounds overlap `query`. Short-circuits
    /// without building a result collection.
    pub fn has_match(&self, query: &Rect<P>) -> bool {
        self.root.has_match(query)
    }

    /// Visit every stored item in unspecified order until `visit`
    /// returns false.
    pub fn foreach<F: FnMut(&T) -> bool>(&self, mut visit: F) {
        for (_, item) in self.iter() {
            if !visit(item) {
                break;
            }
        }
    }

    /// Aggregate counters gathered by a full traversal.
    pub fn stats(&self) -> QuadTreeStats {
        let mut stats = QuadTreeStats::default();
        self.root.collect_stats(1, &mut stats);
        stats
    }

    /// Recursive human-readable dump of nodes and their buckets.
    /// Diagnostic output only; the format is not stable.
    pub fn dump<W: io::Write>(&self, out: &mut W) -> io::Result<()>
    where
        T: Debug,
    {
        self.root.dump(out, 0)
    }

    /// Number of stored items
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree stores no items
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Drop every item and subnode, keeping the global bounds and
    /// configuration.
    pub fn clear(&mut self) {
        let bounds = *self.root.bounds();
        self.root = QuadNode::new(bounds, self.bucket_capacity);
        self.index.clear();
        self.len = 0;
    }

    /// Iter over all `(bounds, item)` pairs
    pub fn iter(&self) -> Iter<'_, P, T, RectQuery<P>> {
        Iter::new(RectQuery::Overlaps(Rect::max()), &self.root)
    }

    /// Iter over the `(bounds, item)` pairs matching a query
    pub fn iter_query<Q: SpatialQuery<P, T>>(&self, query: Q) -> Iter<'_, P, T, Q> {
        Iter::new(query, &self.root)
    }

    fn split_limits(&self) -> SplitLimits<P> {
        SplitLimits {
            bucket_capacity: self.bucket_capacity,
            max_depth: self.max_depth,
            min_extent: self.min_extent,
            force_subnodes: self.force_subnodes,
        }
    }
}

impl<P: FP, T> Debug for QuadTree<P, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuadTree")
            .field("bounds", self.root.bounds())
            .field("len", &self.len)
            .field("bucket_capacity", &self.bucket_capacity)
            .field("max_depth", &self.max_depth)
            .finish()
    }
}

/// Iter all leaves matching a query
pub struct Iter<'tree, P, T, Q> {
    query: Q,
    node_stack: Vec<&'tree QuadNode<P, T>>,
    leaf_iter: Option<SliceIter<'tree, QuadLeaf<P, T>>>,
}

impl<'tree, P: FP, T, Q: SpatialQuery<P, T>> Iter<'tree, P, T, Q> {
    fn new(query: Q, root: &'tree QuadNode<P, T>) -> Iter<'tree, P, T, Q> {
        let mut node_stack = Vec::new();
        if query.accept_node(root) {
            node_stack.push(root);
        }
        Iter {
            query,
            node_stack,
            leaf_iter: None,
        }
    }
}

impl<'tree, P: FP, T, Q: SpatialQuery<P, T>> Iterator for Iter<'tree, P, T, Q> {
    type Item = (&'tree Rect<P>, &'tree T);

    fn next(&mut self) -> Option<(&'tree Rect<P>, &'tree T)> {
        loop {
            if let Some(ref mut leaves) = self.leaf_iter {
                for leaf in leaves {
                    if self.query.accept_leaf(leaf) {
                        return Some(leaf.as_tuple());
                    }
                }
            }
            let node = self.node_stack.pop()?;
            for subnode in node.subnodes().iter().flatten() {
                if self.query.accept_node(subnode) {
                    self.node_stack.push(&**subnode);
                }
            }
            self.leaf_iter = Some(node.bucket().iter());
        }
    }
}
