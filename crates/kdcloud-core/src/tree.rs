//! k-d tree spatial index
//!
//! Points are inserted one at a time by descending from the root, comparing
//! a single coordinate per level: `<` goes left, `>=` goes right, and the
//! compared axis cycles with depth. The tree is never rebalanced, so sorted
//! input produces a list-shaped tree with linear query cost.
//!
//! Nodes live in an arena (`Vec`) and refer to their children by index. The
//! hierarchy is still strict: every node except the root has exactly one
//! parent, and nodes are only ever appended.

use crate::bounds::Bounds;
use crate::error::{IndexError, IndexResult};
use crate::point::Point;
use crate::result::ResultSet;
use crate::search::{self, Collector, NearestCollector, RangeCollector};

pub(crate) type NodeId = usize;

/// A tree vertex: one point, its split axis, and up to two children
#[derive(Debug)]
pub(crate) struct Node<T> {
    pub point: Point<T>,
    pub axis: usize,
    /// Subtree with `coords[axis] < point.coords()[axis]`
    pub left: Option<NodeId>,
    /// Subtree with `coords[axis] >= point.coords()[axis]`
    pub right: Option<NodeId>,
}

/// Exact nearest-neighbor index over points of a fixed dimensionality
#[derive(Debug)]
pub struct KdTree<T = ()> {
    dims: usize,
    /// Arena of nodes; `nodes[0]` is the root when non-empty
    nodes: Vec<Node<T>>,
    bounds: Option<Bounds>,
}

impl<T> KdTree<T> {
    /// Create an empty index for `dims`-dimensional points
    pub fn new(dims: usize) -> IndexResult<Self> {
        if dims == 0 {
            return Err(IndexError::zero_dimensions());
        }
        Ok(Self {
            dims,
            nodes: Vec::new(),
            bounds: None,
        })
    }

    /// Build an index from a sequence of points
    pub fn from_points<I>(dims: usize, points: I) -> IndexResult<Self>
    where
        I: IntoIterator<Item = Point<T>>,
    {
        let mut tree = Self::new(dims)?;
        for point in points {
            tree.insert(point)?;
        }
        tracing::debug!(
            "Built {}-d tree with {} points, depth {}",
            dims,
            tree.len(),
            tree.depth()
        );
        Ok(tree)
    }

    /// Number of coordinates every point must have
    pub fn dims(&self) -> usize {
        self.dims
    }

    /// Get the number of points in the tree
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Bounding box of all inserted points
    pub fn bounds(&self) -> Option<&Bounds> {
        self.bounds.as_ref()
    }

    /// Remove every point, keeping the dimensionality
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.bounds = None;
    }

    /// Iterate over the stored points in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Point<T>> + '_ {
        self.nodes.iter().map(|node| &node.point)
    }

    fn root(&self) -> Option<NodeId> {
        if self.nodes.is_empty() {
            None
        } else {
            Some(0)
        }
    }

    fn check_dims(&self, coords: &[f64]) -> IndexResult<()> {
        if coords.len() != self.dims {
            return Err(IndexError::dimension_mismatch(self.dims, coords.len()));
        }
        Ok(())
    }

    /// Insert a point
    ///
    /// Duplicates are kept as separate nodes. On error the index is left
    /// exactly as it was.
    pub fn insert(&mut self, point: Point<T>) -> IndexResult<()> {
        self.check_dims(point.coords())?;
        self.nodes
            .try_reserve(1)
            .map_err(|_| IndexError::AllocationFailure)?;

        let id = self.nodes.len();
        let mut axis = 0;

        if let Some(mut current) = self.root() {
            loop {
                let node = &self.nodes[current];
                let go_left = point.coords()[node.axis] < node.point.coords()[node.axis];
                let child = if go_left { node.left } else { node.right };
                axis = (node.axis + 1) % self.dims;

                match child {
                    Some(next) => current = next,
                    None => {
                        let node = &mut self.nodes[current];
                        if go_left {
                            node.left = Some(id);
                        } else {
                            node.right = Some(id);
                        }
                        break;
                    }
                }
            }
        }

        match &mut self.bounds {
            Some(bounds) => bounds.expand_to_include(point.coords()),
            None => self.bounds = Some(Bounds::from_point(point.coords())),
        }

        // Cannot reallocate: capacity was reserved above
        self.nodes.push(Node {
            point,
            axis,
            left: None,
            right: None,
        });
        Ok(())
    }

    /// Height of the tree (0 when empty)
    pub fn depth(&self) -> usize {
        let Some(root) = self.root() else {
            return 0;
        };

        let mut max_depth = 0;
        let mut stack = vec![(root, 1)];
        while let Some((id, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            let node = &self.nodes[id];
            stack.extend(node.left.iter().chain(&node.right).map(|&c| (c, depth + 1)));
        }
        max_depth
    }

    /// Find the `k` points closest to `target`, nearest first
    ///
    /// Returns `min(k, len)` entries. Among equidistant points the one found
    /// earlier by the traversal wins, so results are deterministic for a
    /// given insertion order.
    pub fn nearest_n(&self, target: &[f64], k: usize) -> IndexResult<ResultSet<'_, T>> {
        self.check_dims(target)?;
        let Some(root) = self.root() else {
            return Ok(ResultSet::empty());
        };
        if k == 0 {
            return Ok(ResultSet::empty());
        }

        let collector = NearestCollector::new(k, self.len());
        Ok(self.run(root, target, collector, "nearest_n"))
    }

    /// Find the single closest point to `target`
    pub fn nearest(&self, target: &[f64]) -> IndexResult<Option<(&Point<T>, f64)>> {
        let results = self.nearest_n(target, 1)?;
        Ok(results.current().ok())
    }

    /// Find every point within `radius` of `target`, nearest first
    ///
    /// The boundary is inclusive. A negative or NaN radius matches nothing.
    pub fn nearest_in_range(
        &self,
        target: &[f64],
        radius: f64,
    ) -> IndexResult<ResultSet<'_, T>> {
        self.check_dims(target)?;
        let Some(root) = self.root() else {
            return Ok(ResultSet::empty());
        };
        if radius.is_nan() || radius < 0.0 {
            return Ok(ResultSet::empty());
        }

        let radius_sq = radius * radius;
        if let Some(bounds) = &self.bounds {
            if bounds.distance_sq_to_point(target) > radius_sq {
                tracing::debug!("nearest_in_range: ball misses the cloud bounds");
                return Ok(ResultSet::empty());
            }
        }

        let collector = RangeCollector::new(radius_sq);
        Ok(self.run(root, target, collector, "nearest_in_range"))
    }

    fn run<'a, C>(
        &'a self,
        root: NodeId,
        target: &[f64],
        mut collector: C,
        query: &str,
    ) -> ResultSet<'a, T>
    where
        C: Collector<'a, T>,
    {
        let visited = search::traverse(&self.nodes, root, target, &mut collector);
        let entries = collector.into_sorted();
        tracing::debug!(
            "{}: visited {} of {} nodes, found {}",
            query,
            visited,
            self.len(),
            entries.len()
        );
        ResultSet::new(entries)
    }

    /// Insert a 3-d point; fails unless the index is 3-dimensional
    pub fn insert3(&mut self, x: f64, y: f64, z: f64, data: T) -> IndexResult<()> {
        self.insert(Point::new([x, y, z], data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario_tree() -> KdTree<&'static str> {
        let mut tree = KdTree::new(3).unwrap();
        tree.insert3(0.0, 0.0, 0.0, "origin").unwrap();
        tree.insert3(10.0, 0.0, 0.0, "x").unwrap();
        tree.insert3(0.0, 10.0, 0.0, "y").unwrap();
        tree.insert3(0.0, 0.0, 10.0, "z").unwrap();
        tree.insert3(5.0, 5.0, 5.0, "center").unwrap();
        tree
    }

    #[test]
    fn test_new_rejects_zero_dims() {
        let err = KdTree::<()>::new(0).unwrap_err();
        assert!(matches!(err, IndexError::InvalidDimension { .. }));
    }

    #[test]
    fn test_new_is_empty() {
        let tree: KdTree = KdTree::new(2).unwrap();
        assert_eq!(tree.len(), 0);
        assert!(tree.is_empty());
        assert_eq!(tree.dims(), 2);
        assert_eq!(tree.depth(), 0);
        assert!(tree.bounds().is_none());
    }

    #[test]
    fn test_insert_partitions_by_axis() {
        let tree = scenario_tree();
        assert_eq!(tree.len(), 5);

        let root = &tree.nodes[0];
        assert_eq!(root.axis, 0);
        // (10,0,0) has x >= 0 so goes right; the rest tie on x and go right too
        let right = root.right.unwrap();
        assert_eq!(*tree.nodes[right].point.data(), "x");
        assert_eq!(tree.nodes[right].axis, 1);
        assert!(root.left.is_none());

        // (0,10,0): x 0 >= 0 (right), then y 10 >= 0 at "x" -> right of "x"
        let x_node = &tree.nodes[right];
        let y_id = x_node.right.unwrap();
        assert_eq!(*tree.nodes[y_id].point.data(), "y");
        // (0,0,10): x right, y 0 >= 0 right, z at "y" node: 10 >= 0 -> right
        assert_eq!(tree.nodes[y_id].axis, 2);
    }

    #[test]
    fn test_insert_goes_left_on_strictly_less() {
        let mut tree = KdTree::new(2).unwrap();
        tree.insert(Point::from_coords([5.0, 5.0])).unwrap();
        tree.insert(Point::from_coords([4.9, 100.0])).unwrap();
        tree.insert(Point::from_coords([5.0, -100.0])).unwrap();

        let root = &tree.nodes[0];
        assert_eq!(root.left, Some(1));
        assert_eq!(root.right, Some(2));
    }

    #[test]
    fn test_insert_rejects_wrong_dims_without_change() {
        let mut tree = scenario_tree();
        let err = tree.insert(Point::new(vec![1.0, 2.0], "bad")).unwrap_err();

        assert_eq!(err, IndexError::dimension_mismatch(3, 2));
        assert_eq!(tree.len(), 5);
        assert_eq!(tree.bounds().unwrap().max, vec![10.0, 10.0, 10.0]);
    }

    #[test]
    fn test_duplicates_are_retained() {
        let mut tree = KdTree::new(2).unwrap();
        tree.insert(Point::new([1.0, 1.0], 'a')).unwrap();
        tree.insert(Point::new([1.0, 1.0], 'b')).unwrap();

        assert_eq!(tree.len(), 2);
        let found: Vec<_> = tree
            .nearest_in_range(&[1.0, 1.0], 0.0)
            .unwrap()
            .map(|n| *n.data())
            .collect();
        assert_eq!(found, vec!['a', 'b']);
    }

    #[test]
    fn test_nearest_n_scenario() {
        let tree = scenario_tree();

        let mut one = tree.nearest_n(&[0.0, 0.0, 0.0], 1).unwrap();
        assert_eq!(one.len(), 1);
        let (point, distance_sq) = one.current().unwrap();
        assert_eq!(*point.data(), "origin");
        assert_eq!(distance_sq, 0.0);
        one.advance();
        assert!(one.is_exhausted());

        let two: Vec<_> = tree.nearest_n(&[0.0, 0.0, 0.0], 2).unwrap().collect();
        assert_eq!(two.len(), 2);
        assert_eq!(*two[0].data(), "origin");
        assert_eq!(two[1].distance_sq, 100.0);
        assert!(["x", "y", "z"].contains(two[1].data()));
    }

    #[test]
    fn test_nearest_n_is_deterministic() {
        let tree = scenario_tree();
        let first: Vec<_> = tree
            .nearest_n(&[0.0, 0.0, 0.0], 3)
            .unwrap()
            .map(|n| *n.data())
            .collect();
        let second: Vec<_> = tree
            .nearest_n(&[0.0, 0.0, 0.0], 3)
            .unwrap()
            .map(|n| *n.data())
            .collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_nearest_n_caps_at_len() {
        let tree = scenario_tree();
        let results = tree.nearest_n(&[1.0, 1.0, 1.0], 50).unwrap();
        assert_eq!(results.len(), 5);

        let distances: Vec<f64> = results.map(|n| n.distance_sq).collect();
        assert!(distances.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_nearest_n_zero_k() {
        let tree = scenario_tree();
        let results = tree.nearest_n(&[0.0, 0.0, 0.0], 0).unwrap();
        assert!(results.is_empty());
        assert!(results.is_exhausted());
    }

    #[test]
    fn test_nearest_single() {
        let tree = scenario_tree();
        let (point, distance_sq) = tree.nearest(&[4.0, 4.0, 6.0]).unwrap().unwrap();
        assert_eq!(*point.data(), "center");
        assert_eq!(distance_sq, 3.0);

        let empty: KdTree = KdTree::new(3).unwrap();
        assert!(empty.nearest(&[0.0, 0.0, 0.0]).unwrap().is_none());
    }

    #[test]
    fn test_range_scenario() {
        let tree = scenario_tree();
        let found: Vec<_> = tree
            .nearest_in_range(&[0.0, 0.0, 0.0], 9.0)
            .unwrap()
            .map(|n| *n.data())
            .collect();
        assert_eq!(found, vec!["origin"]);

        let found: Vec<_> = tree
            .nearest_in_range(&[0.0, 0.0, 0.0], 10.0)
            .unwrap()
            .map(|n| *n.data())
            .collect();
        assert_eq!(found.len(), 5);
        assert_eq!(found[0], "origin");
        assert_eq!(found[1], "center"); // 75 < 100
    }

    #[test]
    fn test_range_negative_or_nan_radius_is_empty() {
        let tree = scenario_tree();
        assert!(tree
            .nearest_in_range(&[0.0, 0.0, 0.0], -1.0)
            .unwrap()
            .is_empty());
        assert!(tree
            .nearest_in_range(&[0.0, 0.0, 0.0], f64::NAN)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_range_outside_bounds_is_empty() {
        let tree = scenario_tree();
        let results = tree.nearest_in_range(&[100.0, 100.0, 100.0], 50.0).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_queries_reject_wrong_dims() {
        let tree = scenario_tree();
        assert!(matches!(
            tree.nearest_n(&[0.0, 0.0], 1),
            Err(IndexError::InvalidDimension { .. })
        ));
        assert!(matches!(
            tree.nearest_in_range(&[0.0, 0.0, 0.0, 0.0], 1.0),
            Err(IndexError::InvalidDimension { .. })
        ));
    }

    #[test]
    fn test_empty_tree_queries() {
        let tree: KdTree = KdTree::new(3).unwrap();
        assert!(tree.nearest_n(&[0.0, 0.0, 0.0], 4).unwrap().is_empty());
        assert!(tree
            .nearest_in_range(&[0.0, 0.0, 0.0], 1e9)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_insert3_requires_three_dims() {
        let mut tree = KdTree::new(2).unwrap();
        assert!(tree.insert3(1.0, 2.0, 3.0, ()).is_err());
        assert!(tree.is_empty());
    }

    #[test]
    fn test_clear_and_reuse() {
        let mut tree = scenario_tree();
        tree.clear();
        assert!(tree.is_empty());
        assert!(tree.bounds().is_none());

        tree.insert3(1.0, 1.0, 1.0, "again").unwrap();
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.depth(), 1);
    }

    #[test]
    fn test_sorted_input_degrades_to_list() {
        let points = (0..2000).map(|i| Point::new([f64::from(i)], i));
        let tree = KdTree::from_points(1, points).unwrap();
        assert_eq!(tree.depth(), 2000);

        let results: Vec<_> = tree
            .nearest_n(&[1500.2], 2)
            .unwrap()
            .map(|n| *n.data())
            .collect();
        assert_eq!(results, vec![1500, 1501]);
    }

    #[test]
    fn test_nan_point_does_not_hide_nearest() {
        let mut tree = KdTree::new(3).unwrap();
        tree.insert3(f64::NAN, 0.0, 0.0, "nan").unwrap();
        tree.insert3(1.0, 1.0, 1.0, "real").unwrap();

        let results: Vec<_> = tree
            .nearest_n(&[1.0, 1.0, 1.0], 1)
            .unwrap()
            .map(|n| (*n.data(), n.distance_sq))
            .collect();
        assert_eq!(results, vec![("real", 0.0)]);

        let (point, distance_sq) = tree.nearest(&[1.0, 1.0, 1.0]).unwrap().unwrap();
        assert_eq!((*point.data(), distance_sq), ("real", 0.0));
    }

    /// Insert `lo..hi` median first, giving a perfectly balanced 1-d tree
    fn balanced_order(lo: u32, hi: u32, out: &mut Vec<u32>) {
        if lo >= hi {
            return;
        }
        let mid = lo + (hi - lo) / 2;
        out.push(mid);
        balanced_order(lo, mid, out);
        balanced_order(mid + 1, hi, out);
    }

    fn balanced_tree() -> KdTree<u32> {
        let mut order = Vec::new();
        balanced_order(0, 1024, &mut order);
        let points = order.into_iter().map(|i| Point::new([f64::from(i)], i));
        KdTree::from_points(1, points).unwrap()
    }

    #[test]
    fn test_search_prunes_balanced_tree() {
        let tree = balanced_tree();
        assert_eq!(tree.len(), 1024);
        assert_eq!(tree.depth(), 11);

        let mut nearest = NearestCollector::new(1, tree.len());
        let visited = search::traverse(&tree.nodes, 0, &[500.2], &mut nearest);
        assert!(visited < 32, "nearest visited {} nodes", visited);
        let found: Vec<_> = nearest.into_sorted().iter().map(|n| *n.data()).collect();
        assert_eq!(found, vec![500]);

        let mut range = RangeCollector::new(2.5 * 2.5);
        let visited = search::traverse(&tree.nodes, 0, &[500.2], &mut range);
        assert!(visited < 64, "range visited {} nodes", visited);
        let found: Vec<_> = range.into_sorted().iter().map(|n| *n.data()).collect();
        assert_eq!(found, vec![500, 501, 499, 502, 498]);
    }

    #[test]
    fn test_from_points_stops_at_first_bad_point() {
        let points = vec![
            Point::new(vec![0.0, 0.0], 0),
            Point::new(vec![1.0], 1),
        ];
        assert!(KdTree::from_points(2, points).is_err());
    }
}
