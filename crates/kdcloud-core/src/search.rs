//! Pruning traversal shared by the k-nearest and range queries
//!
//! The walk is depth-first, nearest side of each splitting plane first. A
//! `Collector` decides which visited points are admitted and whether the
//! far side of a plane can still hold anything it would admit.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::point::{distance_sq, Point};
use crate::result::Neighbor;
use crate::tree::{Node, NodeId};

/// Admission and pruning policy for one query
pub(crate) trait Collector<'a, T> {
    /// Offer a visited point at the given squared distance
    fn offer(&mut self, point: &'a Point<T>, distance_sq: f64);

    /// Whether a subtree whose splitting plane lies `plane_distance_sq` away
    /// may still contain an admissible point
    fn should_visit(&self, plane_distance_sq: f64) -> bool;

    /// Admitted points sorted ascending by squared distance
    fn into_sorted(self) -> Vec<Neighbor<'a, T>>;
}

/// Walk the subtree rooted at `root`, returning the number of nodes visited.
///
/// Uses an explicit stack so degenerate (list-shaped) trees built from
/// sorted input cannot overflow the call stack.
pub(crate) fn traverse<'a, T, C>(
    nodes: &'a [Node<T>],
    root: NodeId,
    target: &[f64],
    collector: &mut C,
) -> usize
where
    C: Collector<'a, T>,
{
    // `None` marks a near child, which is always entered
    let mut stack: Vec<(NodeId, Option<f64>)> = vec![(root, None)];
    let mut visited = 0;

    while let Some((id, plane_distance_sq)) = stack.pop() {
        if let Some(plane) = plane_distance_sq {
            if !collector.should_visit(plane) {
                continue;
            }
        }

        let node = &nodes[id];
        let coords = node.point.coords();
        collector.offer(&node.point, distance_sq(coords, target));
        visited += 1;

        let delta = target[node.axis] - coords[node.axis];
        let (near, far) = if delta < 0.0 {
            (node.left, node.right)
        } else {
            (node.right, node.left)
        };

        // Far first so the near side is popped (and fully explored) before it
        if let Some(far) = far {
            stack.push((far, Some(delta * delta)));
        }
        if let Some(near) = near {
            stack.push((near, None));
        }
    }

    visited
}

/// Heap entry for the k-nearest search.
///
/// Ordered by distance, then by discovery order, so the heap top is the
/// current worst candidate and among equal distances the later one is worse.
struct Candidate<'a, T> {
    point: &'a Point<T>,
    distance_sq: f64,
    seq: usize,
}

impl<T> PartialEq for Candidate<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T> Eq for Candidate<'_, T> {}

impl<T> PartialOrd for Candidate<'_, T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Candidate<'_, T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.distance_sq
            .total_cmp(&other.distance_sq)
            .then(self.seq.cmp(&other.seq))
    }
}

/// Bounded max-heap keeping the `k` closest points seen so far
pub(crate) struct NearestCollector<'a, T> {
    heap: BinaryHeap<Candidate<'a, T>>,
    capacity: usize,
    seq: usize,
}

impl<'a, T> NearestCollector<'a, T> {
    pub(crate) fn new(capacity: usize, expected: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(capacity.min(expected)),
            capacity,
            seq: 0,
        }
    }

    fn worst_distance_sq(&self) -> Option<f64> {
        self.heap.peek().map(|c| c.distance_sq)
    }
}

impl<'a, T> Collector<'a, T> for NearestCollector<'a, T> {
    fn offer(&mut self, point: &'a Point<T>, distance_sq: f64) {
        // A NaN of either sign must rank after every real distance
        let distance_sq = if distance_sq.is_nan() {
            f64::NAN
        } else {
            distance_sq
        };
        let candidate = Candidate {
            point,
            distance_sq,
            seq: self.seq,
        };
        self.seq += 1;

        if self.heap.len() < self.capacity {
            self.heap.push(candidate);
        } else if let Some(mut worst) = self.heap.peek_mut() {
            // Strictly smaller only: the earlier of two equal candidates stays
            if distance_sq.total_cmp(&worst.distance_sq).is_lt() {
                *worst = candidate;
            }
        }
    }

    fn should_visit(&self, plane_distance_sq: f64) -> bool {
        if self.heap.len() < self.capacity {
            return true;
        }
        match self.worst_distance_sq() {
            // Unordered (NaN) comparisons keep the subtree open
            Some(worst) => !matches!(
                plane_distance_sq.partial_cmp(&worst),
                Some(Ordering::Equal | Ordering::Greater)
            ),
            None => false,
        }
    }

    fn into_sorted(self) -> Vec<Neighbor<'a, T>> {
        self.heap
            .into_sorted_vec()
            .into_iter()
            .map(|c| Neighbor {
                point: c.point,
                distance_sq: c.distance_sq,
            })
            .collect()
    }
}

/// Unbounded collector admitting every point within a radius
pub(crate) struct RangeCollector<'a, T> {
    found: Vec<Neighbor<'a, T>>,
    radius_sq: f64,
}

impl<'a, T> RangeCollector<'a, T> {
    pub(crate) fn new(radius_sq: f64) -> Self {
        Self {
            found: Vec::new(),
            radius_sq,
        }
    }
}

impl<'a, T> Collector<'a, T> for RangeCollector<'a, T> {
    fn offer(&mut self, point: &'a Point<T>, distance_sq: f64) {
        if distance_sq <= self.radius_sq {
            self.found.push(Neighbor { point, distance_sq });
        }
    }

    fn should_visit(&self, plane_distance_sq: f64) -> bool {
        plane_distance_sq <= self.radius_sq
    }

    fn into_sorted(mut self) -> Vec<Neighbor<'a, T>> {
        // Stable sort keeps discovery order among equal distances
        self.found
            .sort_by(|a, b| a.distance_sq.total_cmp(&b.distance_sq));
        self.found
    }
}
