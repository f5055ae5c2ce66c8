//! Query results
//!
//! A `ResultSet` holds the entries found by one query, sorted ascending by
//! squared distance, and a forward-only cursor over them. It borrows the
//! points from the index, so the index cannot be mutated while a result set
//! is alive. Re-issue the query to start over.

use crate::error::{IndexError, IndexResult};
use crate::point::Point;

/// One point found by a query together with its squared distance to the target
#[derive(Debug)]
pub struct Neighbor<'a, T> {
    pub point: &'a Point<T>,
    pub distance_sq: f64,
}

// Manual impls: a derive would require `T: Clone`.
impl<T> Clone for Neighbor<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Neighbor<'_, T> {}

impl<'a, T> Neighbor<'a, T> {
    /// Euclidean distance to the query target
    pub fn distance(&self) -> f64 {
        self.distance_sq.sqrt()
    }

    /// Coordinates of the found point
    pub fn coords(&self) -> &'a [f64] {
        self.point.coords()
    }

    /// Payload of the found point
    pub fn data(&self) -> &'a T {
        self.point.data()
    }
}

/// Distance-sorted query results with a single-pass cursor
#[derive(Debug)]
pub struct ResultSet<'a, T> {
    entries: Vec<Neighbor<'a, T>>,
    cursor: usize,
}

impl<'a, T> ResultSet<'a, T> {
    /// Entries must already be sorted ascending by squared distance
    pub(crate) fn new(entries: Vec<Neighbor<'a, T>>) -> Self {
        Self { entries, cursor: 0 }
    }

    pub(crate) fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Total number of entries, independent of the cursor position
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the query found nothing
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True once the cursor has moved past the last entry
    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.entries.len()
    }

    /// The entry under the cursor as `(point, squared distance)`
    pub fn current(&self) -> IndexResult<(&'a Point<T>, f64)> {
        self.entries
            .get(self.cursor)
            .map(|n| (n.point, n.distance_sq))
            .ok_or(IndexError::CursorExhausted)
    }

    /// Move the cursor forward by one; does nothing once exhausted
    pub fn advance(&mut self) {
        if !self.is_exhausted() {
            self.cursor += 1;
        }
    }

    /// Entries not yet consumed by the cursor
    pub fn remaining(&self) -> &[Neighbor<'a, T>] {
        &self.entries[self.cursor.min(self.entries.len())..]
    }
}

impl<'a, T> Iterator for ResultSet<'a, T> {
    type Item = Neighbor<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        let neighbor = self.entries.get(self.cursor).copied()?;
        self.cursor += 1;
        Some(neighbor)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining().len();
        (n, Some(n))
    }
}

impl<T> ExactSizeIterator for ResultSet<'_, T> {}
