//! Points stored in the index

use serde::{Deserialize, Serialize};

/// A fixed-length coordinate vector with an attached payload
///
/// The payload defaults to `()` for plain coordinate clouds. Points are
/// immutable once built; the index hands out shared references only.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point<T = ()> {
    coords: Box<[f64]>,
    data: T,
}

impl<T> Point<T> {
    /// Create a point from its coordinates and payload
    pub fn new(coords: impl Into<Box<[f64]>>, data: T) -> Self {
        Self {
            coords: coords.into(),
            data,
        }
    }

    /// Coordinates, one per dimension
    pub fn coords(&self) -> &[f64] {
        &self.coords
    }

    /// The attached payload
    pub fn data(&self) -> &T {
        &self.data
    }

    /// Number of coordinates
    pub fn dims(&self) -> usize {
        self.coords.len()
    }

    /// Split the point back into coordinates and payload
    pub fn into_parts(self) -> (Box<[f64]>, T) {
        (self.coords, self.data)
    }
}

impl Point {
    /// Create a point without a payload
    pub fn from_coords(coords: impl Into<Box<[f64]>>) -> Self {
        Self::new(coords, ())
    }
}

impl<const N: usize> From<[f64; N]> for Point {
    fn from(coords: [f64; N]) -> Self {
        Self::from_coords(coords)
    }
}

/// Squared Euclidean distance between two coordinate slices
///
/// Only the common prefix is compared; callers check dimensionality first.
pub fn distance_sq(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}
