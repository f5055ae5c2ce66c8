//! Axis-aligned hyper-rectangle covering the indexed points

use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box in any number of dimensions
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Vec<f64>,
    pub max: Vec<f64>,
}

impl Bounds {
    /// Create a bounding box from min/max corners
    pub fn new(min: Vec<f64>, max: Vec<f64>) -> Self {
        Self { min, max }
    }

    /// Create a degenerate bounding box around a single point
    pub fn from_point(point: &[f64]) -> Self {
        Self {
            min: point.to_vec(),
            max: point.to_vec(),
        }
    }

    /// Number of dimensions
    pub fn dims(&self) -> usize {
        self.min.len()
    }

    /// Expand to include a point
    pub fn expand_to_include(&mut self, point: &[f64]) {
        for (i, &p) in point.iter().enumerate() {
            self.min[i] = self.min[i].min(p);
            self.max[i] = self.max[i].max(p);
        }
    }

    /// Check if a point is contained (boundary inclusive)
    pub fn contains_point(&self, point: &[f64]) -> bool {
        point
            .iter()
            .enumerate()
            .all(|(i, &p)| p >= self.min[i] && p <= self.max[i])
    }

    /// Squared distance from a point to the nearest point on the box
    pub fn distance_sq_to_point(&self, point: &[f64]) -> f64 {
        let mut dist_sq = 0.0;
        for (i, &p) in point.iter().enumerate() {
            if p < self.min[i] {
                dist_sq += (self.min[i] - p).powi(2);
            } else if p > self.max[i] {
                dist_sq += (p - self.max[i]).powi(2);
            }
        }
        dist_sq
    }
}
