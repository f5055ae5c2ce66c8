//! kdcloud-core - k-d tree spatial index for point clouds
//!
//! This crate provides an exact nearest-neighbor index over points of a
//! fixed dimensionality:
//!
//! - **KdTree**: incremental insertion, no rebalancing
//! - **k-nearest**: the `k` points closest to a target
//! - **Range**: every point within a radius of a target
//! - **ResultSet**: distance-sorted results with a forward cursor
//!
//! # Example
//!
//! ```
//! use kdcloud_core::{KdTree, Point};
//!
//! let mut tree = KdTree::new(3).unwrap();
//! tree.insert(Point::new([0.0, 0.0, 0.0], "origin")).unwrap();
//! tree.insert(Point::new([10.0, 0.0, 0.0], "far")).unwrap();
//!
//! let mut results = tree.nearest_n(&[1.0, 0.0, 0.0], 1).unwrap();
//! let (point, distance_sq) = results.current().unwrap();
//! assert_eq!(*point.data(), "origin");
//! assert_eq!(distance_sq, 1.0);
//! results.advance();
//! assert!(results.is_exhausted());
//! ```

pub mod bounds;
pub mod error;
pub mod point;
pub mod result;
mod search;
pub mod tree;

pub use bounds::Bounds;
pub use error::{IndexError, IndexResult};
pub use point::{distance_sq, Point};
pub use result::{Neighbor, ResultSet};
pub use tree::KdTree;
