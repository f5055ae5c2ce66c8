//! kdcloud-io - Point cloud I/O
//!
//! Reads and writes 3-d point clouds in the ASCII legacy VTK format:
//!
//! - **Reader**: scans for the `POINTS <count> <type>` section and parses
//!   exactly `count` coordinate triples, all-or-nothing
//! - **Writer**: emits a `POLYDATA` file with one vertex cell per point
//!
//! Everything else in a VTK file (cells, point data, field data) is ignored.

pub mod reader;
pub mod writer;

pub use reader::*;
pub use writer::*;
