//! kdcloud - nearest-neighbor queries over a VTK point cloud
//!
//! Reads a surface cloud of points, builds a 3-d `KdTree` over it, runs one
//! k-nearest or range query around a target, prints the results and writes
//! the found points back out as VTK.

pub mod cli;
pub mod config;
pub mod error;
pub mod report;

pub use cli::Cli;
pub use config::{ConfigError, QueryConfig, QueryMode};
pub use error::AppError;

use kdcloud_core::{KdTree, Point};
use std::io::Write;
use std::path::{Path, PathBuf};

/// What a successful run did
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    /// Points read from the input
    pub cloud_size: usize,
    /// Points returned by the query
    pub found: usize,
    /// File the found points were written to
    pub output: PathBuf,
}

/// Run one query over the cloud in `input`, reporting to `out`
///
/// The input is parsed completely before any index is built, so a malformed
/// file never produces a partial result.
pub fn run<W: Write>(
    config: &QueryConfig,
    input: &Path,
    out: &mut W,
) -> Result<RunSummary, AppError> {
    let cloud = kdcloud_io::read_points(input)?;
    if config.print_cloud {
        report::print_cloud(out, &cloud.points)?;
    }

    // Payload is the point's position in the input file
    let points = cloud
        .points
        .iter()
        .enumerate()
        .map(|(i, p)| Point::new(*p, i));
    let tree = KdTree::from_points(3, points)?;
    tracing::info!("Indexed {} points, tree depth {}", tree.len(), tree.depth());

    let results = match config.query {
        QueryMode::Nearest { k } => {
            tracing::debug!("Searching {} nearest points to {:?}", k, config.target);
            tree.nearest_n(&config.target, k)?
        }
        QueryMode::Range { radius } => {
            tracing::debug!("Searching points within {} of {:?}", radius, config.target);
            tree.nearest_in_range(&config.target, radius)?
        }
    };

    let found = report::print_results(out, results)?;
    kdcloud_io::write_points(&config.output, &found)?;

    Ok(RunSummary {
        cloud_size: cloud.len(),
        found: found.len(),
        output: config.output.clone(),
    })
}
