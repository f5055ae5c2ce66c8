//! Error type for the query program

use kdcloud_core::IndexError;
use kdcloud_io::IoError;
use thiserror::Error;

use crate::config::ConfigError;

/// Any failure that stops a run
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Reading the input cloud or writing the result file
    #[error(transparent)]
    PointCloud(#[from] IoError),

    #[error("Index error: {0}")]
    Index(#[from] IndexError),

    /// Writing the report to the terminal
    #[error("Output error: {0}")]
    Output(#[from] std::io::Error),
}
