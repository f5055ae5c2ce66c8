//! Command-line arguments

use clap::Parser;
use std::path::PathBuf;

use crate::config::{ConfigError, QueryConfig, QueryMode};

/// Nearest-neighbor queries over a legacy VTK point cloud
#[derive(Debug, Parser)]
#[command(name = "kdcloud", version, about)]
pub struct Cli {
    /// Input file with the surface cloud of points in legacy VTK format
    pub input: PathBuf,

    /// TOML file with query settings; flags below override it
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Query target
    #[arg(
        long,
        num_args = 3,
        value_names = ["X", "Y", "Z"],
        allow_negative_numbers = true
    )]
    pub target: Option<Vec<f64>>,

    /// Find the N nearest points
    #[arg(short = 'k', long, value_name = "N", conflicts_with = "radius")]
    pub nearest: Option<usize>,

    /// Find every point within this distance of the target
    #[arg(short, long, value_name = "R", allow_negative_numbers = true)]
    pub radius: Option<f64>,

    /// Output VTK file for the found points
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Print every input point before querying
    #[arg(long)]
    pub print_cloud: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Load the config file (if any), apply flag overrides, and validate
    pub fn resolve_config(&self) -> Result<QueryConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => QueryConfig::load(path)?,
            None => QueryConfig::default(),
        };

        if let Some(&[x, y, z]) = self.target.as_deref() {
            config.target = [x, y, z];
        }
        if let Some(k) = self.nearest {
            config.query = QueryMode::Nearest { k };
        }
        if let Some(radius) = self.radius {
            config.query = QueryMode::Range { radius };
        }
        if let Some(output) = &self.output {
            config.output = output.clone();
        }
        config.print_cloud |= self.print_cloud;

        config.validate()?;
        Ok(config)
    }
}
