//! Query configuration
//!
//! Settings come from an optional TOML file; command-line flags override
//! individual fields afterwards (see `cli`).

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default query target
pub const DEFAULT_TARGET: [f64; 3] = [19234.4, 19886.0, 15900.9];

/// Default number of neighbors for a nearest query
pub const DEFAULT_K: usize = 40;

/// Default output file
pub const DEFAULT_OUTPUT: &str = "outputs/nearest_points.vtk";

/// Which query to run against the cloud
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum QueryMode {
    /// The `k` closest points
    Nearest { k: usize },
    /// Every point within `radius`
    Range { radius: f64 },
}

impl Default for QueryMode {
    fn default() -> Self {
        QueryMode::Nearest { k: DEFAULT_K }
    }
}

/// Settings for one run of the query program
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// Point to search around
    pub target: [f64; 3],
    /// Where to write the found points
    pub output: PathBuf,
    /// Print every input point before querying
    pub print_cloud: bool,
    /// Query kind and its parameter; kept last since it serializes as a table
    pub query: QueryMode,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            target: DEFAULT_TARGET,
            output: PathBuf::from(DEFAULT_OUTPUT),
            print_cloud: false,
            query: QueryMode::default(),
        }
    }
}

impl QueryConfig {
    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Serialize configuration to TOML
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let config = Self::from_toml(&text)?;
        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.target.iter().any(|c| !c.is_finite()) {
            return Err(ConfigError::OutOfRange(
                "target coordinates must be finite".to_string(),
            ));
        }

        if let QueryMode::Range { radius } = self.query {
            if !radius.is_finite() || radius < 0.0 {
                return Err(ConfigError::OutOfRange(format!(
                    "radius must be a finite non-negative number, got {}",
                    radius
                )));
            }
        }

        Ok(())
    }
}

/// Configuration loading or validation error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read
    #[error("Cannot read config file {}: {message}", .path.display())]
    Read { path: PathBuf, message: String },

    /// The configuration file is not valid TOML for `QueryConfig`
    #[error("Invalid config: {0}")]
    Parse(String),

    /// Value is out of valid range
    #[error("Value out of range: {0}")]
    OutOfRange(String),
}
