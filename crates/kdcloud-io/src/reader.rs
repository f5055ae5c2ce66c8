//! Legacy VTK point reader

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during point cloud I/O
#[derive(Debug, Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Failed to open file: {0}")]
    OpenFailed(String),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for IoError {
    fn from(err: std::io::Error) -> Self {
        IoError::Io(err.to_string())
    }
}

/// Result type for I/O operations
pub type IoResult<T> = Result<T, IoError>;

/// Points read from a VTK file, in file order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PointCloud {
    /// Coordinate triples
    pub points: Vec<[f64; 3]>,

    /// Type tag from the `POINTS` line (`float`, `double`, ...)
    pub data_type: String,
}

impl PointCloud {
    /// Create a point cloud
    pub fn new(points: Vec<[f64; 3]>, data_type: impl Into<String>) -> Self {
        Self {
            points,
            data_type: data_type.into(),
        }
    }

    /// Number of points
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the cloud has no points
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Read the point section of a legacy VTK file
pub fn read_points(path: impl AsRef<Path>) -> IoResult<PointCloud> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(IoError::FileNotFound(path.display().to_string()));
    }

    let file = File::open(path)
        .map_err(|e| IoError::OpenFailed(format!("{}: {}", path.display(), e)))?;
    let cloud = parse_points(BufReader::new(file))?;

    tracing::info!(
        "Read {} points ({}) from {}",
        cloud.len(),
        cloud.data_type,
        path.display()
    );
    Ok(cloud)
}

/// Parse the point section of legacy VTK text from any reader
pub fn parse_points<R: Read>(mut reader: R) -> IoResult<PointCloud> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    parse_str(&text)
}

/// Strip the version, title and format lines, rejecting binary files
fn skip_header(text: &str) -> IoResult<&str> {
    if !text.starts_with("# vtk") {
        return Ok(text);
    }

    let mut lines = text.splitn(4, '\n');
    let format = lines.nth(2).map(str::trim).unwrap_or_default();
    if format.eq_ignore_ascii_case("BINARY") {
        return Err(IoError::InvalidFormat(
            "binary VTK files are not supported".to_string(),
        ));
    }
    Ok(lines.next().unwrap_or_default())
}

fn parse_str(text: &str) -> IoResult<PointCloud> {
    let mut tokens = skip_header(text)?.split_whitespace();

    loop {
        match tokens.next() {
            Some("POINTS") => break,
            Some(_) => continue,
            None => {
                return Err(IoError::InvalidFormat(
                    "no POINTS section found".to_string(),
                ))
            }
        }
    }

    let count_token = tokens
        .next()
        .ok_or_else(|| IoError::InvalidFormat("POINTS is missing its count".to_string()))?;
    let count: usize = count_token.parse().map_err(|_| {
        IoError::InvalidFormat(format!("invalid point count '{}'", count_token))
    })?;

    let data_type = tokens
        .next()
        .ok_or_else(|| IoError::InvalidFormat("POINTS is missing its data type".to_string()))?
        .to_string();
    if !matches!(data_type.as_str(), "float" | "double") {
        tracing::warn!("Unexpected POINTS data type '{}', reading as double", data_type);
    }

    // A triple takes at least six bytes ("0 0 0\n"), so a bogus count cannot
    // force a huge allocation.
    let mut points = Vec::with_capacity(count.min(text.len() / 6));
    for i in 0..count {
        let mut point = [0.0; 3];
        for (axis, value) in point.iter_mut().enumerate() {
            let token = tokens.next().ok_or_else(|| {
                IoError::InvalidFormat(format!(
                    "expected {} points, data ends at point {}",
                    count, i
                ))
            })?;
            *value = token
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| {
                    IoError::InvalidFormat(format!(
                        "invalid coordinate '{}' (point {}, axis {})",
                        token, i, axis
                    ))
                })?;
        }
        points.push(point);
    }

    Ok(PointCloud { points, data_type })
}
