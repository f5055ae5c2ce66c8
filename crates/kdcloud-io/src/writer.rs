//! Legacy VTK point writer

use crate::reader::{IoError, IoResult};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write points as an ASCII `POLYDATA` file with one vertex cell per point
///
/// Missing parent directories are created.
pub fn write_points(path: impl AsRef<Path>, points: &[[f64; 3]]) -> IoResult<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let file = File::create(path)
        .map_err(|e| IoError::OpenFailed(format!("{}: {}", path.display(), e)))?;
    let mut writer = BufWriter::new(file);
    format_points(&mut writer, points)?;
    writer.flush()?;

    tracing::info!("Wrote {} points to {}", points.len(), path.display());
    Ok(())
}

/// Format points as legacy VTK text into any writer
pub fn format_points<W: Write>(mut writer: W, points: &[[f64; 3]]) -> IoResult<()> {
    let n = points.len();

    writeln!(writer, "# vtk DataFile Version 4.1")?;
    writeln!(writer, "vtk output")?;
    writeln!(writer, "ASCII")?;
    writeln!(writer, "DATASET POLYDATA")?;
    writeln!(writer, "POINTS {} float", n)?;
    for [x, y, z] in points {
        writeln!(writer, "{} {} {}", x, y, z)?;
    }
    writeln!(writer, "VERTICES {} {}", n, n * 2)?;
    for i in 0..n {
        writeln!(writer, "1 {}", i)?;
    }
    Ok(())
}
