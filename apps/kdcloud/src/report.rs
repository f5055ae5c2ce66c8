//! Terminal report of the cloud and the query results

use kdcloud_core::{IndexError, ResultSet};
use std::io::{self, Write};

use crate::error::AppError;

/// Print every point of the input cloud
pub fn print_cloud<W: Write>(out: &mut W, points: &[[f64; 3]]) -> io::Result<()> {
    for (i, [x, y, z]) in points.iter().enumerate() {
        writeln!(out, "Point {} = ({}, {}, {})", i, x, y, z)?;
    }
    Ok(())
}

/// Drain a 3-d result set, printing each entry, and return the found points
/// in result order
pub fn print_results<W: Write, T>(
    out: &mut W,
    mut results: ResultSet<'_, T>,
) -> Result<Vec<[f64; 3]>, AppError> {
    writeln!(out, "found {} results:", results.len())?;

    let mut found = Vec::with_capacity(results.len());
    while !results.is_exhausted() {
        let (point, distance_sq) = results.current()?;
        let [x, y, z] = <[f64; 3]>::try_from(point.coords())
            .map_err(|_| IndexError::dimension_mismatch(3, point.dims()))?;

        writeln!(
            out,
            "node at ({:.3}, {:.3}, {:.3}) is {:.3} away",
            x,
            y,
            z,
            distance_sq.sqrt()
        )?;
        found.push([x, y, z]);

        results.advance();
    }
    Ok(found)
}
