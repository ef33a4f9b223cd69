//! CSV import and export of point configurations
//!
//! Files hold one point per row under an `x,y` header.

use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use crate::io::error::{ReconstructionError, Result, at_path, invalid_pattern};
use crate::spatial::pattern::{Point, PointConfiguration};
use crate::spatial::window::Window;

/// Parse points from CSV text
///
/// Uses `window` when given, otherwise the bounding box of the points.
///
/// # Errors
///
/// Returns an error if a row is malformed, a coordinate is not finite, or no
/// window is given and the points do not span a rectangle with positive area
pub fn parse_pattern<R: Read>(reader: R, window: Option<Window>) -> Result<PointConfiguration> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let mut points = Vec::new();
    for record in csv_reader.deserialize::<Point>() {
        let point = record?;
        if !point.x.is_finite() || !point.y.is_finite() {
            return Err(invalid_pattern(&format!(
                "point {} has a non-finite coordinate",
                points.len() + 1
            )));
        }
        points.push(point);
    }

    let window = match window {
        Some(window) => window,
        None => Window::bounding(&points)?,
    };
    Ok(PointConfiguration::new(window, points))
}

/// Read a point pattern from a CSV file
///
/// # Errors
///
/// Returns an error if the file cannot be opened or parsed (see
/// [`parse_pattern`])
pub fn read_pattern(path: &Path, window: Option<Window>) -> Result<PointConfiguration> {
    let file = fs::File::open(path).map_err(|source| ReconstructionError::FileSystem {
        path: path.to_path_buf(),
        operation: "open pattern",
        source,
    })?;
    parse_pattern(file, window).map_err(|error| at_path(error, path))
}

/// Write a configuration's points as CSV
///
/// # Errors
///
/// Returns an error if writing to `writer` fails
pub fn write_points<W: Write>(writer: W, configuration: &PointConfiguration) -> Result<()> {
    let export_error = |reason: String| ReconstructionError::Export {
        path: PathBuf::from("<unknown>"),
        reason,
    };
    let mut csv_writer = csv::Writer::from_writer(writer);
    for point in configuration.points() {
        csv_writer
            .serialize(point)
            .map_err(|error| export_error(error.to_string()))?;
    }
    csv_writer
        .flush()
        .map_err(|error| export_error(error.to_string()))
}

/// Write a configuration to a CSV file, creating parent directories
///
/// # Errors
///
/// Returns an error if the directory or file cannot be created or written
pub fn write_pattern(path: &Path, configuration: &PointConfiguration) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| ReconstructionError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create output directory",
                source,
            })?;
        }
    }
    let file = fs::File::create(path).map_err(|source| ReconstructionError::FileSystem {
        path: path.to_path_buf(),
        operation: "create pattern file",
        source,
    })?;
    write_points(file, configuration).map_err(|error| at_path(error, path))
}
