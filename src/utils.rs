//! Utility functions for buffer conversion and argument parsing.

pub mod safe_cast;

use crate::{Error, Result};
use nalgebra::Vector3;

/// Parse a comma separated `x,y,z` triple, as given on the command line
///
/// # Errors
///
/// Returns an error if there are not exactly three numeric components
pub fn parse_vector3(text: &str) -> Result<Vector3<f32>> {
    let values = text
        .split(',')
        .map(|part| {
            part.trim()
                .parse::<f32>()
                .map_err(|e| Error::InvalidInput(format!("Invalid component '{part}' in '{text}': {e}")))
        })
        .collect::<Result<Vec<f32>>>()?;

    match values.as_slice() {
        [x, y, z] => Ok(Vector3::new(*x, *y, *z)),
        _ => Err(Error::InvalidInput(format!(
            "Expected 3 comma separated values, got {} in '{text}'",
            values.len()
        ))),
    }
}
