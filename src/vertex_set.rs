//! Index-addressed 3D vertex sets and the fixed face-model topology they share.
//!
//! Every vertex set in the pipeline (tracked faces, the mean face, deformed
//! output) uses the same topology: index `j` is the same anatomical point in
//! all of them, and region tables refer to those indices directly.

use crate::{
    constants::{FACE_MODEL_TOPOLOGY, FACE_MODEL_VERTEX_COUNT, MEAN_FACE_DELIMITER, VERTEX_COMPONENTS},
    Error, Result,
};
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Identifier of a fixed mesh topology
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaceTopology {
    /// Human readable model name
    pub name: String,
    /// Number of vertices in every set of this topology
    pub vertex_count: usize,
}

impl FaceTopology {
    /// Create a topology identifier
    pub fn new(name: impl Into<String>, vertex_count: usize) -> Self {
        Self {
            name: name.into(),
            vertex_count,
        }
    }

    /// The tracker's 357-vertex face model
    #[must_use]
    pub fn candide() -> Self {
        Self::new(FACE_MODEL_TOPOLOGY, FACE_MODEL_VERTEX_COUNT)
    }

    /// Check that a set has the vertex count this topology requires
    ///
    /// # Errors
    ///
    /// Returns `TopologyMismatch` when the counts differ
    pub fn check(&self, actual: usize) -> Result<()> {
        if actual == self.vertex_count {
            Ok(())
        } else {
            Err(Error::TopologyMismatch {
                topology: self.name.clone(),
                expected: self.vertex_count,
                actual,
            })
        }
    }
}

impl Default for FaceTopology {
    fn default() -> Self {
        Self::candide()
    }
}

/// Ordered, index-addressed set of 3D points
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VertexSet {
    points: Vec<Vector3<f32>>,
}

impl VertexSet {
    pub fn new(points: Vec<Vector3<f32>>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn as_slice(&self) -> &[Vector3<f32>] {
        &self.points
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Vector3<f32>> {
        self.points.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Vector3<f32>> {
        self.points.iter_mut()
    }

    pub fn into_inner(self) -> Vec<Vector3<f32>> {
        self.points
    }

    /// Decode a flat tracker buffer of `[x0, y0, z0, x1, y1, z1, ...]`.
    ///
    /// # Errors
    ///
    /// Returns an error if the buffer length is not a multiple of 3
    pub fn from_flat(buffer: &[f32]) -> Result<Self> {
        if buffer.len() % VERTEX_COMPONENTS != 0 {
            return Err(Error::InvalidInput(format!(
                "Vertex buffer length {} is not a multiple of {VERTEX_COMPONENTS}",
                buffer.len()
            )));
        }

        let points = buffer
            .chunks_exact(VERTEX_COMPONENTS)
            .map(|c| Vector3::new(c[0], c[1], c[2]))
            .collect();
        Ok(Self { points })
    }

    /// Flatten to `[x0, y0, z0, x1, y1, z1, ...]`
    pub fn to_flat(&self) -> Vec<f32> {
        let mut v = Vec::with_capacity(self.points.len() * VERTEX_COMPONENTS);
        for p in &self.points {
            v.extend_from_slice(&[p.x, p.y, p.z]);
        }
        v
    }

    /// Parse the `x;y;z` per-line text format.
    ///
    /// Blank lines and a leading byte-order mark are skipped; every other
    /// line must hold exactly three `.`-decimal numbers.
    ///
    /// # Errors
    ///
    /// Returns `Resource` naming the first line that does not parse
    pub fn parse_delimited(content: &str) -> Result<Self> {
        let points = parse_vertex_lines(content.lines().map(Ok))?;
        Ok(Self { points })
    }

    /// Render in the `x;y;z` per-line text format
    pub fn to_delimited(&self) -> String {
        self.points
            .iter()
            .map(|p| format!("{}{d}{}{d}{}\n", p.x, p.y, p.z, d = MEAN_FACE_DELIMITER))
            .collect()
    }
}

/// Parse `x;y;z` lines in order, skipping blank lines.
///
/// A UTF-8 byte-order mark at the start of the first line is dropped.
/// Line numbers in errors are 1-based and count skipped lines.
pub(crate) fn parse_vertex_lines<I, S>(lines: I) -> Result<Vec<Vector3<f32>>>
where
    I: IntoIterator<Item = Result<S>>,
    S: AsRef<str>,
{
    let mut points = Vec::new();
    for (line_no, line) in lines.into_iter().enumerate() {
        let line = line?;
        let mut text = line.as_ref();
        if line_no == 0 {
            text = text.strip_prefix('\u{feff}').unwrap_or(text);
        }
        if text.trim().is_empty() {
            continue;
        }
        points.push(parse_vertex_line(text, line_no + 1)?);
    }
    Ok(points)
}

/// Parse a single `x;y;z` line
fn parse_vertex_line(line: &str, line_no: usize) -> Result<Vector3<f32>> {
    let fields: Vec<&str> = line.split(MEAN_FACE_DELIMITER).map(str::trim).collect();
    if fields.len() != VERTEX_COMPONENTS {
        return Err(Error::Resource(format!(
            "line {line_no}: expected {VERTEX_COMPONENTS} fields, got {}",
            fields.len()
        )));
    }

    let mut values = [0.0_f32; VERTEX_COMPONENTS];
    for (value, field) in values.iter_mut().zip(&fields) {
        *value = field
            .parse::<f32>()
            .map_err(|e| Error::Resource(format!("line {line_no}: invalid number '{field}': {e}")))?;
    }

    Ok(Vector3::new(values[0], values[1], values[2]))
}

impl From<Vec<Vector3<f32>>> for VertexSet {
    fn from(points: Vec<Vector3<f32>>) -> Self {
        Self { points }
    }
}

impl FromIterator<Vector3<f32>> for VertexSet {
    fn from_iter<I: IntoIterator<Item = Vector3<f32>>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}

impl std::ops::Index<usize> for VertexSet {
    type Output = Vector3<f32>;

    fn index(&self, idx: usize) -> &Self::Output {
        &self.points[idx]
    }
}

impl std::ops::IndexMut<usize> for VertexSet {
    fn index_mut(&mut self, idx: usize) -> &mut Self::Output {
        &mut self.points[idx]
    }
}
