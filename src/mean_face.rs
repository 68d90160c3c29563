//! Mean-face reference store.
//!
//! The mean face is the canonical face geometry every tracked face is
//! measured against. It is loaded once at startup and shared read-only.

use crate::{
    vertex_set::{parse_vertex_lines, FaceTopology, VertexSet},
    Error, Result,
};
use nalgebra::Vector3;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Immutable reference vertex set
#[derive(Debug, Clone, PartialEq)]
pub struct MeanFaceReference {
    vertices: VertexSet,
    topology: FaceTopology,
}

impl MeanFaceReference {
    /// Load the mean face from an `x;y;z` per-line text file.
    ///
    /// The resulting length is the number of vertex lines in the file. Blank
    /// lines and a leading UTF-8 byte-order mark are ignored.
    ///
    /// # Errors
    ///
    /// Returns `Resource` if the file cannot be opened or read, or if any
    /// line does not hold exactly three numbers
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        log::info!("Loading mean face from {}", path.display());

        let file = File::open(path)
            .map_err(|e| Error::Resource(format!("cannot open mean face {}: {e}", path.display())))?;
        let reader = BufReader::new(file);

        let points = parse_vertex_lines(reader.lines().map(|line| {
            line.map_err(|e| Error::Resource(format!("cannot read mean face {}: {e}", path.display())))
        }))?;

        let reference = Self::from_points(points);
        log::info!("Loaded mean face with {} vertices", reference.len());
        Ok(reference)
    }

    /// Load the mean face and check it against the expected topology
    ///
    /// # Errors
    ///
    /// Returns `Resource` as [`MeanFaceReference::load`] does, or
    /// `TopologyMismatch` if the vertex count differs from the topology's
    pub fn load_with_topology<P: AsRef<Path>>(path: P, topology: &FaceTopology) -> Result<Self> {
        let loaded = Self::load(path)?;
        topology.check(loaded.len())?;
        Ok(Self {
            vertices: loaded.vertices,
            topology: topology.clone(),
        })
    }

    /// Parse a mean face from in-memory text, with the same rules as `load`
    ///
    /// # Errors
    ///
    /// Returns `Resource` if any line is malformed
    pub fn parse(content: &str) -> Result<Self> {
        let vertices = VertexSet::parse_delimited(content)?;
        Ok(Self::from_vertices(vertices))
    }

    /// Wrap an existing vertex set
    pub fn from_vertices(vertices: VertexSet) -> Self {
        let topology = FaceTopology::new("mean-face", vertices.len());
        Self { vertices, topology }
    }

    fn from_points(points: Vec<Vector3<f32>>) -> Self {
        Self::from_vertices(VertexSet::new(points))
    }

    pub fn vertices(&self) -> &VertexSet {
        &self.vertices
    }

    pub fn topology(&self) -> &FaceTopology {
        &self.topology
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

impl std::ops::Index<usize> for MeanFaceReference {
    type Output = Vector3<f32>;

    fn index(&self, idx: usize) -> &Self::Output {
        &self.vertices[idx]
    }
}
