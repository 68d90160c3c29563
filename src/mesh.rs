//! Hand-off of a deformed face to the mesh renderer.
//!
//! Rendering is external; this module only bundles what the renderer needs
//! and checks that the pieces agree with each other.

use crate::{
    emphasis::EmphasisMode,
    utils::safe_cast::usize_to_i32,
    vertex_set::VertexSet,
    Error, Result,
};
use nalgebra::Vector2;

/// Where a frame's texture coordinates come from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UvSource {
    /// Per-frame coordinates from the tracker, mapping the camera image
    Engine,
    /// Static coordinates for the mask texture
    Static,
}

impl UvSource {
    #[must_use]
    pub const fn for_mode(mode: EmphasisMode) -> Self {
        match mode {
            EmphasisMode::RealTexture => Self::Engine,
            EmphasisMode::None | EmphasisMode::Normal | EmphasisMode::Caricature => Self::Static,
        }
    }
}

/// Pick the texture coordinate set for a mode
///
/// # Errors
///
/// Returns an error if the mode needs engine coordinates and none were supplied
pub fn select_uvs<'a>(
    mode: EmphasisMode,
    engine: Option<&'a [Vector2<f32>]>,
    fallback: &'a [Vector2<f32>],
) -> Result<(UvSource, &'a [Vector2<f32>])> {
    match UvSource::for_mode(mode) {
        UvSource::Engine => engine
            .map(|uvs| (UvSource::Engine, uvs))
            .ok_or_else(|| Error::InvalidInput("Engine texture coordinates required for real texture mode".to_string())),
        UvSource::Static => Ok((UvSource::Static, fallback)),
    }
}

/// Everything the renderer needs to draw one face
#[derive(Debug, Clone, PartialEq)]
pub struct MeshFrame {
    pub vertices: VertexSet,
    pub triangles: Vec<[usize; 3]>,
    pub uvs: Vec<Vector2<f32>>,
    pub uv_source: UvSource,
}

impl MeshFrame {
    /// Bundle a deformed vertex set with its triangles and texture coordinates.
    ///
    /// Extra texture coordinates beyond the vertex count are dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if a triangle references a missing vertex or if there
    /// are fewer texture coordinates than vertices
    pub fn assemble(
        vertices: VertexSet,
        triangles: Vec<[usize; 3]>,
        uvs: &[Vector2<f32>],
        uv_source: UvSource,
    ) -> Result<Self> {
        let vertex_count = vertices.len();

        if let Some(bad) = triangles.iter().flatten().find(|&&i| i >= vertex_count) {
            return Err(Error::InvalidInput(format!(
                "Triangle references vertex {bad}, but the mesh has {vertex_count} vertices"
            )));
        }

        let uvs = uvs.get(..vertex_count).ok_or_else(|| {
            Error::InvalidInput(format!(
                "Mesh has {vertex_count} vertices but only {} texture coordinates",
                uvs.len()
            ))
        })?;

        Ok(Self {
            vertices,
            triangles,
            uvs: uvs.to_vec(),
            uv_source,
        })
    }

    /// Flat i32 triangle buffer in the tracker's layout
    ///
    /// # Errors
    ///
    /// Returns an error if an index does not fit in i32
    pub fn flat_triangles(&self) -> Result<Vec<i32>> {
        self.triangles
            .iter()
            .flatten()
            .map(|&i| usize_to_i32(i))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;

    fn quad() -> VertexSet {
        VertexSet::new(vec![
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(1.0, 1.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
        ])
    }

    fn uvs(n: usize) -> Vec<Vector2<f32>> {
        vec![Vector2::new(0.5, 0.5); n]
    }

    #[test]
    fn test_uv_source_for_mode() {
        assert_eq!(UvSource::for_mode(EmphasisMode::RealTexture), UvSource::Engine);
        assert_eq!(UvSource::for_mode(EmphasisMode::Caricature), UvSource::Static);
        assert_eq!(UvSource::for_mode(EmphasisMode::Normal), UvSource::Static);
        assert_eq!(UvSource::for_mode(EmphasisMode::None), UvSource::Static);
    }

    #[test]
    fn test_select_uvs() {
        let engine = vec![Vector2::new(0.1, 0.2)];
        let fallback = vec![Vector2::new(0.9, 0.8)];

        let (source, chosen) = select_uvs(EmphasisMode::RealTexture, Some(engine.as_slice()), &fallback).unwrap();
        assert_eq!(source, UvSource::Engine);
        assert_eq!(chosen, engine.as_slice());

        let (source, chosen) = select_uvs(EmphasisMode::Caricature, Some(engine.as_slice()), &fallback).unwrap();
        assert_eq!(source, UvSource::Static);
        assert_eq!(chosen, fallback.as_slice());

        assert!(select_uvs(EmphasisMode::RealTexture, None, &fallback).is_err());
    }

    #[test]
    fn test_assemble() {
        let mesh = MeshFrame::assemble(quad(), vec![[0, 1, 2], [0, 2, 3]], &uvs(6), UvSource::Static).unwrap();
        assert_eq!(mesh.uvs.len(), 4);
        assert_eq!(mesh.flat_triangles().unwrap(), vec![0, 1, 2, 0, 2, 3]);
    }

    #[test]
    fn test_assemble_rejects_bad_input() {
        let out_of_range = MeshFrame::assemble(quad(), vec![[0, 1, 4]], &uvs(4), UvSource::Static);
        assert!(matches!(out_of_range, Err(Error::InvalidInput(msg)) if msg.contains("vertex 4")));

        let too_few_uvs = MeshFrame::assemble(quad(), vec![[0, 1, 2]], &uvs(3), UvSource::Engine);
        assert!(too_few_uvs.is_err());
    }
}
