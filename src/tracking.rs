//! Per-frame tracking snapshots and decoding of the tracker's flat buffers.

use crate::{
    constants::{TEX_COORD_COMPONENTS, TRIANGLE_INDICES},
    utils::safe_cast::i32_to_usize,
    vertex_set::VertexSet,
    Error, Result,
};
use nalgebra::{Vector2, Vector3};

/// Tracker status for one face slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackStatus {
    /// Tracker is not running
    Off,
    /// Face is tracked and the data is valid
    Ok,
    /// Tracker lost the face and is searching
    Recovering,
    /// Tracker is initializing
    Init,
    /// Status code the tracker did not document
    Unknown(i32),
}

impl TrackStatus {
    /// Map the tracker's integer status code
    #[must_use]
    pub const fn from_code(code: i32) -> Self {
        match code {
            0 => Self::Off,
            1 => Self::Ok,
            2 => Self::Recovering,
            3 => Self::Init,
            other => Self::Unknown(other),
        }
    }

    pub const fn is_ok(self) -> bool {
        matches!(self, Self::Ok)
    }
}

/// One face as reported by the tracker for a single frame
#[derive(Debug, Clone, PartialEq)]
pub struct TrackedFace {
    pub vertices: VertexSet,
    pub translation: Vector3<f32>,
    /// Radians, tracker axes
    pub rotation: Vector3<f32>,
    pub status: TrackStatus,
}

impl TrackedFace {
    /// Build a snapshot from the tracker's raw outputs
    ///
    /// # Errors
    ///
    /// Returns an error if the vertex buffer is not made of whole vertices
    pub fn from_buffers(vertex_buffer: &[f32], translation: [f32; 3], rotation: [f32; 3], status_code: i32) -> Result<Self> {
        Ok(Self {
            vertices: VertexSet::from_flat(vertex_buffer)?,
            translation: Vector3::from(translation),
            rotation: Vector3::from(rotation),
            status: TrackStatus::from_code(status_code),
        })
    }
}

/// Decode a flat triangle index buffer into index triples
///
/// # Errors
///
/// Returns an error if the length is not a multiple of 3 or an index is negative
pub fn decode_triangles(buffer: &[i32]) -> Result<Vec<[usize; 3]>> {
    if buffer.len() % TRIANGLE_INDICES != 0 {
        return Err(Error::InvalidInput(format!(
            "Triangle buffer length {} is not a multiple of {TRIANGLE_INDICES}",
            buffer.len()
        )));
    }

    buffer
        .chunks_exact(TRIANGLE_INDICES)
        .map(|t| -> Result<[usize; 3]> { Ok([i32_to_usize(t[0])?, i32_to_usize(t[1])?, i32_to_usize(t[2])?]) })
        .collect()
}

/// Decode a flat `[u0, v0, u1, v1, ...]` texture coordinate buffer
///
/// # Errors
///
/// Returns an error if the length is odd
pub fn decode_tex_coords(buffer: &[f32]) -> Result<Vec<Vector2<f32>>> {
    if buffer.len() % TEX_COORD_COMPONENTS != 0 {
        return Err(Error::InvalidInput(format!(
            "Texture coordinate buffer length {} is not a multiple of {TEX_COORD_COMPONENTS}",
            buffer.len()
        )));
    }

    Ok(buffer
        .chunks_exact(TEX_COORD_COMPONENTS)
        .map(|c| Vector2::new(c[0], c[1]))
        .collect())
}
