//! Per-frame pipeline: tracked faces in, renderable meshes and placements out.

use crate::{
    config::Config,
    emphasis::{EmphasisMode, ShapeEmphasis},
    error::{Error, Result},
    mean_face::MeanFaceReference,
    mesh::{select_uvs, MeshFrame},
    pose_normalization::{normalize, NormalizedPose, SceneAnchor, ScenePlacement},
    tracking::{decode_tex_coords, TrackStatus, TrackedFace},
};
use log::{debug, info, warn};
use nalgebra::Vector2;
use std::sync::Arc;

/// Pipeline settings that do not change per frame
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Mode selected at startup
    pub initial_mode: EmphasisMode,
    /// Camera frame is displayed mirrored
    pub mirrored: bool,
    /// Render pipeline on this platform mirrors the axes too
    pub platform_mirrors_axes: bool,
    /// Maximum number of faces processed per frame
    pub max_faces: usize,
}

impl From<&Config> for AppConfig {
    fn from(config: &Config) -> Self {
        Self {
            initial_mode: config.emphasis.initial_mode,
            mirrored: config.pose.mirrored,
            platform_mirrors_axes: config.pose.platform_mirrors_axes,
            max_faces: config.tracking.max_faces,
        }
    }
}

/// Tracker output for one face slot in one frame
#[derive(Debug, Clone)]
pub struct FaceInput {
    pub face: TrackedFace,
    /// Triangle list, passed through unchanged
    pub triangles: Vec<[usize; 3]>,
    /// Per-frame texture coordinates from the tracker, if it provided them
    pub engine_uvs: Option<Vec<Vector2<f32>>>,
}

/// Result for one face slot
#[derive(Debug)]
pub enum FaceOutput {
    /// Face was deformed and is ready for the renderer
    Rendered {
        mesh: MeshFrame,
        pose: NormalizedPose,
        placement: ScenePlacement,
    },
    /// Tracker had no valid face in this slot
    Idle(TrackStatus),
    /// Deformation failed for this face; the rest of the frame continues
    Skipped(Error),
}

/// Face caricature pipeline
pub struct FaceCaricatureApp {
    config: AppConfig,
    mean: Arc<MeanFaceReference>,
    engine: ShapeEmphasis,
    mode: EmphasisMode,
    static_uvs: Option<Vec<Vector2<f32>>>,
    anchors: Vec<SceneAnchor>,
}

impl FaceCaricatureApp {
    /// Create a pipeline around a loaded mean face
    ///
    /// # Errors
    ///
    /// Returns an error if `max_faces` is zero
    pub fn new(config: AppConfig, mean: Arc<MeanFaceReference>, engine: ShapeEmphasis) -> Result<Self> {
        if config.max_faces == 0 {
            return Err(Error::ConfigError("Max faces must be greater than 0".to_string()));
        }

        info!(
            "Initializing face caricature pipeline: {} mean vertices, {} face slots, mode {}",
            mean.len(),
            config.max_faces,
            config.initial_mode
        );

        Ok(Self {
            mode: config.initial_mode,
            anchors: vec![SceneAnchor::default(); config.max_faces],
            config,
            mean,
            engine,
            static_uvs: None,
        })
    }

    /// Build a pipeline from configuration, loading the mean face it names
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the mean face
    /// cannot be loaded
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;
        let mean = MeanFaceReference::load_with_topology(&config.mean_face.path, &config.mean_face.topology)?;
        Self::new(AppConfig::from(config), Arc::new(mean), config.shape_emphasis())
    }

    pub fn mode(&self) -> EmphasisMode {
        self.mode
    }

    /// Advance to the next effect, as the effect button does
    pub fn cycle_mode(&mut self) -> EmphasisMode {
        self.mode = self.mode.next();
        info!("Emphasis mode: {}", self.mode);
        self.mode
    }

    pub fn set_mode(&mut self, mode: EmphasisMode) {
        self.mode = mode;
    }

    pub fn has_static_uvs(&self) -> bool {
        self.static_uvs.is_some()
    }

    /// Store the tracker's static texture coordinates for the mask texture.
    ///
    /// Returns `false` if the buffer was empty and nothing was stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the buffer length is odd
    pub fn load_static_uvs(&mut self, buffer: &[f32]) -> Result<bool> {
        let uvs = decode_tex_coords(buffer)?;
        if uvs.is_empty() {
            return Ok(false);
        }
        debug!("Loaded {} static texture coordinates", uvs.len());
        self.static_uvs = Some(uvs);
        Ok(true)
    }

    /// Set the rest pose of the object driven by a face slot
    ///
    /// # Errors
    ///
    /// Returns an error if the slot is outside `max_faces`
    pub fn set_anchor(&mut self, face_index: usize, anchor: SceneAnchor) -> Result<()> {
        let slot = self.anchors.get_mut(face_index).ok_or_else(|| {
            Error::InvalidInput(format!("Face slot {face_index} outside 0..{}", self.config.max_faces))
        })?;
        *slot = anchor;
        Ok(())
    }

    /// Process every face slot of one frame.
    ///
    /// Slots beyond `max_faces` are ignored. A failure in one face is
    /// reported as `Skipped` and does not affect the others.
    pub fn process_frame(&self, faces: &[FaceInput]) -> Vec<FaceOutput> {
        if faces.len() > self.config.max_faces {
            debug!(
                "Ignoring {} face slots beyond the configured {}",
                faces.len() - self.config.max_faces,
                self.config.max_faces
            );
        }

        faces
            .iter()
            .take(self.config.max_faces)
            .enumerate()
            .map(|(index, input)| {
                if !input.face.status.is_ok() {
                    return FaceOutput::Idle(input.face.status);
                }
                match self.process_face(index, input) {
                    Ok(output) => output,
                    Err(e) => {
                        warn!("Skipping face {index}: {e}");
                        FaceOutput::Skipped(e)
                    }
                }
            })
            .collect()
    }

    fn process_face(&self, index: usize, input: &FaceInput) -> Result<FaceOutput> {
        let vertices = self.engine.deform(&input.face.vertices, &self.mean, self.mode)?;

        let fallback = self.static_uvs.as_deref().unwrap_or(&[]);
        let (uv_source, uvs) = select_uvs(self.mode, input.engine_uvs.as_deref(), fallback)?;
        let mesh = MeshFrame::assemble(vertices, input.triangles.clone(), uvs, uv_source)?;

        let pose = normalize(
            input.face.translation,
            input.face.rotation,
            self.config.mirrored,
            self.config.platform_mirrors_axes,
        );
        let anchor = self.anchors.get(index).copied().unwrap_or_default();
        let placement = ScenePlacement::place(&anchor, &pose, self.config.mirrored, self.config.platform_mirrors_axes);

        debug!(
            "Face {index}: {} vertices, rotation ({:.1}, {:.1}, {:.1})",
            mesh.vertices.len(),
            pose.rotation.x,
            pose.rotation.y,
            pose.rotation.z
        );

        Ok(FaceOutput::Rendered { mesh, pose, placement })
    }
}
