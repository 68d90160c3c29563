//! Configuration management for the face caricature pipeline

use crate::{
    constants::{DEFAULT_MAX_FACES, DEPTH_OFFSET},
    emphasis::{EmphasisCoefficients, EmphasisMode, ShapeEmphasis},
    regions,
    vertex_set::FaceTopology,
    Error, Result,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Mean face resource configuration
    pub mean_face: MeanFaceConfig,

    /// Emphasis engine configuration
    pub emphasis: EmphasisConfig,

    /// Pose normalization configuration
    pub pose: PoseConfig,

    /// Tracking configuration
    pub tracking: TrackingConfig,
}

/// Mean face resource configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MeanFaceConfig {
    /// Path to the `x;y;z` mean face file
    pub path: PathBuf,

    /// Topology the mean face and tracked faces must share
    pub topology: FaceTopology,
}

/// Emphasis engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmphasisConfig {
    /// Mode selected at startup
    pub initial_mode: EmphasisMode,

    /// Z offset used to hide the mesh in mode `none`
    pub depth_offset: f32,

    /// Weights used by the caricature modes
    pub coefficients: EmphasisCoefficients,
}

/// Pose normalization configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PoseConfig {
    /// Camera frame is displayed mirrored
    pub mirrored: bool,

    /// Render pipeline on this platform mirrors the axes too
    pub platform_mirrors_axes: bool,
}

/// Tracking configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackingConfig {
    /// Maximum number of faces processed per frame
    pub max_faces: usize,
}

impl Default for MeanFaceConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("assets/mean/mean.txt"),
            topology: FaceTopology::candide(),
        }
    }
}

impl Default for EmphasisConfig {
    fn default() -> Self {
        Self {
            initial_mode: EmphasisMode::None,
            depth_offset: DEPTH_OFFSET,
            coefficients: EmphasisCoefficients::CARICATURE,
        }
    }
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            max_faces: DEFAULT_MAX_FACES,
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| Error::ConfigError(format!("Failed to read {}: {e}", path.as_ref().display())))?;

        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML text
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid configuration
    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| Error::ConfigError(format!("Failed to parse config: {e}")))
    }

    /// Save configuration to a YAML file
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .map_err(|e| Error::ConfigError(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, content)?;

        Ok(())
    }

    /// Build the emphasis engine described by this configuration
    pub fn shape_emphasis(&self) -> ShapeEmphasis {
        ShapeEmphasis::new(self.emphasis.coefficients, self.emphasis.depth_offset)
    }

    /// Validate configuration values without touching the filesystem
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` describing the first invalid value
    pub fn validate(&self) -> Result<()> {
        if !self.emphasis.depth_offset.is_finite() {
            return Err(Error::ConfigError("Depth offset must be finite".to_string()));
        }
        if !self.emphasis.coefficients.is_finite() {
            return Err(Error::ConfigError("Emphasis coefficients must be finite".to_string()));
        }

        if self.tracking.max_faces == 0 {
            return Err(Error::ConfigError("Max faces must be greater than 0".to_string()));
        }

        // Region tables are tied to the topology; a smaller model cannot be deformed
        let vertex_count = self.mean_face.topology.vertex_count;
        if regions::validate(vertex_count).is_err() {
            return Err(Error::ConfigError(format!(
                "Topology '{}' has {vertex_count} vertices, region tables need at least {}",
                self.mean_face.topology.name,
                regions::max_referenced_index() + 1
            )));
        }

        Ok(())
    }

    /// Validate values and check that the mean face file exists
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if validation fails or the mean face is missing
    pub fn validate_paths(&self) -> Result<()> {
        self.validate()?;

        if !self.mean_face.path.exists() {
            return Err(Error::ConfigError(format!(
                "Mean face not found: {}",
                self.mean_face.path.display()
            )));
        }

        Ok(())
    }
}

/// Example configuration file content
pub const EXAMPLE_CONFIG: &str = r#"# Face Caricature Configuration

# Mean face resource
mean_face:
  path: "assets/mean/mean.txt"
  topology:
    name: "candide-357"
    vertex_count: 357

# Emphasis engine
emphasis:
  initial_mode: "none"
  depth_offset: 1000.0
  coefficients:
    caricature: 1.4
    eye: 5.0
    nose_width: 6.0
    nose_length: 1.5
    lip: 3.0

# Pose normalization
pose:
  mirrored: true
  platform_mirrors_axes: false

# Tracking
tracking:
  max_faces: 2
"#;
