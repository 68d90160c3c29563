//! Face caricature library for real-time exaggeration of tracked face meshes.
//!
//! This library deforms a tracked face mesh by pushing each vertex away from a
//! mean face, then re-weights selected regions (eyes, nose, lips) so their
//! proportions are exaggerated further. The deformed mesh and a scene-space
//! head pose are handed to an external renderer.
//!
//! The per-frame pipeline consists of:
//! 1. Taking a tracked face snapshot (vertices, pose, status) from the tracker
//! 2. Deforming the vertices against the mean face for the active mode
//! 3. Converting the raw head pose into scene space
//! 4. Bundling vertices, triangles and texture coordinates for the renderer
//!
//! # Examples
//!
//! ## Basic Usage
//!
//! ```no_run
//! use face_caricature::{emphasis::EmphasisMode, mean_face::MeanFaceReference, vertex_set::VertexSet};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Load the reference face
//! let mean = MeanFaceReference::load("assets/mean/mean.txt")?;
//!
//! // Read a tracked face in the same x;y;z format
//! let tracked = VertexSet::parse_delimited(&std::fs::read_to_string("face.txt")?)?;
//!
//! // Exaggerate it
//! let deformed = face_caricature::emphasis::deform(&tracked, &mean, EmphasisMode::Caricature)?;
//! println!("{}", deformed.to_delimited());
//! # Ok(())
//! # }
//! ```
//!
//! ## Pose Normalization
//!
//! ```
//! use face_caricature::pose_normalization::normalize;
//! use nalgebra::Vector3;
//!
//! // A face looking straight at the camera is turned half a turn about y
//! let pose = normalize(Vector3::new(1.0, 2.0, 3.0), Vector3::zeros(), false, false);
//! assert_eq!(pose.translation, Vector3::new(-1.0, 2.0, 3.0));
//! assert_eq!(pose.rotation, Vector3::new(0.0, 180.0, 0.0));
//! ```
//!
//! ## Frame Pipeline
//!
//! ```no_run
//! use face_caricature::{
//!     app::{FaceCaricatureApp, FaceInput, FaceOutput},
//!     config::Config,
//!     tracking::{decode_triangles, TrackedFace},
//! };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut app = FaceCaricatureApp::from_config(&Config::default())?;
//! app.cycle_mode();
//!
//! // Buffers as delivered by the tracker for one face slot
//! let vertex_buffer = vec![0.0_f32; 357 * 3];
//! let triangle_buffer = vec![0_i32, 1, 2];
//! let uv_buffer = vec![0.5_f32; 357 * 2];
//! app.load_static_uvs(&uv_buffer)?;
//!
//! let input = FaceInput {
//!     face: TrackedFace::from_buffers(&vertex_buffer, [0.0, 0.0, 50.0], [0.0, 0.0, 0.0], 1)?,
//!     triangles: decode_triangles(&triangle_buffer)?,
//!     engine_uvs: None,
//! };
//!
//! for output in app.process_frame(&[input]) {
//!     if let FaceOutput::Rendered { mesh, placement, .. } = output {
//!         println!("{} vertices at {:?}", mesh.vertices.len(), placement.position);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

/// Index-addressed vertex sets and face topology identifiers
pub mod vertex_set;

/// Mean face reference loading
pub mod mean_face;

/// Region index tables and per-region measurement rules
pub mod regions;

/// Shape emphasis engine and emphasis modes
pub mod emphasis;

/// Conversion of tracker head pose into scene space
pub mod pose_normalization;

/// Tracker snapshots and flat buffer decoding
pub mod tracking;

/// Renderer hand-off of deformed meshes
pub mod mesh;

/// Utility functions for buffer conversion and argument parsing
pub mod utils;

/// Error types and result handling
pub mod error;

/// Main application module
pub mod app;

/// Constants used throughout the application
pub mod constants;

/// Configuration management
pub mod config;

pub use emphasis::{EmphasisCoefficients, EmphasisMode, ShapeEmphasis};
pub use error::{Error, Result};
pub use mean_face::MeanFaceReference;
pub use vertex_set::{FaceTopology, VertexSet};
