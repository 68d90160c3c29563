//! Constants used throughout the library

/// Vertex count of the tracker's face model (and of the mean-face asset)
pub const FACE_MODEL_VERTEX_COUNT: usize = 357;

/// Name of the tracker's face model topology
pub const FACE_MODEL_TOPOLOGY: &str = "candide-357";

/// Components per vertex in flat tracker buffers
pub const VERTEX_COMPONENTS: usize = 3;

/// Components per texture coordinate in flat tracker buffers
pub const TEX_COORD_COMPONENTS: usize = 2;

/// Indices per triangle in flat tracker buffers
pub const TRIANGLE_INDICES: usize = 3;

/// Field separator of the mean-face resource
pub const MEAN_FACE_DELIMITER: char = ';';

/// Z offset that pushes the mesh out of view when no effect is selected
pub const DEPTH_OFFSET: f32 = 1000.0;

/// Default emphasis weights for the caricature modes
pub const DEFAULT_CARICATURE_WEIGHT: f32 = 1.4;
pub const DEFAULT_EYE_WEIGHT: f32 = 5.0;
pub const DEFAULT_NOSE_WIDTH_WEIGHT: f32 = 6.0;
pub const DEFAULT_NOSE_LENGTH_WEIGHT: f32 = 1.5;
pub const DEFAULT_LIP_WEIGHT: f32 = 3.0;

/// Vertical eye adjustments are damped by this divisor
pub const EYE_VERTICAL_DAMPING: f32 = 5.0;

/// Half turn in degrees, used by the rotation conversion
pub const HALF_TURN_DEGREES: f32 = 180.0;

/// Number of faces the tracker reports per frame
pub const DEFAULT_MAX_FACES: usize = 2;
