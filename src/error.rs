//! Error types for the face caricature library.

use thiserror::Error;

/// Main error type for the library
#[derive(Error, Debug)]
pub enum Error {
    /// Mean-face resource is missing or corrupt
    #[error("Resource error: {0}")]
    Resource(String),

    /// Vertex count of a tracked set disagrees with the reference topology
    #[error("Topology mismatch for '{topology}': expected {expected} vertices, got {actual}")]
    TopologyMismatch {
        /// Name of the reference topology
        topology: String,
        /// Vertex count of the reference
        expected: usize,
        /// Vertex count that was supplied
        actual: usize,
    },

    /// A region table references a vertex outside the vertex set
    #[error("Region '{region}' references vertex {index}, but the vertex set has {len} vertices")]
    MalformedRegionData {
        /// Name of the offending region
        region: &'static str,
        /// Out-of-range index
        index: usize,
        /// Length of the vertex set
        len: usize,
    },

    /// Invalid input parameters or buffers provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// File I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results with our Error type
pub type Result<T> = std::result::Result<T, Error>;
