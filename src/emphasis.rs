//! Shape emphasis engine.
//!
//! Deforms a tracked face so that its deviation from the mean face is
//! exaggerated, globally and per facial region. The engine holds no
//! per-frame state: every call takes a tracked snapshot and returns a new
//! vertex set, so independent faces can be deformed concurrently.

use crate::{
    constants::{
        DEFAULT_CARICATURE_WEIGHT, DEFAULT_EYE_WEIGHT, DEFAULT_LIP_WEIGHT, DEFAULT_NOSE_LENGTH_WEIGHT,
        DEFAULT_NOSE_WIDTH_WEIGHT, DEPTH_OFFSET,
    },
    mean_face::MeanFaceReference,
    regions::{self, Region, Weight, REGIONS},
    vertex_set::VertexSet,
    Error, Result,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Face effect selected by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmphasisMode {
    /// Mesh pushed out of view
    #[default]
    None,
    /// Full pipeline with zero weights
    Normal,
    /// Exaggerated mesh with the static mask texture
    Caricature,
    /// Exaggerated mesh textured with the camera frame
    RealTexture,
}

impl EmphasisMode {
    /// Next mode in the trigger cycle
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::None => Self::Normal,
            Self::Normal => Self::Caricature,
            Self::Caricature => Self::RealTexture,
            Self::RealTexture => Self::None,
        }
    }

    /// Weights in effect for this mode, given the configured caricature weights
    #[must_use]
    pub fn coefficients(self, active: &EmphasisCoefficients) -> EmphasisCoefficients {
        match self {
            Self::None | Self::Normal => EmphasisCoefficients::ZERO,
            Self::Caricature | Self::RealTexture => *active,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Normal => "normal",
            Self::Caricature => "caricature",
            Self::RealTexture => "real_texture",
        }
    }
}

impl fmt::Display for EmphasisMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmphasisMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "none" | "nothing" => Ok(Self::None),
            "normal" => Ok(Self::Normal),
            "caricature" => Ok(Self::Caricature),
            "real_texture" | "realtexture" | "real-texture" => Ok(Self::RealTexture),
            _ => Err(Error::InvalidInput(format!("Unknown emphasis mode: {s}"))),
        }
    }
}

/// Per-region emphasis weights
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmphasisCoefficients {
    /// Global exaggeration of every vertex
    pub caricature: f32,
    pub eye: f32,
    pub nose_width: f32,
    pub nose_length: f32,
    pub lip: f32,
}

impl EmphasisCoefficients {
    pub const ZERO: Self = Self {
        caricature: 0.0,
        eye: 0.0,
        nose_width: 0.0,
        nose_length: 0.0,
        lip: 0.0,
    };

    pub const CARICATURE: Self = Self {
        caricature: DEFAULT_CARICATURE_WEIGHT,
        eye: DEFAULT_EYE_WEIGHT,
        nose_width: DEFAULT_NOSE_WIDTH_WEIGHT,
        nose_length: DEFAULT_NOSE_LENGTH_WEIGHT,
        lip: DEFAULT_LIP_WEIGHT,
    };

    /// Coefficient for a region rule
    pub const fn weight(&self, weight: Weight) -> f32 {
        match weight {
            Weight::Eye => self.eye,
            Weight::NoseWidth => self.nose_width,
            Weight::NoseLength => self.nose_length,
            Weight::Lip => self.lip,
        }
    }

    pub fn is_finite(&self) -> bool {
        [self.caricature, self.eye, self.nose_width, self.nose_length, self.lip]
            .iter()
            .all(|w| w.is_finite())
    }
}

impl Default for EmphasisCoefficients {
    fn default() -> Self {
        Self::CARICATURE
    }
}

/// Emphasis engine with configurable weights
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeEmphasis {
    coefficients: EmphasisCoefficients,
    depth_offset: f32,
}

impl Default for ShapeEmphasis {
    fn default() -> Self {
        Self::new(EmphasisCoefficients::CARICATURE, DEPTH_OFFSET)
    }
}

impl ShapeEmphasis {
    /// Create an engine.
    ///
    /// `coefficients` apply in the caricature modes; `depth_offset` is added
    /// to every z in mode `None`.
    #[must_use]
    pub fn new(coefficients: EmphasisCoefficients, depth_offset: f32) -> Self {
        Self {
            coefficients,
            depth_offset,
        }
    }

    pub fn coefficients(&self) -> &EmphasisCoefficients {
        &self.coefficients
    }

    pub fn depth_offset(&self) -> f32 {
        self.depth_offset
    }

    /// Deform a tracked vertex set.
    ///
    /// Mode `None` only adds the depth offset. Every other mode runs the
    /// global caricature pass followed by the region passes, all measured
    /// from the unmodified tracked positions.
    ///
    /// # Errors
    ///
    /// Returns:
    /// - `TopologyMismatch` if `tracked` and `mean` differ in length
    /// - `MalformedRegionData` if a region index is outside the vertex set
    pub fn deform(&self, tracked: &VertexSet, mean: &MeanFaceReference, mode: EmphasisMode) -> Result<VertexSet> {
        mean.topology().check(tracked.len())?;

        let mut result = tracked.clone();

        if mode == EmphasisMode::None {
            for p in result.iter_mut() {
                p.z += self.depth_offset;
            }
            return Ok(result);
        }

        regions::validate(tracked.len())?;

        let coefficients = mode.coefficients(&self.coefficients);
        log::trace!("Deforming {} vertices in {mode} mode", tracked.len());

        Self::caricature_pass(&mut result, tracked, mean, coefficients.caricature);
        for region in &REGIONS {
            Self::region_pass(&mut result, tracked, mean, region, &coefficients);
        }

        Ok(result)
    }

    /// Move every vertex outside the mouth away from the mean, per axis
    fn caricature_pass(result: &mut VertexSet, tracked: &VertexSet, mean: &MeanFaceReference, weight: f32) {
        for j in 0..tracked.len() {
            if regions::is_mouth_interior(j) {
                continue;
            }
            for axis in 0..3 {
                let diff = mean[j][axis] - tracked[j][axis];
                if diff >= 0.0 {
                    result[j][axis] -= diff * weight;
                } else {
                    result[j][axis] += -diff * weight;
                }
            }
        }
    }

    fn region_pass(
        result: &mut VertexSet,
        tracked: &VertexSet,
        mean: &MeanFaceReference,
        region: &Region,
        coefficients: &EmphasisCoefficients,
    ) {
        for rule in region.rules {
            let mean_spread = rule.spread(mean.vertices().as_slice());
            let real_spread = rule.spread(tracked.as_slice());
            let shift = rule.adjustment(mean_spread, real_spread, coefficients.weight(rule.weight));
            let axis = rule.axis.index();
            for &pos in region.indices {
                result[pos][axis] += shift;
            }
        }
    }
}

/// Deform with the default caricature weights and depth offset
///
/// # Errors
///
/// See [`ShapeEmphasis::deform`]
pub fn deform(tracked: &VertexSet, mean: &MeanFaceReference, mode: EmphasisMode) -> Result<VertexSet> {
    ShapeEmphasis::default().deform(tracked, mean, mode)
}
