//! Facial region index tables.
//!
//! Each region is a literal set of vertex indices in the face-model topology
//! together with the measurement that drives it: a pair of vertices whose
//! spread along one axis is compared between the tracked face and the mean
//! face, and the sign convention that turns the difference into a shift.

use crate::{constants::EYE_VERTICAL_DAMPING, Error, Result};
use nalgebra::Vector3;

/// Vertices inside the mouth, left alone by the global caricature pass
pub const MOUTH_INTERIOR: &[usize] = &[191, 189, 259, 165, 316, 321, 209, 190, 188, 322, 327, 306, 166, 134];

pub const LEFT_EYE: &[usize] = &[
    28, 111, 113, 179, 221, 220, 305, 332, 299, 177, 178, 300, 110, 112, 180, 219, 273, 328, 272, 108, 222,
];

pub const RIGHT_EYE: &[usize] = &[
    250, 200, 155, 61, 62, 53, 52, 311, 151, 247, 248, 249, 199, 154, 63, 51, 50, 308, 150, 246, 5,
];

pub const NOSE_WIDTH_LEFT: &[usize] = &[218, 275, 280, 237, 268, 274, 279, 235, 286, 238, 239, 269, 233, 232];

pub const NOSE_WIDTH_RIGHT: &[usize] = &[89, 282, 295, 262, 294, 296, 261, 297, 263, 264, 80, 79, 260, 91];

/// Every nose vertex; driven as one block by the nose-length measurement
pub const NOSE_LENGTH: &[usize] = &[
    145, 231, 169, 96, 78, 233, 232, 284, 260, 79, 269, 80, 274, 286, 238, 239, 283, 264, 263, 297, 294, 279,
    235, 234, 261, 296, 268, 282, 280, 237, 236, 262, 295, 89, 285, 90, 88, 275,
];

pub const UPPER_LIP: &[usize] = &[23, 175, 334, 138, 139, 168, 307, 245, 0, 167];

pub const LOWER_LIP: &[usize] = &[172, 171, 324, 131, 130, 82, 319, 84, 86];

/// Coordinate axis a measurement and its adjustment act on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    /// Component index into a `Vector3`
    pub const fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
        }
    }
}

/// Which side of the comparison is tested first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    /// Branch on `real < mean`
    Deficit,
    /// Branch on `real > mean`
    Surplus,
}

/// Direction a deficit pushes the region along the axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Positive,
    Negative,
}

impl Direction {
    pub const fn sign(self) -> f32 {
        match self {
            Self::Positive => 1.0,
            Self::Negative => -1.0,
        }
    }
}

/// Which emphasis coefficient scales a rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Weight {
    Eye,
    NoseWidth,
    NoseLength,
    Lip,
}

/// One measured axis of a region
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRule {
    pub axis: Axis,
    /// Vertex pair whose spread is measured
    pub pair: (usize, usize),
    pub comparison: Comparison,
    pub direction: Direction,
    pub weight: Weight,
    /// Divisor applied to the adjustment
    pub damping: f32,
}

impl AxisRule {
    const fn new(axis: Axis, pair: (usize, usize), comparison: Comparison, direction: Direction, weight: Weight) -> Self {
        Self {
            axis,
            pair,
            comparison,
            direction,
            weight,
            damping: 1.0,
        }
    }

    const fn damped(mut self, damping: f32) -> Self {
        self.damping = damping;
        self
    }

    /// Absolute spread of the measurement pair along the rule's axis
    pub fn spread(&self, points: &[Vector3<f32>]) -> f32 {
        let axis = self.axis.index();
        (points[self.pair.0][axis] - points[self.pair.1][axis]).abs()
    }

    /// Signed shift for every vertex of the region.
    ///
    /// `Deficit` rules push by `direction` when the tracked spread is below
    /// the mean and pull back otherwise. `Surplus` rules test the opposite
    /// side first.
    pub fn adjustment(&self, mean_spread: f32, real_spread: f32, coefficient: f32) -> f32 {
        let sign = self.direction.sign();
        let shift = match self.comparison {
            Comparison::Deficit => {
                if real_spread < mean_spread {
                    sign * (mean_spread - real_spread) * coefficient
                } else {
                    -sign * (real_spread - mean_spread) * coefficient
                }
            }
            Comparison::Surplus => {
                if real_spread > mean_spread {
                    -sign * (mean_spread - real_spread) * coefficient
                } else {
                    sign * (real_spread - mean_spread) * coefficient
                }
            }
        };
        shift / self.damping
    }
}

/// A named region and the rules that move it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    pub name: &'static str,
    pub indices: &'static [usize],
    pub rules: &'static [AxisRule],
}

pub const LEFT_EYE_REGION: Region = Region {
    name: "left_eye",
    indices: LEFT_EYE,
    rules: &[
        AxisRule::new(Axis::X, (178, 341), Comparison::Deficit, Direction::Positive, Weight::Eye),
        AxisRule::new(Axis::Y, (332, 193), Comparison::Deficit, Direction::Positive, Weight::Eye)
            .damped(EYE_VERTICAL_DAMPING),
    ],
};

/// Mirror of the left eye; X pushes the other way across the midline
pub const RIGHT_EYE_REGION: Region = Region {
    name: "right_eye",
    indices: RIGHT_EYE,
    rules: &[
        AxisRule::new(Axis::X, (62, 341), Comparison::Deficit, Direction::Negative, Weight::Eye),
        AxisRule::new(Axis::Y, (311, 193), Comparison::Deficit, Direction::Positive, Weight::Eye)
            .damped(EYE_VERTICAL_DAMPING),
    ],
};

pub const NOSE_WIDTH_LEFT_REGION: Region = Region {
    name: "nose_width_left",
    indices: NOSE_WIDTH_LEFT,
    rules: &[AxisRule::new(
        Axis::X,
        (274, 234),
        Comparison::Deficit,
        Direction::Positive,
        Weight::NoseWidth,
    )],
};

pub const NOSE_WIDTH_RIGHT_REGION: Region = Region {
    name: "nose_width_right",
    indices: NOSE_WIDTH_RIGHT,
    rules: &[AxisRule::new(
        Axis::X,
        (294, 234),
        Comparison::Deficit,
        Direction::Negative,
        Weight::NoseWidth,
    )],
};

pub const NOSE_LENGTH_REGION: Region = Region {
    name: "nose_length",
    indices: NOSE_LENGTH,
    rules: &[AxisRule::new(
        Axis::Y,
        (93, 234),
        Comparison::Deficit,
        Direction::Positive,
        Weight::NoseLength,
    )],
};

// Lips branch on `real > mean`, unlike every other region.
pub const UPPER_LIP_REGION: Region = Region {
    name: "upper_lip",
    indices: UPPER_LIP,
    rules: &[AxisRule::new(
        Axis::Y,
        (139, 191),
        Comparison::Surplus,
        Direction::Positive,
        Weight::Lip,
    )],
};

pub const LOWER_LIP_REGION: Region = Region {
    name: "lower_lip",
    indices: LOWER_LIP,
    rules: &[AxisRule::new(
        Axis::Y,
        (189, 130),
        Comparison::Surplus,
        Direction::Negative,
        Weight::Lip,
    )],
};

/// Regions in the order the emphasis engine applies them
pub const REGIONS: [Region; 7] = [
    LEFT_EYE_REGION,
    RIGHT_EYE_REGION,
    NOSE_WIDTH_LEFT_REGION,
    NOSE_WIDTH_RIGHT_REGION,
    NOSE_LENGTH_REGION,
    UPPER_LIP_REGION,
    LOWER_LIP_REGION,
];

/// Whether `index` is inside the mouth
pub fn is_mouth_interior(index: usize) -> bool {
    MOUTH_INTERIOR.contains(&index)
}

/// Largest vertex index referenced by any table or measurement pair
pub fn max_referenced_index() -> usize {
    let tables = MOUTH_INTERIOR
        .iter()
        .chain(REGIONS.iter().flat_map(|r| r.indices.iter()))
        .copied();
    let pairs = REGIONS
        .iter()
        .flat_map(|r| r.rules.iter())
        .flat_map(|rule| [rule.pair.0, rule.pair.1]);
    tables.chain(pairs).max().unwrap_or(0)
}

/// Check every table and measurement pair against a vertex-set length
///
/// # Errors
///
/// Returns `MalformedRegionData` for the first index that is out of range
pub fn validate(len: usize) -> Result<()> {
    let out_of_range = |region: &'static str, index: usize| -> Result<()> {
        if index < len {
            Ok(())
        } else {
            Err(Error::MalformedRegionData { region, index, len })
        }
    };

    for &index in MOUTH_INTERIOR {
        out_of_range("mouth_interior", index)?;
    }
    for region in &REGIONS {
        for &index in region.indices {
            out_of_range(region.name, index)?;
        }
        for rule in region.rules {
            out_of_range(region.name, rule.pair.0)?;
            out_of_range(region.name, rule.pair.1)?;
        }
    }
    Ok(())
}
