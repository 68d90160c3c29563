//! Conversion of tracker head pose into scene space.
//!
//! The tracker reports translation in a right-handed camera frame and
//! rotation as radians about its own axes. The scene expects a mirrored x
//! axis and Euler angles in degrees.

use crate::{constants::HALF_TURN_DEGREES, Error, Result};
use nalgebra::Vector3;

/// Head pose in scene space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedPose {
    pub translation: Vector3<f32>,
    /// Euler angles in degrees, each in (-180, 180]
    pub rotation: Vector3<f32>,
}

/// Convert a raw tracker pose into scene space.
///
/// Translation x is negated. Rotation is converted to degrees as
/// `x = deg(x)`, `y = deg(-(y + pi))`, `z = deg(-z)`. When the display is
/// mirrored on a platform whose render pipeline mirrors too, y and z are
/// negated once more. Angles are finally wrapped into (-180, 180].
#[must_use]
pub fn normalize(
    raw_translation: Vector3<f32>,
    raw_rotation: Vector3<f32>,
    is_mirrored: bool,
    platform_mirrors_axes: bool,
) -> NormalizedPose {
    let translation = Vector3::new(-raw_translation.x, raw_translation.y, raw_translation.z);

    // deg(-(y + pi)) expanded so that y = 0 lands exactly on a half turn
    let mut rotation = Vector3::new(
        raw_rotation.x.to_degrees(),
        -(raw_rotation.y.to_degrees() + HALF_TURN_DEGREES),
        -raw_rotation.z.to_degrees(),
    );

    if is_mirrored && platform_mirrors_axes {
        rotation.y = -rotation.y;
        rotation.z = -rotation.z;
    }

    NormalizedPose {
        translation,
        rotation: rotation.map(wrap_degrees),
    }
}

/// Wrap an angle in degrees into (-180, 180]
#[must_use]
pub fn wrap_degrees(angle: f32) -> f32 {
    let full_turn = 2.0 * HALF_TURN_DEGREES;
    let wrapped = (angle + HALF_TURN_DEGREES).rem_euclid(full_turn) - HALF_TURN_DEGREES;
    if wrapped <= -HALF_TURN_DEGREES {
        wrapped + full_turn
    } else {
        wrapped
    }
}

/// Rest pose of a scene object before tracking data is applied
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SceneAnchor {
    pub position: Vector3<f32>,
    /// Euler angles in degrees
    pub rotation: Vector3<f32>,
}

/// Final transform of a scene object for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScenePlacement {
    pub position: Vector3<f32>,
    /// Euler angles in degrees
    pub rotation: Vector3<f32>,
}

impl ScenePlacement {
    /// Offset the anchor by the normalized pose.
    ///
    /// On a mirroring platform with a mirrored display the position's x is
    /// flipped back into the mirrored scene.
    #[must_use]
    pub fn place(anchor: &SceneAnchor, pose: &NormalizedPose, is_mirrored: bool, platform_mirrors_axes: bool) -> Self {
        let mut position = anchor.position + pose.translation;
        if is_mirrored && platform_mirrors_axes {
            position.x = -position.x;
        }

        Self {
            position,
            rotation: anchor.rotation + pose.rotation,
        }
    }
}

/// Vertical field of view in degrees for a camera with the tracker's focus
///
/// # Errors
///
/// Returns an error if the focus is not positive or the image is empty
#[allow(clippy::cast_precision_loss)] // Image sizes are far below f32 precision limits
pub fn vertical_fov_degrees(focus: f32, image_width: u32, image_height: u32) -> Result<f32> {
    if !(focus.is_finite() && focus > 0.0) {
        return Err(Error::InvalidInput(format!("Camera focus must be positive, got {focus}")));
    }
    if image_width == 0 || image_height == 0 {
        return Err(Error::InvalidInput(format!(
            "Image size must be non-zero, got {image_width}x{image_height}"
        )));
    }

    let aspect = image_width as f32 / image_height as f32;
    let y_range = if image_width > image_height { 1.0 } else { 1.0 / aspect };
    Ok((2.0 * (y_range / focus).atan()).to_degrees())
}
