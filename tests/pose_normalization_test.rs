//! Tests for conversion of tracker pose into scene space

use face_caricature::pose_normalization::{normalize, vertical_fov_degrees, wrap_degrees, SceneAnchor, ScenePlacement};
use nalgebra::Vector3;
use proptest::prelude::*;
use std::f32::consts::{FRAC_PI_2, PI};

/// Difference between two angles in degrees, modulo a full turn
fn angle_distance(a: f32, b: f32) -> f32 {
    wrap_degrees(a - b).abs()
}

#[test]
fn test_zero_rotation_maps_to_half_turn() {
    for (mirrored, platform) in [(false, false), (true, false), (false, true)] {
        let pose = normalize(Vector3::zeros(), Vector3::zeros(), mirrored, platform);
        assert_eq!(pose.rotation, Vector3::new(0.0, 180.0, 0.0));
    }
}

#[test]
fn test_yaw_quarter_turns() {
    // -(90 + 180) = -270, which is 90
    let pose = normalize(Vector3::zeros(), Vector3::new(0.0, FRAC_PI_2, 0.0), false, false);
    assert!(angle_distance(pose.rotation.y, 90.0) < 1e-3);

    // -(-90 + 180) = -90
    let pose = normalize(Vector3::zeros(), Vector3::new(0.0, -FRAC_PI_2, 0.0), false, false);
    assert!(angle_distance(pose.rotation.y, -90.0) < 1e-3);

    // y = -pi lands back on zero
    let pose = normalize(Vector3::zeros(), Vector3::new(0.0, -PI, 0.0), false, false);
    assert!(angle_distance(pose.rotation.y, 0.0) < 1e-3);
}

#[test]
fn test_translation_x_is_negated() {
    let pose = normalize(Vector3::new(12.5, -3.0, 40.0), Vector3::zeros(), false, false);
    assert_eq!(pose.translation, Vector3::new(-12.5, -3.0, 40.0));
}

#[test]
fn test_placement_on_mirroring_platform() {
    let anchor = SceneAnchor {
        position: Vector3::new(1.0, 0.0, 0.0),
        rotation: Vector3::zeros(),
    };
    let pose = normalize(Vector3::new(3.0, 1.0, 2.0), Vector3::zeros(), true, true);

    // (1 + -3) flipped back to 2
    let placed = ScenePlacement::place(&anchor, &pose, true, true);
    assert_eq!(placed.position, Vector3::new(2.0, 1.0, 2.0));
    assert_eq!(placed.rotation, pose.rotation);

    let unflipped = ScenePlacement::place(&anchor, &pose, true, false);
    assert_eq!(unflipped.position, Vector3::new(-2.0, 1.0, 2.0));
}

#[test]
fn test_camera_fov() {
    let landscape = vertical_fov_degrees(2.0, 1280, 720).unwrap();
    assert!((landscape - (2.0 * 0.5_f32.atan()).to_degrees()).abs() < 1e-3);

    let square = vertical_fov_degrees(1.0, 480, 480).unwrap();
    assert!((square - 90.0).abs() < 1e-3);

    assert!(vertical_fov_degrees(-1.0, 640, 480).is_err());
    assert!(vertical_fov_degrees(1.0, 640, 0).is_err());
}

proptest! {
    #[test]
    fn prop_rotation_in_half_open_range(
        x in -10.0f32..10.0, y in -10.0f32..10.0, z in -10.0f32..10.0,
        mirrored in any::<bool>(), platform in any::<bool>(),
    ) {
        let pose = normalize(Vector3::zeros(), Vector3::new(x, y, z), mirrored, platform);
        for angle in pose.rotation.iter() {
            prop_assert!(*angle > -180.0 && *angle <= 180.0, "angle {} out of range", angle);
        }
    }

    #[test]
    fn prop_mirror_correction_cancels_mirrored_report(
        x in -3.0f32..3.0, y in -3.0f32..3.0, z in -3.0f32..3.0,
    ) {
        let translation = Vector3::new(1.0, 2.0, 3.0);
        let mirrored = normalize(translation, Vector3::new(x, y, z), true, true);
        let unmirrored = normalize(translation, Vector3::new(x, -y, -z), false, true);

        prop_assert_eq!(mirrored.rotation.x, unmirrored.rotation.x);
        prop_assert!(angle_distance(mirrored.rotation.y, unmirrored.rotation.y) < 1e-3);
        prop_assert!(angle_distance(mirrored.rotation.z, unmirrored.rotation.z) < 1e-3);
        prop_assert_eq!(mirrored.translation, unmirrored.translation);
    }

    #[test]
    fn prop_translation_independent_of_flags(
        tx in -100.0f32..100.0, ty in -100.0f32..100.0, tz in -100.0f32..100.0,
        mirrored in any::<bool>(), platform in any::<bool>(),
    ) {
        let pose = normalize(Vector3::new(tx, ty, tz), Vector3::zeros(), mirrored, platform);
        prop_assert_eq!(pose.translation, Vector3::new(-tx, ty, tz));
    }
}
