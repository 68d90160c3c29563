//! Property tests for the shape emphasis engine


use face_caricature::{
    emphasis::{deform, EmphasisCoefficients, EmphasisMode, ShapeEmphasis},
    regions::{is_mouth_interior, MOUTH_INTERIOR},
    MeanFaceReference, VertexSet,
};
use nalgebra::Vector3;
use proptest::prelude::*;
use test_helpers::{grid_face, grid_mean, shifted};

const ALL_MODES: [EmphasisMode; 4] = [
    EmphasisMode::None,
    EmphasisMode::Normal,
    EmphasisMode::Caricature,
    EmphasisMode::RealTexture,
];

/// A face-sized vertex set with bounded coordinates
fn arb_face() -> impl Strategy<Value = VertexSet> {
    proptest::collection::vec(-100.0f32..100.0, 357 * 3).prop_map(|flat| VertexSet::from_flat(&flat).unwrap())
}

#[test]
fn test_none_mode_only_offsets_depth() {
    let mean = grid_mean();
    let tracked = shifted(&grid_face(), Vector3::new(0.5, -1.0, 2.0));

    let out = deform(&tracked, &mean, EmphasisMode::None).unwrap();

    for (o, t) in out.iter().zip(tracked.iter()) {
        assert_eq!(o.x, t.x);
        assert_eq!(o.y, t.y);
        assert_eq!(o.z, t.z + 1000.0);
    }
}

#[test]
fn test_caricature_moves_away_from_mean() {
    let mean = grid_mean();
    let tracked = shifted(&grid_face(), Vector3::new(1.0, 0.0, 0.0));

    let out = deform(&tracked, &mean, EmphasisMode::Caricature).unwrap();

    // Vertex 1 belongs to no region, so only the global pass applies:
    // t - (m - t) * 1.4 with m - t = -1 on x
    assert!((out[1].x - (tracked[1].x + 1.4)).abs() < 1e-5);
    assert_eq!(out[1].y, tracked[1].y);
    assert_eq!(out[1].z, tracked[1].z);
}

#[test]
fn test_real_texture_deforms_like_caricature() {
    let mean = grid_mean();
    let tracked = shifted(&grid_face(), Vector3::new(0.5, 0.5, -0.5));

    let caricature = deform(&tracked, &mean, EmphasisMode::Caricature).unwrap();
    let real_texture = deform(&tracked, &mean, EmphasisMode::RealTexture).unwrap();

    assert_eq!(caricature, real_texture);
}

#[test]
fn test_mouth_interior_survives_every_deforming_mode() {
    let mean = grid_mean();
    let tracked = shifted(&grid_face(), Vector3::new(3.0, -2.0, 1.0));

    for mode in [EmphasisMode::Normal, EmphasisMode::Caricature, EmphasisMode::RealTexture] {
        let out = deform(&tracked, &mean, mode).unwrap();
        for &j in MOUTH_INTERIOR {
            assert_eq!(out[j], tracked[j], "mouth vertex {j} moved in {mode} mode");
        }
    }
}

#[test]
fn test_zero_weights_match_normal_mode() {
    let mean = grid_mean();
    let tracked = shifted(&grid_face(), Vector3::new(-1.5, 2.5, 0.5));

    let zero_engine = ShapeEmphasis::new(EmphasisCoefficients::ZERO, 1000.0);
    let caricature_with_zero = zero_engine.deform(&tracked, &mean, EmphasisMode::Caricature).unwrap();
    let normal = deform(&tracked, &mean, EmphasisMode::Normal).unwrap();

    assert_eq!(caricature_with_zero, normal);
    assert_eq!(normal, tracked);
}

#[test]
fn test_mean_length_must_match() {
    let mean = MeanFaceReference::from_vertices(grid_face().into_inner().into_iter().take(356).collect());
    for mode in ALL_MODES {
        assert!(deform(&grid_face(), &mean, mode).is_err());
    }
}

proptest! {
    #[test]
    fn prop_output_length_matches_input(tracked in arb_face()) {
        let mean = grid_mean();
        for mode in ALL_MODES {
            prop_assert_eq!(deform(&tracked, &mean, mode).unwrap().len(), tracked.len());
        }
    }

    #[test]
    fn prop_normal_mode_is_identity(tracked in arb_face()) {
        let out = deform(&tracked, &grid_mean(), EmphasisMode::Normal).unwrap();
        prop_assert_eq!(out, tracked);
    }

    #[test]
    fn prop_none_mode_adds_depth_offset(tracked in arb_face()) {
        let out = deform(&tracked, &grid_mean(), EmphasisMode::None).unwrap();
        for (o, t) in out.iter().zip(tracked.iter()) {
            prop_assert_eq!(o.x, t.x);
            prop_assert_eq!(o.y, t.y);
            prop_assert_eq!(o.z, t.z + 1000.0);
        }
    }

    #[test]
    fn prop_mouth_interior_untouched(tracked in arb_face()) {
        let out = deform(&tracked, &grid_mean(), EmphasisMode::Caricature).unwrap();
        for j in (0..tracked.len()).filter(|&j| is_mouth_interior(j)) {
            prop_assert_eq!(out[j], tracked[j]);
        }
    }

    #[test]
    fn prop_zero_deviation_is_fixed_point(face in arb_face()) {
        let mean = MeanFaceReference::from_vertices(face.clone());
        for mode in [EmphasisMode::Normal, EmphasisMode::Caricature, EmphasisMode::RealTexture] {
            prop_assert_eq!(deform(&face, &mean, mode).unwrap(), face.clone());
        }
    }
}
