//! Benchmarks for the shape emphasis engine

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use face_caricature::{
    emphasis::{EmphasisMode, ShapeEmphasis},
    MeanFaceReference, VertexSet,
};
use nalgebra::Vector3;

fn synthetic_mean() -> MeanFaceReference {
    let vertices = (0..357)
        .map(|i| {
            let angle = (i as f32) * 2.0 * std::f32::consts::PI / 357.0;
            Vector3::new(angle.cos(), angle.sin(), 0.1 * (3.0 * angle).sin())
        })
        .collect::<VertexSet>();
    MeanFaceReference::from_vertices(vertices)
}

fn jittered(mean: &MeanFaceReference) -> VertexSet {
    mean.vertices()
        .iter()
        .map(|p| p + Vector3::new(rand::random::<f32>(), rand::random::<f32>(), rand::random::<f32>()) * 0.05)
        .collect()
}

fn benchmark_deform(c: &mut Criterion) {
    let mut group = c.benchmark_group("deform");

    let mean = synthetic_mean();
    let tracked = jittered(&mean);
    let engine = ShapeEmphasis::default();

    for mode in [
        EmphasisMode::None,
        EmphasisMode::Normal,
        EmphasisMode::Caricature,
        EmphasisMode::RealTexture,
    ] {
        group.bench_with_input(BenchmarkId::from_parameter(mode), &mode, |b, &mode| {
            b.iter(|| {
                let result = engine
                    .deform(black_box(&tracked), black_box(&mean), mode)
                    .expect("Deform failed");
                black_box(result);
            });
        });
    }

    group.finish();
}

fn benchmark_frame_sequence(c: &mut Criterion) {
    let mut group = c.benchmark_group("frame_sequence");

    let mean = synthetic_mean();
    let frames: Vec<VertexSet> = (0..100).map(|_| jittered(&mean)).collect();
    let engine = ShapeEmphasis::default();

    group.bench_function("caricature_100_frames", |b| {
        b.iter(|| {
            for frame in &frames {
                let result = engine
                    .deform(black_box(frame), &mean, EmphasisMode::Caricature)
                    .expect("Deform failed");
                black_box(result);
            }
        });
    });

    group.finish();
}

fn benchmark_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("parsing");

    let text = synthetic_mean().vertices().to_delimited();

    group.bench_function("parse_mean_face", |b| {
        b.iter(|| {
            let parsed = VertexSet::parse_delimited(black_box(&text)).expect("Parse failed");
            black_box(parsed);
        });
    });

    group.finish();
}

criterion_group!(benches, benchmark_deform, benchmark_frame_sequence, benchmark_parsing);
criterion_main!(benches);
