//! Benchmarks for the layered renderer.
//!
//! Run with: cargo bench --package renderer --bench render_benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use renderer::{LayerKind, LayeredRenderer, RenderInputs};
use std::sync::Arc;
use test_utils::{generate_cyclone, sample_coastline, utc};
use typhoon_common::{MapConfig, Viewport};

fn inputs(storms: usize, points: usize) -> RenderInputs {
    RenderInputs {
        cyclones: Arc::new((0..storms as i64).map(|id| generate_cyclone(id, points)).collect()),
        coastline: Some(Arc::new(sample_coastline())),
        viewer_location: None,
        viewport: Viewport::default(),
        show_satellite: false,
        query_time: None,
    }
}

fn bench_full_pass(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_pass");

    for &(storms, points) in &[(1, 20), (3, 40), (5, 120)] {
        let i = inputs(storms, points);
        group.bench_with_input(
            BenchmarkId::new("storms_points", format!("{}x{}", storms, points)),
            &i,
            |b, i| {
                b.iter(|| {
                    let mut r = LayeredRenderer::new(MapConfig::default(), None).unwrap();
                    black_box(r.render_at(i, utc(2024, 9, 2, 0, 0)).unwrap())
                })
            },
        );
    }

    group.finish();
}

fn bench_scrub_step(c: &mut Criterion) {
    let mut r = LayeredRenderer::new(MapConfig::default(), None).unwrap();
    let mut i = inputs(3, 40);
    let start = utc(2024, 9, 1, 0, 0);
    r.render_at(&i, start).unwrap();

    let mut hour = 0i64;
    c.bench_function("scrub_one_hour", |b| {
        b.iter(|| {
            hour = (hour + 1) % 240;
            i.query_time = Some(start + chrono::Duration::hours(hour));
            black_box(r.render_at(&i, start).unwrap())
        })
    });
}

fn bench_composite(c: &mut Criterion) {
    let mut r = LayeredRenderer::new(MapConfig::default(), None).unwrap();
    r.render_at(&inputs(3, 40), utc(2024, 9, 2, 0, 0)).unwrap();

    c.bench_function("composite_1000x1000", |b| b.iter(|| black_box(r.composite().unwrap())));
    c.bench_function("encode_png_track", |b| {
        b.iter(|| black_box(r.surface(LayerKind::Track).encode_png().unwrap()))
    });
}

criterion_group!(benches, bench_full_pass, bench_scrub_step, bench_composite);
criterion_main!(benches);
