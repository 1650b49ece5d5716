//! Benchmarks for the per-frame stages.
//!
//! Run with: cargo bench

use criterion::{Criterion, criterion_group, criterion_main};
use frametile::{
    Rotation, SplitOptions,
    brightness::correct_brightness,
    tiling::{plan_tiles, split_frame},
};
use image::{Rgb, RgbImage};
use rand::{SeedableRng, rngs::StdRng};

fn hd_frame() -> RgbImage {
    RgbImage::from_fn(1920, 1080, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
    })
}

fn benchmark_tiling(criterion: &mut Criterion) {
    let frame = hd_frame();
    let options = SplitOptions::new(0, 0, 3);

    criterion.bench_function("plan tiles (1080p)", |bencher| {
        bencher.iter(|| plan_tiles(1920, 1080, &options).unwrap());
    });

    criterion.bench_function("split frame (1080p, split 3)", |bencher| {
        bencher.iter(|| split_frame(&frame, &options).unwrap());
    });
}

fn benchmark_brightness(criterion: &mut Criterion) {
    let frame = hd_frame();

    criterion.bench_function("correct brightness (1080p)", |bencher| {
        bencher.iter(|| correct_brightness(&frame, 1.2));
    });
}

fn benchmark_rotation(criterion: &mut Criterion) {
    let tile = RgbImage::from_pixel(1080, 1080, Rgb([40, 80, 120]));
    let mut rng = StdRng::seed_from_u64(0);

    criterion.bench_function("random rotation (1080x1080 tile)", |bencher| {
        bencher.iter(|| Rotation::random(&mut rng).apply(tile.clone()));
    });
}

criterion_group!(
    benches,
    benchmark_tiling,
    benchmark_brightness,
    benchmark_rotation
);
criterion_main!(benches);
