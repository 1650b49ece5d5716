//! Brightness corrector tests.

use frametile::{
    BrightnessCorrector, BrightnessMode, FrameTileError, brightness::correct_brightness,
};
use image::{Rgb, RgbImage};
use rand::{SeedableRng, rngs::StdRng};

fn solid_frame(color: [u8; 3]) -> RgbImage {
    RgbImage::from_pixel(32, 16, Rgb(color))
}

fn max_channel(pixel: &Rgb<u8>) -> u8 {
    pixel.0.into_iter().max().unwrap_or(0)
}

// ── Fixed scale ──────────────────────────────────────────────────

#[test]
fn gray_frame_value_is_scaled() {
    let corrected = correct_brightness(&solid_frame([100, 100, 100]), 1.5);
    assert!(corrected.pixels().all(|pixel| *pixel == Rgb([150, 150, 150])));
}

#[test]
fn value_saturates_at_255() {
    let corrected = correct_brightness(&solid_frame([200, 200, 200]), 2.0);
    assert!(corrected.pixels().all(|pixel| *pixel == Rgb([255, 255, 255])));
}

#[test]
fn colored_frame_value_channel_is_scaled() {
    let cases: [([u8; 3], f32); 5] = [
        ([200, 100, 50], 0.5),
        ([10, 240, 120], 0.8),
        ([30, 60, 90], 1.3),
        ([180, 20, 200], 1.7),
        ([0, 0, 0], 1.2),
    ];

    for (color, scale) in cases {
        let input_value = f32::from(max_channel(&Rgb(color)));
        let expected = (input_value * scale).round().min(255.0) as u8;
        let corrected = correct_brightness(&solid_frame(color), scale);
        for pixel in corrected.pixels() {
            assert_eq!(max_channel(pixel), expected, "{color:?} x {scale}");
        }
    }
}

#[test]
fn hue_ordering_is_preserved() {
    let corrected = correct_brightness(&solid_frame([200, 100, 50]), 0.5);
    let Rgb([red, green, blue]) = *corrected.get_pixel(0, 0);
    assert!(red > green && green > blue);
    assert_eq!(red, 100);
}

#[test]
fn unit_scale_keeps_colors_close() {
    let frame = RgbImage::from_fn(64, 64, |x, y| Rgb([(x * 4) as u8, (y * 4) as u8, 128]));
    let corrected = correct_brightness(&frame, 1.0);
    for (original, result) in frame.pixels().zip(corrected.pixels()) {
        for channel in 0..3 {
            assert!(original.0[channel].abs_diff(result.0[channel]) <= 1);
        }
    }
}

#[test]
fn dimensions_are_unchanged() {
    let frame = solid_frame([1, 2, 3]);
    let corrected = correct_brightness(&frame, 0.9);
    assert_eq!(corrected.dimensions(), frame.dimensions());
}

// ── Validation ───────────────────────────────────────────────────

#[test]
fn non_positive_fixed_scale_is_rejected() {
    for scale in [0.0, -0.5, f32::NAN, f32::INFINITY] {
        let result = BrightnessCorrector::new(BrightnessMode::Fixed(scale));
        assert!(
            matches!(result, Err(FrameTileError::InvalidBrightnessScale(_))),
            "scale {scale} should be rejected",
        );
    }
}

#[test]
fn invalid_ranges_are_rejected() {
    for (start, end) in [(1.3, 0.7), (0.0, 1.0), (-0.5, 1.0)] {
        let result = BrightnessCorrector::new(BrightnessMode::Uniform { start, end });
        assert!(matches!(
            result,
            Err(FrameTileError::InvalidBrightnessRange { .. })
        ));
    }
}

// ── Scale selection ──────────────────────────────────────────────

#[test]
fn fixed_scale_is_returned_every_frame() {
    let corrector = BrightnessCorrector::new(BrightnessMode::Fixed(1.25)).unwrap();
    let mut rng = StdRng::seed_from_u64(1);
    assert!((0..100).all(|_| corrector.next_scale(&mut rng) == 1.25));
}

#[test]
fn random_scale_stays_in_range_and_is_uniform() {
    let corrector = BrightnessCorrector::new(BrightnessMode::default()).unwrap();
    let mut rng = StdRng::seed_from_u64(42);

    const DRAWS: usize = 20_000;
    const BUCKETS: usize = 10;
    let mut counts = [0_usize; BUCKETS];

    for _ in 0..DRAWS {
        let scale = corrector.next_scale(&mut rng);
        assert!((0.7..=1.3).contains(&scale), "scale {scale} out of range");
        let bucket = (((scale - 0.7) / 0.6) * BUCKETS as f32) as usize;
        counts[bucket.min(BUCKETS - 1)] += 1;
    }

    let expected = DRAWS / BUCKETS;
    for (bucket, count) in counts.iter().enumerate() {
        assert!(
            count.abs_diff(expected) < expected / 5,
            "bucket {bucket} has {count} draws, expected about {expected}",
        );
    }
}

#[test]
fn degenerate_range_always_returns_its_bound() {
    let corrector =
        BrightnessCorrector::new(BrightnessMode::Uniform { start: 0.9, end: 0.9 }).unwrap();
    let mut rng = StdRng::seed_from_u64(3);
    assert!((0..100).all(|_| (corrector.next_scale(&mut rng) - 0.9).abs() < f32::EPSILON));
}
