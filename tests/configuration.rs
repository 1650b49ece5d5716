//! PipelineOptions, BrightnessMode, and SplitOptions tests.

use std::path::Path;

use frametile::{BrightnessMode, FrameTileError, PipelineOptions, SplitOptions};

// ── PipelineOptions builder ──────────────────────────────────────

#[test]
fn config_defaults() {
    let options = PipelineOptions::new();
    assert_eq!(
        options.brightness(),
        BrightnessMode::Uniform {
            start: 0.7,
            end: 1.3
        }
    );
    assert_eq!(options.split(), SplitOptions::new(0, 0, 3));
    assert_eq!(options.output().directory, Path::new("out"));
    assert!(options.validate().is_ok());

    let debug = format!("{options:?}");
    assert!(debug.contains("PipelineOptions"));
    assert!(debug.contains("split_count: 3"));
}

#[test]
fn config_builder_overrides() {
    let options = PipelineOptions::new()
        .with_brightness(BrightnessMode::Fixed(0.8))
        .with_padding(12, 34)
        .with_split_count(6)
        .with_output_directory("tiles")
        .with_prefix("run1_")
        .with_directory_mode(0o755);

    assert_eq!(options.brightness(), BrightnessMode::Fixed(0.8));
    assert_eq!(options.split(), SplitOptions::new(12, 34, 6));
    assert_eq!(options.output().directory, Path::new("tiles"));
    assert_eq!(options.output().prefix, "run1_");
    assert_eq!(options.output().directory_mode, 0o755);
}

#[test]
fn config_with_split_replaces_everything() {
    let options = PipelineOptions::new()
        .with_padding(1, 2)
        .with_split(SplitOptions::new(5, 6, 7));
    assert_eq!(options.split(), SplitOptions::new(5, 6, 7));
}

// ── Validation ───────────────────────────────────────────────────

#[test]
fn validate_rejects_zero_split_count() {
    let options = PipelineOptions::new().with_split_count(0);
    assert!(matches!(
        options.validate(),
        Err(FrameTileError::InvalidSplitCount)
    ));
}

#[test]
fn validate_rejects_bad_brightness() {
    let options = PipelineOptions::new().with_brightness(BrightnessMode::Fixed(-1.0));
    let error = options.validate().unwrap_err();
    assert!(
        error.to_string().contains("Invalid brightness scale"),
        "unexpected message: {error}",
    );

    let options = PipelineOptions::new().with_brightness(BrightnessMode::Uniform {
        start: 1.5,
        end: 1.0,
    });
    assert!(matches!(
        options.validate(),
        Err(FrameTileError::InvalidBrightnessRange { .. })
    ));
}

#[test]
fn split_options_transpose_swaps_padding() {
    let options = SplitOptions::new(3, 9, 4).transposed();
    assert_eq!(options, SplitOptions::new(9, 3, 4));
}
