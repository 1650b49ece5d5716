//! Error types for the `frametile` crate.
//!
//! This module defines [`FrameTileError`], the unified error type returned by
//! every fallible operation in the crate: option validation, video decoding,
//! tiling geometry, and tile persistence.

use std::path::PathBuf;

use ffmpeg_next::Error as FfmpegError;
use image::ImageError;
use thiserror::Error;

/// The unified error type for all `frametile` operations.
///
/// Validation variants are produced before any resource is opened, so a run
/// that fails on them has performed no work.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FrameTileError {
    /// The video file could not be opened.
    #[error("Failed to open video file at {path}: {reason}")]
    FileOpen {
        /// Path that was passed to [`crate::VideoFrames::open`].
        path: PathBuf,
        /// Underlying reason the open failed.
        reason: String,
    },

    /// The file does not contain a video stream.
    #[error("No video stream found in file")]
    NoVideoStream,

    /// A video frame could not be decoded.
    #[error("Failed to decode video frame: {0}")]
    VideoDecodeError(String),

    /// A fixed brightness scale was zero, negative, or not finite.
    #[error("Invalid brightness scale: {0}")]
    InvalidBrightnessScale(f32),

    /// A random brightness range was empty, reversed, or not strictly positive.
    #[error("Invalid brightness range: start ({start}) must be > 0 and <= end ({end})")]
    InvalidBrightnessRange {
        /// Lower bound of the range.
        start: f32,
        /// Upper bound of the range.
        end: f32,
    },

    /// A split count of zero was provided.
    #[error("Split count must be greater than zero")]
    InvalidSplitCount,

    /// Padding consumes the whole short side of the frame.
    #[error(
        "Padding ({padding_x}x{padding_y}) leaves no room for a tile in a {width}x{height} frame"
    )]
    PaddingExceedsFrame {
        /// Frame width in pixels.
        width: u32,
        /// Frame height in pixels.
        height: u32,
        /// Horizontal padding.
        padding_x: u32,
        /// Vertical padding.
        padding_y: u32,
    },

    /// The tile window would never advance across the frame.
    #[error(
        "Degenerate stride {stride} for a {width}x{height} frame (split count {split_count}); \
         the tile window would not advance"
    )]
    DegenerateStride {
        /// Frame width in pixels.
        width: u32,
        /// Frame height in pixels.
        height: u32,
        /// Requested split count.
        split_count: u32,
        /// The computed stride.
        stride: i64,
    },

    /// An error originating from the FFmpeg libraries.
    #[error("FFmpeg error: {0}")]
    FfmpegError(String),

    /// An error from the `image` crate while encoding a tile.
    #[error("Image processing error: {0}")]
    ImageError(#[from] ImageError),
}

impl From<FfmpegError> for FrameTileError {
    fn from(error: FfmpegError) -> Self {
        FrameTileError::FfmpegError(error.to_string())
    }
}
