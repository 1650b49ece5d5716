//! Progress reporting for pipeline runs.
//!
//! A [`ProgressCallback`] attached through
//! [`PipelineOptions::with_progress`](crate::PipelineOptions::with_progress)
//! receives a [`ProgressInfo`] snapshot after every processed frame.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use frametile::{PipelineOptions, ProgressCallback, ProgressInfo};
//!
//! struct PrintProgress;
//!
//! impl ProgressCallback for PrintProgress {
//!     fn on_progress(&self, info: &ProgressInfo) {
//!         println!("{} frames, {} tiles", info.frames_processed, info.tiles_saved);
//!     }
//! }
//!
//! let options = PipelineOptions::new().with_progress(Arc::new(PrintProgress));
//! ```

use std::time::Duration;

/// A snapshot of pipeline progress.
#[derive(Debug, Clone)]
pub struct ProgressInfo {
    /// Frames fully processed so far (corrected, split, and saved).
    pub frames_processed: u64,
    /// Total frames expected, if the container reports a count.
    pub total_frames: Option<u64>,
    /// Tiles written to the output directory so far.
    pub tiles_saved: u64,
    /// Completion percentage (0.0 – 100.0), if `total_frames` is known.
    pub percentage: Option<f32>,
    /// Wall-clock time elapsed since the run started.
    pub elapsed: Duration,
}

impl ProgressInfo {
    pub(crate) fn new(
        frames_processed: u64,
        total_frames: Option<u64>,
        tiles_saved: u64,
        elapsed: Duration,
    ) -> Self {
        let percentage = total_frames
            .filter(|&total| total > 0)
            .map(|total| (frames_processed as f32 / total as f32 * 100.0).min(100.0));
        Self {
            frames_processed,
            total_frames,
            tiles_saved,
            percentage,
            elapsed,
        }
    }
}

/// Trait for receiving progress updates during a pipeline run.
///
/// Callbacks observe the run but cannot halt it.
pub trait ProgressCallback: Send + Sync {
    /// Called once after each frame has been processed.
    fn on_progress(&self, info: &ProgressInfo);
}

/// Discards all progress notifications. The default callback.
pub(crate) struct NoOpProgress;

impl ProgressCallback for NoOpProgress {
    fn on_progress(&self, _info: &ProgressInfo) {}
}
