//! Frame-to-tiles pipeline.
//!
//! [`Pipeline`] runs every frame through the same fixed sequence, fully and in
//! order, before looking at the next frame:
//!
//! 1. brightness correction ([`BrightnessCorrector`]),
//! 2. square tiling ([`split_frame`]),
//! 3. a random [`Rotation`] drawn independently for each tile,
//! 4. persistence through the [`ImageStore`].
//!
//! One random generator feeds both the brightness draw and the rotation
//! draws. [`Pipeline::new`] seeds it from system entropy; tests pass a
//! seeded generator to [`Pipeline::with_rng`].

use std::time::Instant;

use image::RgbImage;
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{
    augment::Rotation,
    brightness::BrightnessCorrector,
    configuration::PipelineOptions,
    error::FrameTileError,
    progress::ProgressInfo,
    source::VideoFrames,
    store::ImageStore,
    tiling::{plan_tiles, split_frame},
};

/// Totals for a completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    /// Frames read and processed.
    pub frames: u64,
    /// Tiles written.
    pub tiles: u64,
}

/// Turns frames into rotated, brightness-corrected square tiles on disk.
pub struct Pipeline<R: Rng = StdRng> {
    options: PipelineOptions,
    corrector: BrightnessCorrector,
    store: ImageStore,
    rng: R,
}

impl Pipeline<StdRng> {
    /// Create a pipeline seeded from system entropy.
    ///
    /// Validates `options` before the output directory is created.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`PipelineOptions::validate`].
    pub fn new(options: PipelineOptions) -> Result<Self, FrameTileError> {
        Self::with_rng(options, StdRng::from_entropy())
    }
}

impl<R: Rng> Pipeline<R> {
    /// Create a pipeline that draws from `rng`.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`PipelineOptions::validate`].
    pub fn with_rng(options: PipelineOptions, rng: R) -> Result<Self, FrameTileError> {
        options.validate()?;
        let corrector = BrightnessCorrector::new(options.brightness)?;
        let store = ImageStore::create(options.output.clone());
        Ok(Self {
            options,
            corrector,
            store,
            rng,
        })
    }

    /// The options this pipeline was built with.
    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// The image store, for inspecting the output directory and index.
    pub fn store(&self) -> &ImageStore {
        &self.store
    }

    /// Correct, split, rotate, and save one frame. Returns the tile count.
    ///
    /// # Errors
    ///
    /// Returns tiling errors from [`split_frame`] or write errors from
    /// [`ImageStore::save`]. Tiles saved before a write error stay on disk.
    pub fn process_frame(&mut self, frame: RgbImage) -> Result<usize, FrameTileError> {
        let corrected = self.corrector.correct(&frame, &mut self.rng);
        drop(frame);

        let tiles = split_frame(&corrected, &self.options.split)?;
        let count = tiles.len();
        for tile in tiles {
            let rotation = Rotation::random(&mut self.rng);
            log::trace!("Tile {} rotation {rotation:?}", self.store.next_index());
            self.store.save(&rotation.apply(tile))?;
        }
        Ok(count)
    }

    /// Process every frame of `frames` in order.
    ///
    /// Stops at the first error, whether it comes from the source or from
    /// processing. The progress total is taken from an exact `size_hint`.
    ///
    /// # Errors
    ///
    /// Returns the first source or processing error.
    pub fn run<I>(&mut self, frames: I) -> Result<RunSummary, FrameTileError>
    where
        I: IntoIterator<Item = Result<RgbImage, FrameTileError>>,
    {
        let frames = frames.into_iter();
        let total = match frames.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(upper as u64),
            _ => None,
        };
        self.run_with_total(frames, total)
    }

    /// Process a decoded video.
    ///
    /// The tiling geometry is checked against the video's dimensions before
    /// the first frame is decoded, so bad padding or split settings fail
    /// without writing anything.
    ///
    /// # Errors
    ///
    /// Returns tiling errors for the video's frame size, or the first
    /// decoding or processing error.
    pub fn run_video(&mut self, video: VideoFrames) -> Result<RunSummary, FrameTileError> {
        let planned = plan_tiles(video.width(), video.height(), &self.options.split)?;
        log::info!(
            "Tiling {}x{} video into {} tile(s) per frame",
            video.width(),
            video.height(),
            planned.len(),
        );

        let total = Some(video.frame_count()).filter(|&count| count > 0);
        self.run_with_total(video, total)
    }

    fn run_with_total<I>(
        &mut self,
        frames: I,
        total_frames: Option<u64>,
    ) -> Result<RunSummary, FrameTileError>
    where
        I: Iterator<Item = Result<RgbImage, FrameTileError>>,
    {
        let started = Instant::now();
        let mut summary = RunSummary::default();

        for frame in frames {
            let tiles = self.process_frame(frame?)?;
            summary.frames += 1;
            summary.tiles += tiles as u64;

            self.options.progress.on_progress(&ProgressInfo::new(
                summary.frames,
                total_frames,
                summary.tiles,
                started.elapsed(),
            ));
        }

        log::info!(
            "Saved {} tile(s) from {} frame(s) to {} in {:.2?}",
            summary.tiles,
            summary.frames,
            self.store.directory().display(),
            started.elapsed(),
        );
        Ok(summary)
    }
}
