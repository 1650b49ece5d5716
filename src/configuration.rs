//! Pipeline configuration.
//!
//! [`PipelineOptions`] is a builder that carries brightness, tiling, and
//! output settings into a [`Pipeline`](crate::Pipeline). A default-constructed
//! value reproduces the baked-in behavior of the single-argument CLI: a
//! random brightness scale in `0.7..=1.3`, no padding, a split count of 3, and
//! tiles written to `./out`.
//!
//! # Example
//!
//! ```no_run
//! use frametile::{BrightnessMode, PipelineOptions};
//!
//! let options = PipelineOptions::new()
//!     .with_brightness(BrightnessMode::Fixed(1.2))
//!     .with_padding(16, 8)
//!     .with_split_count(4)
//!     .with_output_directory("tiles");
//! options.validate()?;
//! # Ok::<(), frametile::FrameTileError>(())
//! ```

use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::path::PathBuf;
use std::sync::Arc;

use crate::error::FrameTileError;
use crate::progress::{NoOpProgress, ProgressCallback};

/// Split count used when none is configured.
pub const DEFAULT_SPLIT_COUNT: u32 = 3;

/// Lower bound of the default random brightness range.
pub const DEFAULT_BRIGHTNESS_START: f32 = 0.7;

/// Upper bound of the default random brightness range.
pub const DEFAULT_BRIGHTNESS_END: f32 = 1.3;

/// Directory tiles are written to when none is configured.
pub const DEFAULT_OUTPUT_DIRECTORY: &str = "out";

/// Permission bits for a freshly created output directory:
/// `rwx` for user and other, `r` for group.
pub const DEFAULT_DIRECTORY_MODE: u32 = 0o747;

/// How the brightness scale for each frame is chosen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BrightnessMode {
    /// Every frame uses the same scale.
    Fixed(f32),
    /// Each frame draws a new scale uniformly from `start..=end`
    /// at a resolution of 1/10000.
    Uniform {
        /// Lower bound (inclusive).
        start: f32,
        /// Upper bound (inclusive).
        end: f32,
    },
}

impl Default for BrightnessMode {
    fn default() -> Self {
        BrightnessMode::Uniform {
            start: DEFAULT_BRIGHTNESS_START,
            end: DEFAULT_BRIGHTNESS_END,
        }
    }
}

impl BrightnessMode {
    /// Check that the scale (or both range bounds) is finite and positive.
    ///
    /// # Errors
    ///
    /// - [`FrameTileError::InvalidBrightnessScale`] for a fixed scale `<= 0`.
    /// - [`FrameTileError::InvalidBrightnessRange`] for a range with
    ///   `start <= 0` or `start > end`.
    pub fn validate(&self) -> Result<(), FrameTileError> {
        match *self {
            BrightnessMode::Fixed(scale) => {
                if !scale.is_finite() || scale <= 0.0 {
                    return Err(FrameTileError::InvalidBrightnessScale(scale));
                }
            }
            BrightnessMode::Uniform { start, end } => {
                if !start.is_finite() || !end.is_finite() || start <= 0.0 || start > end {
                    return Err(FrameTileError::InvalidBrightnessRange { start, end });
                }
            }
        }
        Ok(())
    }
}

/// Padding and split count for the tile splitter.
///
/// `padding_x` is excluded from the left edge and `padding_y` from the top
/// edge of each frame. See [`plan_tiles`](crate::tiling::plan_tiles) for how
/// these combine into tile geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitOptions {
    /// Horizontal padding in pixels.
    pub padding_x: u32,
    /// Vertical padding in pixels.
    pub padding_y: u32,
    /// How finely the frame's excess dimension is divided into strides.
    pub split_count: u32,
}

impl Default for SplitOptions {
    fn default() -> Self {
        Self {
            padding_x: 0,
            padding_y: 0,
            split_count: DEFAULT_SPLIT_COUNT,
        }
    }
}

impl SplitOptions {
    /// Create split options with explicit padding and split count.
    pub fn new(padding_x: u32, padding_y: u32, split_count: u32) -> Self {
        Self {
            padding_x,
            padding_y,
            split_count,
        }
    }

    /// Same options with the padding axes swapped.
    ///
    /// Splitting a transposed frame with these options yields the transposed
    /// tiles of the original.
    pub fn transposed(self) -> Self {
        Self {
            padding_x: self.padding_y,
            padding_y: self.padding_x,
            split_count: self.split_count,
        }
    }
}

/// Where and how tiles are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputOptions {
    /// Output directory, created on demand.
    pub directory: PathBuf,
    /// String prepended to every file name.
    pub prefix: String,
    /// Unix permission bits for a newly created directory (ignored elsewhere).
    pub directory_mode: u32,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            directory: PathBuf::from(DEFAULT_OUTPUT_DIRECTORY),
            prefix: String::new(),
            directory_mode: DEFAULT_DIRECTORY_MODE,
        }
    }
}

/// Configuration for a [`Pipeline`](crate::Pipeline).
#[derive(Clone)]
pub struct PipelineOptions {
    pub(crate) brightness: BrightnessMode,
    pub(crate) split: SplitOptions,
    pub(crate) output: OutputOptions,
    pub(crate) progress: Arc<dyn ProgressCallback>,
}

impl Debug for PipelineOptions {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("PipelineOptions")
            .field("brightness", &self.brightness)
            .field("split", &self.split)
            .field("output", &self.output)
            .finish_non_exhaustive()
    }
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineOptions {
    /// Create options with the default brightness range, split count, and
    /// output directory.
    pub fn new() -> Self {
        Self {
            brightness: BrightnessMode::default(),
            split: SplitOptions::default(),
            output: OutputOptions::default(),
            progress: Arc::new(NoOpProgress),
        }
    }

    /// Set the brightness mode.
    #[must_use]
    pub fn with_brightness(mut self, brightness: BrightnessMode) -> Self {
        self.brightness = brightness;
        self
    }

    /// Set horizontal and vertical padding.
    #[must_use]
    pub fn with_padding(mut self, padding_x: u32, padding_y: u32) -> Self {
        self.split.padding_x = padding_x;
        self.split.padding_y = padding_y;
        self
    }

    /// Set the split count.
    #[must_use]
    pub fn with_split_count(mut self, split_count: u32) -> Self {
        self.split.split_count = split_count;
        self
    }

    /// Replace the complete split configuration.
    #[must_use]
    pub fn with_split(mut self, split: SplitOptions) -> Self {
        self.split = split;
        self
    }

    /// Set the output directory.
    #[must_use]
    pub fn with_output_directory<P: Into<PathBuf>>(mut self, directory: P) -> Self {
        self.output.directory = directory.into();
        self
    }

    /// Set the file name prefix.
    #[must_use]
    pub fn with_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.output.prefix = prefix.into();
        self
    }

    /// Set the permission bits used when creating the output directory.
    #[must_use]
    pub fn with_directory_mode(mut self, mode: u32) -> Self {
        self.output.directory_mode = mode;
        self
    }

    /// Attach a progress callback.
    #[must_use]
    pub fn with_progress(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress = callback;
        self
    }

    /// The configured brightness mode.
    pub fn brightness(&self) -> BrightnessMode {
        self.brightness
    }

    /// The configured split options.
    pub fn split(&self) -> SplitOptions {
        self.split
    }

    /// The configured output options.
    pub fn output(&self) -> &OutputOptions {
        &self.output
    }

    /// Validate the options without touching the filesystem or any video.
    ///
    /// # Errors
    ///
    /// Returns the brightness errors of [`BrightnessMode::validate`], or
    /// [`FrameTileError::InvalidSplitCount`] when the split count is zero.
    pub fn validate(&self) -> Result<(), FrameTileError> {
        self.brightness.validate()?;
        if self.split.split_count == 0 {
            return Err(FrameTileError::InvalidSplitCount);
        }
        Ok(())
    }
}
