//! # frametile
//!
//! Turn a video into a dataset of square image tiles.
//!
//! Every decoded frame has its brightness rescaled in HSV space, is cut into
//! overlapping square tiles along its long axis, and each tile is rotated by
//! a random multiple of 90° before being written as a PNG. Decoding is done
//! by FFmpeg via [`ffmpeg-next`](https://crates.io/crates/ffmpeg-next); tiles
//! are [`image::RgbImage`] values.
//!
//! ## Quick Start
//!
//! ```no_run
//! use frametile::{BrightnessMode, Pipeline, PipelineOptions, VideoFrames};
//!
//! let options = PipelineOptions::new()
//!     .with_brightness(BrightnessMode::Fixed(1.1))
//!     .with_padding(0, 0)
//!     .with_split_count(3)
//!     .with_output_directory("out");
//!
//! let mut pipeline = Pipeline::new(options)?;
//! let summary = pipeline.run_video(VideoFrames::open("input.mp4")?)?;
//! println!("{} tiles from {} frames", summary.tiles, summary.frames);
//! # Ok::<(), frametile::FrameTileError>(())
//! ```
//!
//! ## Building blocks
//!
//! The stages can be used on their own:
//!
//! - [`brightness::correct_brightness`]: scale the HSV value channel
//! - [`tiling::plan_tiles`] / [`tiling::split_frame`]: square tile geometry
//! - [`Rotation`]: right-angle tile rotation
//! - [`ImageStore`]: `{prefix}{unix_seconds}_{index}.png` persistence
//!
//! ## Requirements
//!
//! FFmpeg development libraries must be installed on the system.

pub mod augment;
pub mod brightness;
pub mod configuration;
pub mod error;
pub mod ffmpeg;
pub mod pipeline;
pub mod progress;
pub mod source;
pub mod store;
pub mod tiling;

pub use augment::Rotation;
pub use brightness::BrightnessCorrector;
pub use configuration::{BrightnessMode, OutputOptions, PipelineOptions, SplitOptions};
pub use error::FrameTileError;
pub use ffmpeg::{FfmpegLogLevel, set_ffmpeg_log_level};
pub use pipeline::{Pipeline, RunSummary};
pub use progress::{ProgressCallback, ProgressInfo};
pub use source::VideoFrames;
pub use store::ImageStore;
pub use tiling::{Orientation, TileRegion};
