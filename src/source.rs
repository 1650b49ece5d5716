//! Sequential video frame decoding.
//!
//! [`VideoFrames`] opens a video file and implements [`Iterator`], decoding
//! one frame per call to [`next()`](Iterator::next) and converting it to a
//! packed [`RgbImage`] at the source resolution. Iteration ends when the
//! container is exhausted and the decoder has been drained. The sequence
//! cannot be restarted; open the file again to read it a second time.
//!
//! # Example
//!
//! ```no_run
//! use frametile::VideoFrames;
//!
//! let frames = VideoFrames::open("input.mp4")?;
//! for frame in frames {
//!     let frame = frame?;
//!     println!("{}x{}", frame.width(), frame.height());
//! }
//! # Ok::<(), frametile::FrameTileError>(())
//! ```

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    path::{Path, PathBuf},
};

use ffmpeg_next::{
    Error as FfmpegError, Packet,
    codec::context::Context as CodecContext,
    decoder::Video as VideoDecoder,
    format::{Pixel, context::Input},
    frame::Video as VideoFrame,
    media::Type,
    software::scaling::{Context as ScalingContext, Flags as ScalingFlags},
};
use image::RgbImage;

use crate::error::FrameTileError;

/// A lazy, finite sequence of decoded RGB frames from a video file.
pub struct VideoFrames {
    input_context: Input,
    decoder: VideoDecoder,
    scaler: ScalingContext,
    video_stream_index: usize,
    width: u32,
    height: u32,
    frame_count: u64,
    file_path: PathBuf,
    decoded_frame: VideoFrame,
    rgb_frame: VideoFrame,
    eof_sent: bool,
    done: bool,
}

impl Debug for VideoFrames {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("VideoFrames")
            .field("file_path", &self.file_path)
            .field("video_stream_index", &self.video_stream_index)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("frame_count", &self.frame_count)
            .field("done", &self.done)
            .finish_non_exhaustive()
    }
}

impl VideoFrames {
    /// Open a video file and prepare a decoder for its best video stream.
    ///
    /// Initializes FFmpeg (idempotent) before opening the file.
    ///
    /// # Errors
    ///
    /// - [`FrameTileError::FileOpen`] if the file cannot be opened or FFmpeg
    ///   fails to initialize.
    /// - [`FrameTileError::NoVideoStream`] if the file has no video stream.
    /// - [`FrameTileError::FfmpegError`] if the decoder or pixel converter
    ///   cannot be created.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, FrameTileError> {
        let path = path.as_ref();
        let file_path = path.to_path_buf();

        log::debug!("Opening video file: {}", file_path.display());

        ffmpeg_next::init().map_err(|error| FrameTileError::FileOpen {
            path: file_path.clone(),
            reason: format!("FFmpeg initialisation failed: {error}"),
        })?;

        let input_context =
            ffmpeg_next::format::input(&path).map_err(|error| FrameTileError::FileOpen {
                path: file_path.clone(),
                reason: error.to_string(),
            })?;

        let stream = input_context
            .streams()
            .best(Type::Video)
            .ok_or(FrameTileError::NoVideoStream)?;
        let video_stream_index = stream.index();
        // Containers that do not record a frame count report zero or less.
        let frame_count = u64::try_from(stream.frames()).unwrap_or(0);

        let decoder_context = CodecContext::from_parameters(stream.parameters())?;
        let decoder = decoder_context.decoder().video()?;

        let width = decoder.width();
        let height = decoder.height();
        let scaler = ScalingContext::get(
            decoder.format(),
            width,
            height,
            Pixel::RGB24,
            width,
            height,
            ScalingFlags::BILINEAR,
        )?;

        log::debug!(
            "Video stream {video_stream_index}: {width}x{height}, ~{frame_count} frame(s)"
        );

        Ok(Self {
            input_context,
            decoder,
            scaler,
            video_stream_index,
            width,
            height,
            frame_count,
            file_path,
            decoded_frame: VideoFrame::empty(),
            rgb_frame: VideoFrame::empty(),
            eof_sent: false,
            done: false,
        })
    }

    /// Frame width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Frame height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Frame count recorded by the container, or `0` when unknown.
    ///
    /// This is an estimate; the iterator yields however many frames the
    /// stream actually decodes to.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Convert the current `decoded_frame` to an `RgbImage`.
    fn convert_current_frame(&mut self) -> Result<RgbImage, FrameTileError> {
        self.scaler.run(&self.decoded_frame, &mut self.rgb_frame)?;

        let buffer = packed_rgb(&self.rgb_frame, self.width, self.height);
        RgbImage::from_raw(self.width, self.height, buffer).ok_or_else(|| {
            FrameTileError::VideoDecodeError(
                "Failed to construct RGB image from decoded frame data".to_string(),
            )
        })
    }

    fn fail(&mut self, error: FrameTileError) -> Option<Result<RgbImage, FrameTileError>> {
        self.done = true;
        Some(Err(error))
    }
}

impl Iterator for VideoFrames {
    type Item = Result<RgbImage, FrameTileError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        loop {
            if self.decoder.receive_frame(&mut self.decoded_frame).is_ok() {
                return match self.convert_current_frame() {
                    Ok(image) => Some(Ok(image)),
                    Err(error) => self.fail(error),
                };
            }

            if self.eof_sent {
                self.done = true;
                return None;
            }

            let mut packet = Packet::empty();
            match packet.read(&mut self.input_context) {
                Ok(()) => {
                    if packet.stream() == self.video_stream_index {
                        if let Err(error) = self.decoder.send_packet(&packet) {
                            return self.fail(error.into());
                        }
                    }
                }
                Err(FfmpegError::Eof) => {
                    if let Err(error) = self.decoder.send_eof() {
                        return self.fail(error.into());
                    }
                    self.eof_sent = true;
                }
                Err(error) => return self.fail(read_failure(error)),
            }
        }
    }
}

/// A demuxer read error other than end of file ends the sequence.
fn read_failure(error: FfmpegError) -> FrameTileError {
    log::debug!("Packet read failed: {error}");
    FrameTileError::VideoDecodeError(format!("Failed to read packet: {error}"))
}

/// Copy the RGB plane of `frame` into a tightly packed buffer.
///
/// FFmpeg pads rows to an alignment boundary, so the plane stride can be
/// wider than `width * 3`.
fn packed_rgb(frame: &VideoFrame, width: u32, height: u32) -> Vec<u8> {
    let row_bytes = width as usize * 3;
    let rows = height as usize;
    let stride = frame.stride(0);
    let data = frame.data(0);

    if stride == row_bytes {
        return data[..row_bytes * rows].to_vec();
    }

    data.chunks(stride)
        .take(rows)
        .flat_map(|row| &row[..row_bytes])
        .copied()
        .collect()
}
