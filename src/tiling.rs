//! Square tile decomposition of a frame.
//!
//! A frame is cut into overlapping square windows that slide along its long
//! axis. The window side is the short axis minus its padding, and the window
//! advances by `(long - short - padding) / split_count` pixels each step.
//! Windows are emitted until the next one would reach the far edge of the
//! frame, so the number of tiles follows from the stride and is usually not
//! equal to `split_count`.
//!
//! A 300x100 frame with no padding and a split count of 3 has side 100 and
//! stride 66, giving windows at x = 0, 66, 132 and 198:
//!
//! ```
//! use frametile::{SplitOptions, tiling::plan_tiles};
//!
//! let regions = plan_tiles(300, 100, &SplitOptions::new(0, 0, 3))?;
//! let xs: Vec<u32> = regions.iter().map(|region| region.x).collect();
//! assert_eq!(xs, vec![0, 66, 132, 198]);
//! # Ok::<(), frametile::FrameTileError>(())
//! ```

use image::{RgbImage, imageops};

use crate::{configuration::SplitOptions, error::FrameTileError};

/// Which axis the tile window slides along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Wide or square frame: the window slides left to right.
    Horizontal,
    /// Tall frame: the window slides top to bottom.
    Vertical,
}

impl Orientation {
    /// Pick the orientation for a frame of the given size.
    ///
    /// Frames with an aspect ratio of at least 1 are tiled horizontally.
    pub fn for_frame(width: u32, height: u32) -> Self {
        if width >= height {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        }
    }
}

/// A square region of a frame, in pixel coordinates of its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileRegion {
    /// Left edge.
    pub x: u32,
    /// Top edge.
    pub y: u32,
    /// Width and height.
    pub side: u32,
}

impl TileRegion {
    /// The same region in a transposed frame.
    pub fn transposed(self) -> Self {
        Self {
            x: self.y,
            y: self.x,
            side: self.side,
        }
    }
}

/// Compute the tile regions for a `width` x `height` frame, in scan order.
///
/// Returns an empty list when even the first window does not fit before the
/// far edge (a square frame, for example).
///
/// # Errors
///
/// - [`FrameTileError::InvalidSplitCount`] if `split_count` is zero.
/// - [`FrameTileError::PaddingExceedsFrame`] if padding leaves a tile side of
///   zero or less.
/// - [`FrameTileError::DegenerateStride`] if at least one window fits but the
///   stride is not positive, which would never advance the window.
pub fn plan_tiles(
    width: u32,
    height: u32,
    options: &SplitOptions,
) -> Result<Vec<TileRegion>, FrameTileError> {
    if options.split_count == 0 {
        return Err(FrameTileError::InvalidSplitCount);
    }

    let planned = match Orientation::for_frame(width, height) {
        Orientation::Horizontal => plan_along_width(width, height, options),
        // A tall frame is tiled as its transpose would be, then mapped back.
        Orientation::Vertical => {
            plan_along_width(height, width, &options.transposed()).map(|regions| {
                regions.into_iter().map(TileRegion::transposed).collect()
            })
        }
    };

    planned.map_err(|error| match error {
        // Report the caller's frame, not the transposed one.
        FrameTileError::PaddingExceedsFrame { .. } => FrameTileError::PaddingExceedsFrame {
            width,
            height,
            padding_x: options.padding_x,
            padding_y: options.padding_y,
        },
        FrameTileError::DegenerateStride { stride, .. } => FrameTileError::DegenerateStride {
            width,
            height,
            split_count: options.split_count,
            stride,
        },
        other => other,
    })
}

fn plan_along_width(
    cols: u32,
    rows: u32,
    options: &SplitOptions,
) -> Result<Vec<TileRegion>, FrameTileError> {
    let cols_signed = i64::from(cols);
    let rows_signed = i64::from(rows);
    let padding_x = i64::from(options.padding_x);
    let padding_y = i64::from(options.padding_y);

    let side = rows_signed - padding_y;
    if side <= 0 {
        return Err(FrameTileError::PaddingExceedsFrame {
            width: cols,
            height: rows,
            padding_x: options.padding_x,
            padding_y: options.padding_y,
        });
    }

    // Truncates toward zero, so a small negative excess yields a zero stride.
    let stride = (cols_signed - rows_signed - padding_x) / i64::from(options.split_count);
    let fits = |offset: i64| offset + side + padding_x < cols_signed;

    if !fits(0) {
        return Ok(Vec::new());
    }
    if stride <= 0 {
        return Err(FrameTileError::DegenerateStride {
            width: cols,
            height: rows,
            split_count: options.split_count,
            stride,
        });
    }

    let mut regions = Vec::new();
    let mut offset = 0_i64;
    while fits(offset) {
        // Bounded by `cols` and `rows`, so these fit in u32.
        regions.push(TileRegion {
            x: (offset + padding_x) as u32,
            y: options.padding_y,
            side: side as u32,
        });
        offset += stride;
    }
    Ok(regions)
}

/// Cut a frame into owned square tiles.
///
/// Each tile is an independent copy of its region; the frame may be dropped
/// as soon as this returns.
///
/// # Errors
///
/// Returns the same errors as [`plan_tiles`].
pub fn split_frame(
    frame: &RgbImage,
    options: &SplitOptions,
) -> Result<Vec<RgbImage>, FrameTileError> {
    let regions = plan_tiles(frame.width(), frame.height(), options)?;
    log::trace!(
        "Splitting {}x{} frame into {} tile(s)",
        frame.width(),
        frame.height(),
        regions.len(),
    );
    Ok(regions
        .iter()
        .map(|region| {
            imageops::crop_imm(frame, region.x, region.y, region.side, region.side).to_image()
        })
        .collect())
}
