//! Persistence of tiles as PNG files.
//!
//! [`ImageStore`] owns the output directory and a per-process index. File
//! names combine the current Unix time with the index, which starts at zero
//! and grows by one per saved tile. The index is never persisted, so names
//! are only unique within a run (and across runs through the timestamp).

use std::{
    fs::DirBuilder,
    io::ErrorKind,
    path::{Path, PathBuf},
    time::{SystemTime, UNIX_EPOCH},
};

#[cfg(unix)]
use std::os::unix::fs::DirBuilderExt;

use image::{ImageFormat, RgbImage};

use crate::{configuration::OutputOptions, error::FrameTileError};

/// Build the file name for a tile: `{prefix}{unix_seconds}_{index}.png`.
///
/// # Example
///
/// ```
/// use frametile::store::tile_file_name;
///
/// assert_eq!(tile_file_name("", 1_700_000_000, 7), "1700000000_7.png");
/// assert_eq!(tile_file_name("cam0_", 5, 0), "cam0_5_0.png");
/// ```
pub fn tile_file_name(prefix: &str, unix_seconds: u64, index: u64) -> String {
    format!("{prefix}{unix_seconds}_{index}.png")
}

/// Writes tiles into the output directory under increasing indices.
#[derive(Debug)]
pub struct ImageStore {
    options: OutputOptions,
    next_index: u64,
}

impl ImageStore {
    /// Prepare the output directory and start a fresh index at zero.
    ///
    /// A directory that cannot be created (usually because it already
    /// exists) is not an error here; a genuinely unusable directory surfaces
    /// on the first [`save`](ImageStore::save).
    pub fn create(options: OutputOptions) -> Self {
        match create_directory(&options.directory, options.directory_mode) {
            Ok(()) => log::debug!("Created output directory {}", options.directory.display()),
            Err(error) if error.kind() == ErrorKind::AlreadyExists => {}
            Err(error) => log::warn!(
                "Could not create output directory {}: {error}",
                options.directory.display(),
            ),
        }

        Self {
            options,
            next_index: 0,
        }
    }

    /// The output directory.
    pub fn directory(&self) -> &Path {
        &self.options.directory
    }

    /// The index the next saved tile will receive.
    ///
    /// Equal to the number of tiles saved so far.
    pub fn next_index(&self) -> u64 {
        self.next_index
    }

    /// Write `tile` as a PNG and return its path.
    ///
    /// The index advances only when the write succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`FrameTileError::ImageError`] if the file cannot be encoded or
    /// written.
    pub fn save(&mut self, tile: &RgbImage) -> Result<PathBuf, FrameTileError> {
        let file_name = tile_file_name(&self.options.prefix, unix_seconds(), self.next_index);
        let path = self.options.directory.join(file_name);

        tile.save_with_format(&path, ImageFormat::Png)?;
        log::trace!("Saved tile {} -> {}", self.next_index, path.display());

        self.next_index += 1;
        Ok(path)
    }
}

fn unix_seconds() -> u64 {
    // A clock before 1970 is reported as the epoch itself.
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or(0)
}

#[cfg(unix)]
fn create_directory(path: &Path, mode: u32) -> std::io::Result<()> {
    DirBuilder::new().mode(mode).create(path)
}

#[cfg(not(unix))]
fn create_directory(path: &Path, _mode: u32) -> std::io::Result<()> {
    DirBuilder::new().create(path)
}
