//! Brightness correction in HSV space.
//!
//! Each pixel is converted to hue/saturation/value, its value is multiplied
//! by a scale and saturated to the 8-bit range, and the result is converted
//! back to RGB. Hue and saturation are carried through unchanged, so the
//! brightest channel of every output pixel equals `round(v * scale)` clamped
//! to 255, where `v` is the brightest channel of the input pixel.

use image::{Rgb, RgbImage};
use rand::Rng;

use crate::{configuration::BrightnessMode, error::FrameTileError};

/// Number of discrete steps in a random brightness draw.
const SCALE_RESOLUTION: u32 = 10_000;

/// Chooses and applies a brightness scale for each frame.
#[derive(Debug, Clone, Copy)]
pub struct BrightnessCorrector {
    mode: BrightnessMode,
}

impl BrightnessCorrector {
    /// Create a corrector for the given mode.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`BrightnessMode::validate`].
    pub fn new(mode: BrightnessMode) -> Result<Self, FrameTileError> {
        mode.validate()?;
        Ok(Self { mode })
    }

    /// The scale for the next frame.
    ///
    /// A fixed mode never touches `rng`. A uniform mode draws
    /// `start + (end - start) * k / 10000` with `k` uniform in `0..=10000`.
    pub fn next_scale<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        match self.mode {
            BrightnessMode::Fixed(scale) => scale,
            BrightnessMode::Uniform { start, end } => {
                let step = rng.gen_range(0..=SCALE_RESOLUTION);
                start + (end - start) * (step as f32 / SCALE_RESOLUTION as f32)
            }
        }
    }

    /// Draw a scale and apply it to `frame`.
    pub fn correct<R: Rng + ?Sized>(&self, frame: &RgbImage, rng: &mut R) -> RgbImage {
        let scale = self.next_scale(rng);
        log::trace!("Brightness scale {scale:.4}");
        correct_brightness(frame, scale)
    }
}

/// Scale the HSV value channel of every pixel in `frame`.
pub fn correct_brightness(frame: &RgbImage, scale: f32) -> RgbImage {
    let mut corrected = frame.clone();
    for pixel in corrected.pixels_mut() {
        *pixel = scale_pixel(*pixel, scale);
    }
    corrected
}

fn scale_pixel(pixel: Rgb<u8>, scale: f32) -> Rgb<u8> {
    let (hue, saturation, value) = rgb_to_hsv(pixel);
    let value = (value * scale).round().clamp(0.0, 255.0);
    hsv_to_rgb(hue, saturation, value)
}

/// Hue in degrees `[0, 360)`, saturation in `[0, 1]`, value in `[0, 255]`.
fn rgb_to_hsv(Rgb([red, green, blue]): Rgb<u8>) -> (f32, f32, f32) {
    let (red, green, blue) = (f32::from(red), f32::from(green), f32::from(blue));
    let max = red.max(green).max(blue);
    let min = red.min(green).min(blue);
    let delta = max - min;

    let saturation = if max > 0.0 { delta / max } else { 0.0 };
    let hue = if delta == 0.0 {
        0.0
    } else if max == red {
        (60.0 * (green - blue) / delta).rem_euclid(360.0)
    } else if max == green {
        60.0 * ((blue - red) / delta + 2.0)
    } else {
        60.0 * ((red - green) / delta + 4.0)
    };

    (hue, saturation, max)
}

fn hsv_to_rgb(hue: f32, saturation: f32, value: f32) -> Rgb<u8> {
    let chroma = value * saturation;
    let sector = hue / 60.0;
    let secondary = chroma * (1.0 - (sector.rem_euclid(2.0) - 1.0).abs());
    let offset = value - chroma;

    let (red, green, blue) = match sector as u32 {
        0 => (chroma, secondary, 0.0),
        1 => (secondary, chroma, 0.0),
        2 => (0.0, chroma, secondary),
        3 => (0.0, secondary, chroma),
        4 => (secondary, 0.0, chroma),
        _ => (chroma, 0.0, secondary),
    };

    let channel = |component: f32| (component + offset).round().clamp(0.0, 255.0) as u8;
    Rgb([channel(red), channel(green), channel(blue)])
}
