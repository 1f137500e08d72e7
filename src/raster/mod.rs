//! # Monochrome Rasterization
//!
//! Converts a color image into the boolean dot grid a thermal head prints.
//!
//! ## Pipeline
//!
//! 1. Scale the source so its width becomes the requested number of dots
//!    (nearest neighbor, no filtering).
//! 2. Compute the luminance of each sampled pixel.
//! 3. Compare against a threshold: a dot is marked when the luminance is
//!    above the threshold, or below it when `inverted` is set.
//!
//! The resulting [`MonoBitmap`] is row-major, `true` = mark ink. Packing into
//! printer bands lives in [`crate::protocol::graphics`].
//!
//! ## Example
//!
//! ```
//! use escpos_net::raster::{monochrome, RasterOptions};
//! use image::{Rgb, RgbImage};
//!
//! let img = RgbImage::from_pixel(4, 2, Rgb([255, 255, 255]));
//! let bitmap = monochrome(&img, RasterOptions { width_dots: 8.0, ..Default::default() }).unwrap();
//! assert_eq!((bitmap.width(), bitmap.height()), (8, 4));
//! assert!(bitmap.dots().iter().all(|&d| d));
//! ```

mod source;

pub use source::{PixelSource, open};

use crate::error::{Result, invalid};

/// Default luminance threshold
pub const DEFAULT_THRESHOLD: u8 = 127;

/// Default output width in dots
pub const DEFAULT_WIDTH_DOTS: f64 = 300.0;

/// Largest dot grid a single image may produce (64 Mi dots)
pub const MAX_IMAGE_DOTS: usize = 1 << 26;

/// Rasterization parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RasterOptions {
    /// Luminance cut-off, 0-255
    pub threshold: u8,
    /// Output width in dots; height follows the aspect ratio
    pub width_dots: f64,
    /// Mark dark pixels instead of light ones
    pub inverted: bool,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            width_dots: DEFAULT_WIDTH_DOTS,
            inverted: false,
        }
    }
}

/// Row-major boolean dot grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonoBitmap {
    width: usize,
    height: usize,
    dots: Vec<bool>,
}

impl MonoBitmap {
    /// Wrap an existing grid. `dots.len()` must equal `width * height`.
    pub fn new(width: usize, height: usize, dots: Vec<bool>) -> Result<Self> {
        if dots.len() != width * height {
            return Err(invalid(format!(
                "bitmap of {width}x{height} needs {} dots, got {}",
                width * height,
                dots.len()
            )));
        }
        Ok(Self { width, height, dots })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn dots(&self) -> &[bool] {
        &self.dots
    }

    /// Dot at `(x, y)`; anything outside the grid is unmarked.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.dots[y * self.width + x]
    }

    /// Number of marked dots.
    pub fn ink_count(&self) -> usize {
        self.dots.iter().filter(|&&d| d).count()
    }
}

/// Perceptual luminance (ITU-R BT.601 weights), truncated to 0-255.
#[inline]
pub fn luminance([r, g, b]: [u8; 3]) -> u8 {
    ((299 * r as u32 + 587 * g as u32 + 114 * b as u32) / 1000) as u8
}

/// Scale and threshold `source` into a [`MonoBitmap`].
///
/// ## Errors
///
/// - source width or height is zero
/// - `width_dots` is not a positive finite number
/// - the scaled width or height rounds down to zero
/// - the scaled width does not fit the 16-bit width field of a band
/// - the scaled grid has more than [`MAX_IMAGE_DOTS`] dots
pub fn monochrome<S: PixelSource + ?Sized>(source: &S, options: RasterOptions) -> Result<MonoBitmap> {
    let (src_w, src_h) = (source.width(), source.height());
    if src_w == 0 || src_h == 0 {
        return Err(invalid(format!("cannot rasterize an empty {src_w}x{src_h} image")));
    }
    if !options.width_dots.is_finite() || options.width_dots <= 0.0 {
        return Err(invalid(format!(
            "image width must be a positive number of dots, got {}",
            options.width_dots
        )));
    }

    let scale = options.width_dots / src_w as f64;
    // floor(src_w * scale) is width_dots itself; multiply before dividing for the height
    let width = options.width_dots.floor() as usize;
    // Saturating float cast; the dot limit below catches huge heights
    let height = (src_h as f64 * options.width_dots / src_w as f64).floor() as usize;
    if width == 0 || height == 0 {
        return Err(invalid(format!(
            "{src_w}x{src_h} image scaled to {} dots wide leaves a {width}x{height} grid",
            options.width_dots
        )));
    }
    if width > u16::MAX as usize {
        return Err(invalid(format!("image width {width} exceeds 65535 dots")));
    }
    let total = width
        .checked_mul(height)
        .filter(|&n| n <= MAX_IMAGE_DOTS)
        .ok_or_else(|| {
            invalid(format!(
                "{width}x{height} image exceeds the {MAX_IMAGE_DOTS} dot limit"
            ))
        })?;

    let mut dots = Vec::with_capacity(total);
    for y in 0..height {
        let sy = ((y as f64 / scale) as u32).min(src_h - 1);
        for x in 0..width {
            let sx = ((x as f64 / scale) as u32).min(src_w - 1);
            let lum = luminance(source.rgb(sx, sy));
            let ink = if options.inverted {
                lum < options.threshold
            } else {
                lum > options.threshold
            };
            dots.push(ink);
        }
    }

    Ok(MonoBitmap { width, height, dots })
}
