//! Pixel access for rasterization.

use std::path::Path;

use image::{DynamicImage, GenericImageView, RgbImage, RgbaImage};

use crate::error::{EscPosError, Result};

/// Anything with a size and per-pixel RGB access.
///
/// Alpha is not part of the contract; sources with transparency decide for
/// themselves what color a transparent pixel has.
pub trait PixelSource {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    /// Color at `(x, y)`. Callers stay within `width() x height()`.
    fn rgb(&self, x: u32, y: u32) -> [u8; 3];
}

impl PixelSource for RgbImage {
    fn width(&self) -> u32 {
        self.dimensions().0
    }

    fn height(&self) -> u32 {
        self.dimensions().1
    }

    fn rgb(&self, x: u32, y: u32) -> [u8; 3] {
        self.get_pixel(x, y).0
    }
}

/// Transparent pixels are composited onto white paper.
impl PixelSource for RgbaImage {
    fn width(&self) -> u32 {
        self.dimensions().0
    }

    fn height(&self) -> u32 {
        self.dimensions().1
    }

    fn rgb(&self, x: u32, y: u32) -> [u8; 3] {
        over_white(self.get_pixel(x, y).0)
    }
}

impl PixelSource for DynamicImage {
    fn width(&self) -> u32 {
        GenericImageView::width(self)
    }

    fn height(&self) -> u32 {
        GenericImageView::height(self)
    }

    /// Transparent pixels are composited onto white, as for [`RgbaImage`].
    fn rgb(&self, x: u32, y: u32) -> [u8; 3] {
        over_white(self.get_pixel(x, y).0)
    }
}

fn over_white([r, g, b, a]: [u8; 4]) -> [u8; 3] {
    let blend = |c: u8| ((c as u32 * a as u32 + 255 * (255 - a as u32)) / 255) as u8;
    [blend(r), blend(g), blend(b)]
}

/// Decode an image file, with transparency flattened onto white.
pub fn open(path: &Path) -> Result<RgbImage> {
    let decoded = image::open(path)
        .map_err(|e| EscPosError::Image(format!("{}: {}", path.display(), e)))?;
    let rgba = decoded.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(RgbImage::from_fn(width, height, |x, y| {
        image::Rgb(PixelSource::rgb(&rgba, x, y))
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, Rgba};

    #[test]
    fn rgb_image_passthrough() {
        let img = RgbImage::from_pixel(3, 2, Rgb([10, 20, 30]));
        assert_eq!(PixelSource::width(&img), 3);
        assert_eq!(PixelSource::height(&img), 2);
        assert_eq!(img.rgb(2, 1), [10, 20, 30]);
    }

    #[test]
    fn rgba_composites_on_white() {
        let mut img = RgbaImage::from_pixel(2, 1, Rgba([0, 0, 0, 0]));
        img.put_pixel(1, 0, Rgba([0, 0, 0, 255]));
        assert_eq!(img.rgb(0, 0), [255, 255, 255]);
        assert_eq!(img.rgb(1, 0), [0, 0, 0]);
    }

    #[test]
    fn dynamic_image() {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(1, 1, Rgb([1, 2, 3])));
        assert_eq!(PixelSource::width(&img), 1);
        assert_eq!(img.rgb(0, 0), [1, 2, 3]);
    }

    #[test]
    fn dynamic_rgba_composites_on_white() {
        let mut rgba = RgbaImage::from_pixel(2, 1, Rgba([0, 0, 0, 0]));
        rgba.put_pixel(1, 0, Rgba([0, 0, 0, 255]));
        let img = DynamicImage::ImageRgba8(rgba.clone());
        assert_eq!(img.rgb(0, 0), [255, 255, 255]);
        assert_eq!(img.rgb(1, 0), [0, 0, 0]);
        assert_eq!(img.rgb(0, 0), rgba.rgb(0, 0));
    }

    #[test]
    fn open_missing_file() {
        let err = open(Path::new("/nonexistent/logo.png")).unwrap_err();
        assert!(matches!(err, EscPosError::Image(msg) if msg.contains("logo.png")));
    }
}
