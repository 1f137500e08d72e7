//! # ESC/POS Bit Image Commands
//!
//! Images are sent as a sequence of 24-dot high bands using the
//! "select bit-image mode" command in 24-dot double-density mode.
//!
//! ## Band Layout
//!
//! ```text
//! ESC * 33 nL nH  d1 ... d(3*width)  LF
//! ```
//!
//! Each band covers 24 rows. For every column the band carries 3 bytes,
//! top to bottom; within a byte the most significant bit is the topmost dot:
//!
//! ```text
//!          column x
//!  row 0   bit 7 ┐
//!   ...          ├ byte 0
//!  row 7   bit 0 ┘
//!  row 8   bit 7 ┐
//!   ...          ├ byte 1
//!  row 15  bit 0 ┘
//!  row 16  bit 7 ┐
//!   ...          ├ byte 2
//!  row 23  bit 0 ┘
//! ```
//!
//! Rows past the bottom of the image in the last band are sent blank.
//!
//! ## Full Image Frame
//!
//! 1. `ESC 3 24` so consecutive bands touch
//! 2. one band per 24 rows
//! 3. `ESC @ ESC S`, which resets line spacing and all text formatting

use super::commands::{ESC, LF, REINITIALIZE, u16_le};
use super::Frame;
use crate::error::{Result, invalid};
use crate::raster::MonoBitmap;

/// Rows per band in 24-dot mode
pub const BAND_HEIGHT: usize = 24;

/// `m` for `ESC *`: 24-dot double density
pub const MODE_24_DOT_DOUBLE: u8 = 33;

/// # Set Line Spacing (ESC 3 n)
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC 3 n |
/// | Hex     | 1B 33 n |
/// | Decimal | 27 51 n |
#[inline]
pub fn line_spacing(dots: u8) -> Vec<u8> {
    vec![ESC, b'3', dots]
}

/// Pack one band starting at row `top`: 3 bytes per column, MSB topmost.
pub fn pack_band(bitmap: &MonoBitmap, top: usize) -> Vec<u8> {
    let mut packed = Vec::with_capacity(bitmap.width() * 3);
    for x in 0..bitmap.width() {
        for slice in 0..3 {
            let mut byte = 0u8;
            for bit in 0..8 {
                let y = top + slice * 8 + bit;
                if bitmap.get(x, y) {
                    byte |= 1 << (7 - bit);
                }
            }
            packed.push(byte);
        }
    }
    packed
}

/// # Select Bit-Image Mode (ESC * m nL nH d1...dk) + LF
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC * 33 nL nH d1...dk LF |
/// | Hex     | 1B 2A 21 nL nH d1...dk 0A |
/// | Decimal | 27 42 33 nL nH d1...dk 10 |
///
/// `nL nH` is the width in dots; `k = 3 * width`.
pub fn band(width: u16, packed: &[u8]) -> Vec<u8> {
    debug_assert_eq!(
        packed.len(),
        width as usize * 3,
        "24-dot band needs 3 bytes per column"
    );
    let [nl, nh] = u16_le(width);

    let mut cmd = Vec::with_capacity(5 + packed.len() + 1);
    cmd.extend([ESC, b'*', MODE_24_DOT_DOUBLE, nl, nh]);
    cmd.extend_from_slice(packed);
    cmd.push(LF);
    cmd
}

/// Encode a whole bitmap as bands.
///
/// The returned frame resets the printer after the last band; the caller
/// must treat all formatting as back to defaults.
///
/// ```
/// use escpos_net::protocol::{graphics, StateEffect};
/// use escpos_net::raster::MonoBitmap;
///
/// let bitmap = MonoBitmap::new(1, 1, vec![true]).unwrap();
/// let frame = graphics::image(&bitmap).unwrap();
/// assert_eq!(
///     frame.bytes,
///     vec![0x1B, 0x33, 24, 0x1B, 0x2A, 33, 1, 0, 0x80, 0, 0, 0x0A, 0x1B, 0x40, 0x1B, 0x53]
/// );
/// assert_eq!(frame.effect, StateEffect::ResetFormatting);
/// ```
pub fn image(bitmap: &MonoBitmap) -> Result<Frame> {
    let width = u16::try_from(bitmap.width())
        .map_err(|_| invalid(format!("image width {} exceeds 65535 dots", bitmap.width())))?;
    let bands = bitmap.height().div_ceil(BAND_HEIGHT);

    let mut cmd = Vec::with_capacity(3 + bands * (6 + 3 * bitmap.width()) + REINITIALIZE.len());
    cmd.extend(line_spacing(BAND_HEIGHT as u8));
    for top in (0..bitmap.height()).step_by(BAND_HEIGHT) {
        cmd.extend(band(width, &pack_band(bitmap, top)));
    }
    cmd.extend(REINITIALIZE);
    Ok(Frame::resetting(cmd))
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::StateEffect;

    fn bitmap(width: usize, height: usize, marked: &[(usize, usize)]) -> MonoBitmap {
        let mut dots = vec![false; width * height];
        for &(x, y) in marked {
            dots[y * width + x] = true;
        }
        MonoBitmap::new(width, height, dots).unwrap()
    }

    #[test]
    fn test_line_spacing() {
        assert_eq!(line_spacing(24), vec![0x1B, 0x33, 0x18]);
    }

    #[test]
    fn test_pack_band_bit_order() {
        // one column, dots on rows 0, 7, 8 and 23
        let bm = bitmap(1, 24, &[(0, 0), (0, 7), (0, 8), (0, 23)]);
        assert_eq!(pack_band(&bm, 0), vec![0b1000_0001, 0b1000_0000, 0b0000_0001]);
    }

    #[test]
    fn test_pack_band_columns() {
        let bm = bitmap(3, 8, &[(0, 0), (2, 1)]);
        assert_eq!(pack_band(&bm, 0), vec![0x80, 0, 0, 0, 0, 0, 0x40, 0, 0]);
    }

    #[test]
    fn test_pack_band_partial_rows_blank() {
        // 10 rows tall, all marked: rows 10..24 must be blank
        let bm = MonoBitmap::new(1, 10, vec![true; 10]).unwrap();
        assert_eq!(pack_band(&bm, 0), vec![0xFF, 0b1100_0000, 0x00]);
    }

    #[test]
    fn test_pack_second_band() {
        let bm = bitmap(1, 30, &[(0, 24), (0, 29)]);
        assert_eq!(pack_band(&bm, 24), vec![0b1000_0100, 0, 0]);
    }

    #[test]
    fn test_band_header_width_le() {
        let packed = vec![0u8; 300 * 3];
        let cmd = band(300, &packed);
        assert_eq!(&cmd[..5], &[0x1B, 0x2A, 33, 0x2C, 0x01]);
        assert_eq!(cmd.len(), 5 + 900 + 1);
        assert_eq!(cmd.last(), Some(&LF));
    }

    #[test]
    fn test_image_band_count() {
        for (height, bands) in [(1usize, 1usize), (24, 1), (25, 2), (48, 2), (49, 3)] {
            let bm = MonoBitmap::new(2, height, vec![false; 2 * height]).unwrap();
            let frame = image(&bm).unwrap();
            let band_len = 5 + 2 * 3 + 1;
            assert_eq!(frame.bytes.len(), 3 + bands * band_len + 4, "height {height}");
        }
    }

    #[test]
    fn test_image_empty_height() {
        let bm = MonoBitmap::new(5, 0, vec![]).unwrap();
        let frame = image(&bm).unwrap();
        assert_eq!(frame.bytes, vec![0x1B, 0x33, 24, 0x1B, 0x40, 0x1B, 0x53]);
    }

    #[test]
    fn test_image_resets_formatting() {
        let bm = bitmap(2, 2, &[(1, 1)]);
        let frame = image(&bm).unwrap();
        assert_eq!(frame.effect, StateEffect::ResetFormatting);
        assert!(frame.bytes.ends_with(&REINITIALIZE));
    }
}
