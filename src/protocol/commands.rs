//! # ESC/POS Printer Control Commands
//!
//! This module implements the basic control frames of the ESC/POS command
//! protocol spoken by network thermal receipt printers: initialization,
//! paper feed, cutting and raw byte emission.
//!
//! ## Escape Sequence Structure
//!
//! Commands follow these patterns:
//! - Single byte: `LF`
//! - Two bytes: `ESC @`, `ESC S`
//! - Multi-byte with parameters: `ESC d n`, `GS V m`, `GS k m n data...`
//!
//! ## Byte Order
//!
//! Multi-byte integers use **little-endian** encoding:
//! - `u16` value 0x1234 is sent as bytes `[0x34, 0x12]`

use serde::Deserialize;

use crate::error::{Result, invalid};

// ============================================================================
// ESCAPE SEQUENCE CONSTANTS
// ============================================================================

/// ESC (Escape) - Command prefix byte
///
/// Most ESC/POS commands begin with ESC (0x1B). This byte signals the start
/// of a control sequence rather than printable text.
pub const ESC: u8 = 0x1B;

/// GS (Group Separator) - Extended command prefix
///
/// Used for character size, barcodes, 2D codes and the cutter.
/// - Hex: 0x1D, Decimal: 29
pub const GS: u8 = 0x1D;

/// LF (Line Feed) - Print and advance one line
pub const LF: u8 = 0x0A;

/// Printer reinitialization preamble: `ESC @` (reset) then `ESC S`
/// (select standard mode).
///
/// Every fresh session starts with this preamble in its job buffer, and image
/// printing appends it after the raster data.
pub const REINITIALIZE: [u8; 4] = [ESC, b'@', ESC, b'S'];

// ============================================================================
// INITIALIZATION COMMANDS
// ============================================================================

/// # Reinitialize Printer (ESC @ ESC S)
///
/// Resets the printer to its power-on defaults and selects standard mode.
///
/// ## Protocol Details
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC @ ESC S |
/// | Hex     | 1B 40 1B 53 |
/// | Decimal | 27 64 27 83 |
///
/// ## What Gets Reset
///
/// - Text formatting (bold, underline, inverted) disabled
/// - Character magnification reset to 1x1
/// - Alignment reset to left
/// - Line spacing reset to default
///
/// ## Example
///
/// ```
/// use escpos_net::protocol::commands;
///
/// assert_eq!(commands::reinitialize(), vec![0x1B, 0x40, 0x1B, 0x53]);
/// ```
#[inline]
pub fn reinitialize() -> Vec<u8> {
    REINITIALIZE.to_vec()
}

// ============================================================================
// PAPER CONTROL
// ============================================================================

/// # Print and Feed n Lines (ESC d n)
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC d n |
/// | Hex     | 1B 64 n |
/// | Decimal | 27 100 n |
///
/// ## Example
///
/// ```
/// use escpos_net::protocol::commands;
///
/// assert_eq!(commands::feed_lines(6), vec![0x1B, 0x64, 6]);
/// ```
#[inline]
pub fn feed_lines(lines: u8) -> Vec<u8> {
    vec![ESC, b'd', lines]
}

/// Cutter behavior for `GS V m`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CutMode {
    /// Cut all the way through the paper
    #[default]
    Full,
    /// Leave a small hinge so the receipt does not drop
    Partial,
}

impl CutMode {
    /// Value of the `m` parameter.
    pub const fn code(self) -> u8 {
        match self {
            CutMode::Full => 0,
            CutMode::Partial => 1,
        }
    }
}

/// # Cut Paper (GS V m)
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | GS V m |
/// | Hex     | 1D 56 m |
/// | Decimal | 29 86 m |
///
/// - `m = 0`: full cut
/// - `m = 1`: partial cut
#[inline]
pub fn cut(mode: CutMode) -> Vec<u8> {
    vec![GS, b'V', mode.code()]
}

// ============================================================================
// RAW DATA
// ============================================================================

/// Emit a single byte `count` times.
///
/// Handy for box-drawing rules (`0xCD` repeated 40 times in CP437 prints a
/// double line). A count of zero is rejected rather than producing an empty
/// frame.
///
/// ```
/// use escpos_net::protocol::commands;
///
/// assert_eq!(commands::repeat(0xCD, 3).unwrap(), vec![0xCD, 0xCD, 0xCD]);
/// assert!(commands::repeat(0xCD, 0).is_err());
/// ```
pub fn repeat(byte: u8, count: usize) -> Result<Vec<u8>> {
    if count < 1 {
        return Err(invalid("repeat count must be at least 1"));
    }
    Ok(vec![byte; count])
}

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// Encode a u16 value as little-endian bytes [low, high]
///
/// ```
/// use escpos_net::protocol::commands::u16_le;
///
/// assert_eq!(u16_le(0x1234), [0x34, 0x12]);
/// assert_eq!(u16_le(300), [0x2C, 0x01]);
/// ```
#[inline]
pub const fn u16_le(value: u16) -> [u8; 2] {
    [value as u8, (value >> 8) as u8]
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reinitialize() {
        assert_eq!(reinitialize(), vec![0x1B, 0x40, 0x1B, 0x53]);
    }

    #[test]
    fn test_feed_lines() {
        assert_eq!(feed_lines(0), vec![0x1B, 0x64, 0x00]);
        assert_eq!(feed_lines(10), vec![0x1B, 0x64, 0x0A]);
        assert_eq!(feed_lines(255), vec![0x1B, 0x64, 0xFF]);
    }

    #[test]
    fn test_cut() {
        assert_eq!(cut(CutMode::Full), vec![0x1D, 0x56, 0x00]);
        assert_eq!(cut(CutMode::Partial), vec![0x1D, 0x56, 0x01]);
    }

    #[test]
    fn test_repeat() {
        assert_eq!(repeat(0x2D, 1).unwrap(), vec![0x2D]);
        assert_eq!(repeat(0xCD, 40).unwrap().len(), 40);
    }

    #[test]
    fn test_repeat_rejects_zero() {
        assert!(matches!(
            repeat(0x2D, 0),
            Err(crate::EscPosError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_u16_le() {
        assert_eq!(u16_le(0x0000), [0x00, 0x00]);
        assert_eq!(u16_le(0x00FF), [0xFF, 0x00]);
        assert_eq!(u16_le(0xFF00), [0x00, 0xFF]);
        assert_eq!(u16_le(576), [0x40, 0x02]);
    }
}
