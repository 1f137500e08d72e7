//! # ESC/POS Text Formatting Commands
//!
//! This module implements text styling and text emission frames.
//!
//! ## Text Styling Overview
//!
//! | Style | Command | Effect |
//! |-------|---------|--------|
//! | Bold | ESC E n | **Emphasized** text |
//! | Underline | ESC - n | 1 or 2 dot underline |
//! | Inverted | GS B n | White on black |
//! | Size | GS ! n | 1x..8x width and height |
//! | Font | ESC M n | Font A / Font B |
//! | Rotation | ESC V n | 90° clockwise |
//! | Alignment | ESC a n | Left / center / right |
//!
//! Every toggle is stateless: the same arguments always produce the same
//! bytes. The printer keeps the state until the next `ESC @`.

use serde::Deserialize;

use super::codepage::CodePageEncoder;
use super::commands::{ESC, GS, LF};
use crate::error::{Result, invalid};

/// Largest magnification step accepted by `GS !` (8x).
pub const MAX_MAGNIFICATION: u8 = 7;

// ============================================================================
// TEXT ALIGNMENT
// ============================================================================

/// Text alignment options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

impl Alignment {
    pub const fn code(self) -> u8 {
        match self {
            Alignment::Left => 0,
            Alignment::Center => 1,
            Alignment::Right => 2,
        }
    }
}

/// # Select Justification (ESC a n)
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC a n |
/// | Hex     | 1B 61 n |
/// | Decimal | 27 97 n |
///
/// Applies to barcodes, 2D codes and images as well as text.
///
/// ```
/// use escpos_net::protocol::text::{align, Alignment};
///
/// assert_eq!(align(Alignment::Center), vec![0x1B, 0x61, 0x01]);
/// ```
pub fn align(alignment: Alignment) -> Vec<u8> {
    vec![ESC, b'a', alignment.code()]
}

// ============================================================================
// FONT SELECTION
// ============================================================================

/// Available fonts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum Font {
    /// Font A: 12×24 dots
    #[default]
    #[serde(alias = "a")]
    A,
    /// Font B: 9×17 dots
    #[serde(alias = "b")]
    B,
}

impl Font {
    pub const fn code(self) -> u8 {
        match self {
            Font::A => 0,
            Font::B => 1,
        }
    }
}

/// # Select Character Font (ESC M n)
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC M n |
/// | Hex     | 1B 4D n |
/// | Decimal | 27 77 n |
pub fn font(f: Font) -> Vec<u8> {
    vec![ESC, b'M', f.code()]
}

// ============================================================================
// EMPHASIS, UNDERLINE, INVERSION, ROTATION
// ============================================================================

/// # Turn Emphasized Mode On/Off (ESC E n)
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC E n |
/// | Hex     | 1B 45 n |
/// | Decimal | 27 69 n |
pub fn bold(enabled: bool) -> Vec<u8> {
    vec![ESC, b'E', enabled as u8]
}

/// Underline thickness
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Underline {
    #[default]
    Off,
    OneDot,
    TwoDot,
}

impl Underline {
    pub const fn code(self) -> u8 {
        match self {
            Underline::Off => 0,
            Underline::OneDot => 1,
            Underline::TwoDot => 2,
        }
    }
}

/// # Turn Underline Mode On/Off (ESC - n)
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC - n |
/// | Hex     | 1B 2D n |
/// | Decimal | 27 45 n |
///
/// - `n = 0`: off
/// - `n = 1`: 1-dot thick
/// - `n = 2`: 2-dot thick
pub fn underline(mode: Underline) -> Vec<u8> {
    vec![ESC, b'-', mode.code()]
}

/// # Turn White/Black Reverse Printing On/Off (GS B n)
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | GS B n |
/// | Hex     | 1D 42 n |
/// | Decimal | 29 66 n |
pub fn inverted(enabled: bool) -> Vec<u8> {
    vec![GS, b'B', enabled as u8]
}

/// # Turn 90° Clockwise Rotation On/Off (ESC V n)
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC V n |
/// | Hex     | 1B 56 n |
/// | Decimal | 27 86 n |
pub fn rotate_clockwise(enabled: bool) -> Vec<u8> {
    vec![ESC, b'V', enabled as u8]
}

// ============================================================================
// CHARACTER SIZE
// ============================================================================

/// # Select Character Size (GS ! n)
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | GS ! n |
/// | Hex     | 1D 21 n |
/// | Decimal | 29 33 n |
///
/// ## Parameters
///
/// - `horizontal`: width magnification step (0 = 1x ... 7 = 8x), upper nibble
/// - `vertical`: height magnification step (0 = 1x ... 7 = 8x), lower nibble
///
/// Values above 7 are rejected, never clamped.
///
/// ```
/// use escpos_net::protocol::text::magnification;
///
/// assert_eq!(magnification(1, 1).unwrap(), vec![0x1D, 0x21, 0x11]);
/// assert!(magnification(8, 0).is_err());
/// ```
pub fn magnification(horizontal: u8, vertical: u8) -> Result<Vec<u8>> {
    if horizontal > MAX_MAGNIFICATION || vertical > MAX_MAGNIFICATION {
        return Err(invalid(format!(
            "character magnification must be 0..={MAX_MAGNIFICATION}, got {horizontal}x{vertical}"
        )));
    }
    Ok(vec![GS, b'!', (horizontal << 4) | vertical])
}

// ============================================================================
// CODE PAGE AND TEXT
// ============================================================================

/// Printer-side character table for Windows-1252 on most ESC/POS firmwares.
pub const DEFAULT_PAGE_CODE: u8 = 32;

/// Host-side code page used to encode text by default.
pub const DEFAULT_CODE_PAGE: u16 = 1252;

/// # Select Printer Character Table (ESC GS t n)
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC GS t n |
/// | Hex     | 1B 1D 74 n |
/// | Decimal | 27 29 116 n |
///
/// `n = 32` selects Windows-1252 on the supported firmwares. The table must
/// agree with the code page used to encode the text bytes that follow.
pub fn page_code(n: u8) -> Vec<u8> {
    vec![ESC, GS, b't', n]
}

/// Options for a text frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextOptions {
    /// Append a single `LF` after the text
    pub newline: bool,
    /// Printer character table selected before the text
    pub page_code: u8,
    /// Host code page the text is encoded with
    pub code_page: u16,
}

impl Default for TextOptions {
    fn default() -> Self {
        Self {
            newline: true,
            page_code: DEFAULT_PAGE_CODE,
            code_page: DEFAULT_CODE_PAGE,
        }
    }
}

impl TextOptions {
    pub fn inline() -> Self {
        Self {
            newline: false,
            ..Self::default()
        }
    }
}

/// Build a text frame: character table select, then the encoded text.
///
/// Carriage returns and line feeds inside `content` are stripped; a line is
/// terminated only by the single `LF` added when `options.newline` is set.
///
/// ```
/// use escpos_net::protocol::{codepage::StandardCodePages, text};
///
/// let frame = text::text(&StandardCodePages, "Hi\r\n", text::TextOptions::default()).unwrap();
/// assert_eq!(frame, vec![0x1B, 0x1D, 0x74, 32, b'H', b'i', 0x0A]);
/// ```
pub fn text(encoder: &dyn CodePageEncoder, content: &str, options: TextOptions) -> Result<Vec<u8>> {
    let stripped: String = content.chars().filter(|c| !matches!(c, '\r' | '\n')).collect();
    let payload = encoder.encode(&stripped, options.code_page)?;

    let mut cmd = Vec::with_capacity(4 + payload.len() + 1);
    cmd.extend(page_code(options.page_code));
    cmd.extend(payload);
    if options.newline {
        cmd.push(LF);
    }
    Ok(cmd)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::codepage::StandardCodePages;

    #[test]
    fn test_align() {
        assert_eq!(align(Alignment::Left), vec![0x1B, 0x61, 0x00]);
        assert_eq!(align(Alignment::Center), vec![0x1B, 0x61, 0x01]);
        assert_eq!(align(Alignment::Right), vec![0x1B, 0x61, 0x02]);
    }

    #[test]
    fn test_font() {
        assert_eq!(font(Font::A), vec![0x1B, 0x4D, 0x00]);
        assert_eq!(font(Font::B), vec![0x1B, 0x4D, 0x01]);
    }

    #[test]
    fn test_bold() {
        assert_eq!(bold(true), vec![0x1B, 0x45, 0x01]);
        assert_eq!(bold(false), vec![0x1B, 0x45, 0x00]);
    }

    #[test]
    fn test_underline() {
        assert_eq!(underline(Underline::Off), vec![0x1B, 0x2D, 0x00]);
        assert_eq!(underline(Underline::OneDot), vec![0x1B, 0x2D, 0x01]);
        assert_eq!(underline(Underline::TwoDot), vec![0x1B, 0x2D, 0x02]);
    }

    #[test]
    fn test_inverted_and_rotation() {
        assert_eq!(inverted(true), vec![0x1D, 0x42, 0x01]);
        assert_eq!(inverted(false), vec![0x1D, 0x42, 0x00]);
        assert_eq!(rotate_clockwise(true), vec![0x1B, 0x56, 0x01]);
        assert_eq!(rotate_clockwise(false), vec![0x1B, 0x56, 0x00]);
    }

    #[test]
    fn test_toggles_are_idempotent() {
        assert_eq!(bold(true), bold(true));
        assert_eq!(magnification(3, 4).unwrap(), magnification(3, 4).unwrap());
    }

    #[test]
    fn test_magnification_all_valid_pairs() {
        for h in 0..=7u8 {
            for v in 0..=7u8 {
                let cmd = magnification(h, v).unwrap();
                assert_eq!(cmd.len(), 3);
                assert_eq!(&cmd[..2], &[0x1D, 0x21]);
                assert_eq!(cmd[2], (h << 4) | v);
            }
        }
    }

    #[test]
    fn test_magnification_rejects_out_of_range() {
        for bad in [8u8, 9, 15, 255] {
            assert!(matches!(
                magnification(bad, 0),
                Err(crate::EscPosError::InvalidParameter(_))
            ));
            assert!(matches!(
                magnification(0, bad),
                Err(crate::EscPosError::InvalidParameter(_))
            ));
        }
    }

    #[test]
    fn test_page_code() {
        assert_eq!(page_code(32), vec![0x1B, 0x1D, 0x74, 0x20]);
        assert_eq!(page_code(0), vec![0x1B, 0x1D, 0x74, 0x00]);
    }

    #[test]
    fn test_text_strips_line_breaks() {
        let cmd = text(&StandardCodePages, "a\r\nb\nc", TextOptions::inline()).unwrap();
        assert_eq!(cmd, vec![0x1B, 0x1D, 0x74, 32, b'a', b'b', b'c']);
    }

    #[test]
    fn test_text_newline_option() {
        let cmd = text(&StandardCodePages, "ok", TextOptions::default()).unwrap();
        assert_eq!(cmd.last(), Some(&LF));
        assert_eq!(cmd.iter().filter(|&&b| b == LF).count(), 1);
    }

    #[test]
    fn test_text_uses_code_page() {
        let options = TextOptions {
            newline: false,
            page_code: 0,
            code_page: 437,
        };
        let cmd = text(&StandardCodePages, "╔═╗", options).unwrap();
        assert_eq!(cmd, vec![0x1B, 0x1D, 0x74, 0x00, 0xC9, 0xCD, 0xBB]);
    }

    #[test]
    fn test_text_unknown_code_page() {
        let options = TextOptions {
            code_page: 4242,
            ..TextOptions::default()
        };
        assert!(matches!(
            text(&StandardCodePages, "x", options),
            Err(crate::EscPosError::EncodingUnsupported(4242))
        ));
    }
}
