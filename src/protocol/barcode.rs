//! # ESC/POS Barcode Commands
//!
//! This module implements 1D barcode frames (`GS k`) and 2D symbol frames
//! (`GS ( k`) for QR codes and PDF417.
//!
//! ## 1D Barcode Frame
//!
//! A 1D barcode is emitted as a fixed sequence of sub-frames:
//!
//! ```text
//! GS H n    HRI text position
//! GS f n    HRI font
//! GS h n    bar height in dots
//! GS w n    module width (1-6)
//! GS k m    symbology
//! n         payload length (one byte)
//! d1..dn    payload
//! ```
//!
//! ## Code128 Payloads
//!
//! Code128 data starts with a code set selector `{A`, `{B` or `{C`. A literal
//! `{` in the data must be doubled. In code set C every pair of digits is sent
//! as one byte holding the pair's value (`"1234"` → `[12, 34]`).
//!
//! ```
//! use escpos_net::protocol::barcode::{code128_payload, CodeSet};
//!
//! assert_eq!(code128_payload("123456", CodeSet::C).unwrap(), vec![b'{', b'C', 12, 34, 56]);
//! assert_eq!(code128_payload("a{b", CodeSet::B).unwrap(), b"{Ba{{b".to_vec());
//! ```
//!
//! ## 2D Symbols
//!
//! `GS ( k pL pH cn fn ...` frames configure, store and print a symbol. The
//! QR family uses a two-byte little-endian length on the store command; the
//! PDF417 family is limited to a single length byte.

use serde::Deserialize;

use super::commands::GS;
use crate::error::{Result, invalid};

/// Narrowest accepted module width for `GS w`
pub const MIN_MODULE_WIDTH: u8 = 1;
/// Widest accepted module width for `GS w`
pub const MAX_MODULE_WIDTH: u8 = 6;

/// Code128 escape / code set prefix byte
pub const CODE128_BRACE: u8 = b'{';

// ============================================================================
// 1D BARCODE PARAMETERS
// ============================================================================

/// 1D symbologies selectable with `GS k m` (m = 65..78 form, length-prefixed)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Symbology {
    UpcA,
    UpcE,
    Ean13,
    Ean8,
    Code39,
    Itf,
    Codabar,
    Code93,
    Code128,
    Gs1_128,
    Gs1DatabarOmnidirectional,
    Gs1DatabarTruncated,
    Gs1DatabarLimited,
    Gs1DatabarExpanded,
}

impl Symbology {
    pub const fn code(self) -> u8 {
        match self {
            Symbology::UpcA => 65,
            Symbology::UpcE => 66,
            Symbology::Ean13 => 67,
            Symbology::Ean8 => 68,
            Symbology::Code39 => 69,
            Symbology::Itf => 70,
            Symbology::Codabar => 71,
            Symbology::Code93 => 72,
            Symbology::Code128 => 73,
            Symbology::Gs1_128 => 74,
            Symbology::Gs1DatabarOmnidirectional => 75,
            Symbology::Gs1DatabarTruncated => 76,
            Symbology::Gs1DatabarLimited => 77,
            Symbology::Gs1DatabarExpanded => 78,
        }
    }
}

/// Code128 code set selected by the start sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum CodeSet {
    /// Upper case and control characters
    A,
    /// Full printable ASCII
    #[default]
    B,
    /// Digit pairs 00-99
    C,
}

impl CodeSet {
    pub const fn code(self) -> u8 {
        match self {
            CodeSet::A => b'A',
            CodeSet::B => b'B',
            CodeSet::C => b'C',
        }
    }
}

/// HRI (Human Readable Interpretation) position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HriPosition {
    None,
    Above,
    #[default]
    Below,
    Both,
}

impl HriPosition {
    pub const fn code(self) -> u8 {
        match self {
            HriPosition::None => 0,
            HriPosition::Above => 1,
            HriPosition::Below => 2,
            HriPosition::Both => 3,
        }
    }
}

/// Layout options for a 1D barcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarcodeOptions {
    /// Bar height in dots
    pub height: u8,
    /// Module width, 1-6
    pub width: u8,
    pub hri_position: HriPosition,
    pub hri_font: super::text::Font,
    /// Only used by Code128
    pub code_set: CodeSet,
}

impl Default for BarcodeOptions {
    fn default() -> Self {
        Self {
            height: 162,
            width: 3,
            hri_position: HriPosition::Below,
            hri_font: super::text::Font::A,
            code_set: CodeSet::B,
        }
    }
}

// ============================================================================
// 1D BARCODE COMMANDS
// ============================================================================

/// Build a Code128 payload: start sequence plus escaped data.
///
/// For code set C the data must be an even number of ASCII digits; each pair
/// is packed into one byte before escaping. Braces are doubled after packing,
/// so the length the caller sees is always the length sent.
pub fn code128_payload(data: &str, code_set: CodeSet) -> Result<Vec<u8>> {
    ensure_ascii(data)?;

    let packed = match code_set {
        CodeSet::C => pack_digit_pairs(data.as_bytes())?,
        CodeSet::A | CodeSet::B => data.as_bytes().to_vec(),
    };

    let mut payload = Vec::with_capacity(packed.len() + 2);
    payload.push(CODE128_BRACE);
    payload.push(code_set.code());
    for byte in packed {
        if byte == CODE128_BRACE {
            payload.push(CODE128_BRACE);
        }
        payload.push(byte);
    }
    Ok(payload)
}

fn pack_digit_pairs(digits: &[u8]) -> Result<Vec<u8>> {
    if digits.len() % 2 != 0 {
        return Err(invalid(format!(
            "code set C needs an even number of digits, got {}",
            digits.len()
        )));
    }
    if let Some(bad) = digits.iter().find(|b| !b.is_ascii_digit()) {
        return Err(invalid(format!(
            "code set C accepts digits only, found {:?}",
            *bad as char
        )));
    }
    Ok(digits
        .chunks_exact(2)
        .map(|pair| (pair[0] - b'0') * 10 + (pair[1] - b'0'))
        .collect())
}

fn ensure_ascii(data: &str) -> Result<()> {
    match data.chars().find(|c| !c.is_ascii()) {
        Some(c) => Err(invalid(format!(
            "barcode data must be ASCII, found {c:?} (U+{:04X})",
            c as u32
        ))),
        None => Ok(()),
    }
}

/// # Print 1D Barcode
///
/// Emits the HRI position, HRI font, height, width and symbology sub-frames
/// followed by the one-byte length and the payload.
///
/// ## Errors
///
/// - width outside 1..=6
/// - Code128 code set C with odd length or non-digits
/// - non-ASCII data
/// - payload (after Code128 processing) longer than 255 bytes
///
/// ```
/// use escpos_net::protocol::barcode::{barcode, BarcodeOptions, Symbology};
///
/// let cmd = barcode(Symbology::Code39, "AB1", BarcodeOptions::default()).unwrap();
/// assert_eq!(&cmd[12..], &[0x1D, 0x6B, 69, 3, b'A', b'B', b'1']);
/// ```
pub fn barcode(symbology: Symbology, data: &str, options: BarcodeOptions) -> Result<Vec<u8>> {
    if !(MIN_MODULE_WIDTH..=MAX_MODULE_WIDTH).contains(&options.width) {
        return Err(invalid(format!(
            "barcode width must be {MIN_MODULE_WIDTH}..={MAX_MODULE_WIDTH}, got {}",
            options.width
        )));
    }

    let payload = match symbology {
        Symbology::Code128 => code128_payload(data, options.code_set)?,
        _ => {
            ensure_ascii(data)?;
            data.as_bytes().to_vec()
        }
    };
    let len = u8::try_from(payload.len()).map_err(|_| {
        invalid(format!(
            "barcode payload is {} bytes, at most 255 fit the length byte",
            payload.len()
        ))
    })?;

    let mut cmd = Vec::with_capacity(15 + 1 + payload.len());
    cmd.extend([GS, b'H', options.hri_position.code()]);
    cmd.extend([GS, b'f', options.hri_font.code()]);
    cmd.extend([GS, b'h', options.height]);
    cmd.extend([GS, b'w', options.width]);
    cmd.extend([GS, b'k', symbology.code()]);
    cmd.push(len);
    cmd.extend(payload);
    Ok(cmd)
}

// ============================================================================
// 2D SYMBOLS
// ============================================================================

/// 2D symbol families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Symbol2D {
    Pdf417,
    QrModel1,
    #[default]
    QrModel2,
    QrMicro,
}

impl Symbol2D {
    /// Model byte for `GS ( k ... 1 A n1 n2`. PDF417 has no model command.
    pub const fn model(self) -> Option<u8> {
        match self {
            Symbol2D::Pdf417 => None,
            Symbol2D::QrModel1 => Some(49),
            Symbol2D::QrModel2 => Some(50),
            Symbol2D::QrMicro => Some(51),
        }
    }

    /// Function group byte (`cn`): 48 for PDF417, 49 for QR.
    pub const fn group(self) -> u8 {
        match self {
            Symbol2D::Pdf417 => 48,
            Symbol2D::QrModel1 | Symbol2D::QrModel2 | Symbol2D::QrMicro => 49,
        }
    }
}

/// Module size of a 2D symbol in dots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Size2D {
    Tiny,
    Small,
    #[default]
    Normal,
    Large,
    Extra,
}

impl Size2D {
    pub const fn code(self) -> u8 {
        match self {
            Size2D::Tiny => 2,
            Size2D::Small => 3,
            Size2D::Normal => 4,
            Size2D::Large => 5,
            Size2D::Extra => 6,
        }
    }
}

/// Error correction level of a 2D symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Correction {
    /// ~7% recovery
    #[default]
    Percent7,
    /// ~15% recovery
    Percent15,
    /// ~25% recovery
    Percent25,
    /// ~30% recovery
    Percent30,
}

impl Correction {
    pub const fn code(self) -> u8 {
        match self {
            Correction::Percent7 => 48,
            Correction::Percent15 => 49,
            Correction::Percent25 => 50,
            Correction::Percent30 => 51,
        }
    }
}

/// Value of the store-data length field: payload plus the 3 bytes of
/// `cn fn m` that follow `pL pH`.
fn store_len(data: &[u8]) -> usize {
    data.len() + 3
}

/// # Print 2D Symbol (GS ( k)
///
/// ## QR family
///
/// ```text
/// GS ( k 4 0 49 65 model 0      select model
/// GS ( k 3 0 49 67 size         module size
/// GS ( k 3 0 49 69 level        error correction
/// GS ( k pL pH 49 80 48 data    store, pL/pH = (len+3) little-endian
/// GS ( k 3 0 49 81 48           print
/// ```
///
/// ## PDF417
///
/// ```text
/// GS ( k 3 0 48 67 size            module width
/// GS ( k 4 0 48 69 48 level        error correction
/// GS ( k (len+3) 0 48 80 48 data   store, single length byte
/// GS ( k 3 0 48 81 48              print
/// ```
///
/// The order is fixed; printers reject sub-commands out of order.
///
/// ```
/// use escpos_net::protocol::barcode::{symbol_2d, Correction, Size2D, Symbol2D};
///
/// let cmd = symbol_2d(Symbol2D::QrModel2, b"hi", Size2D::Normal, Correction::Percent7).unwrap();
/// assert_eq!(&cmd[0..9], &[0x1D, 0x28, 0x6B, 4, 0, 49, 65, 50, 0]);
/// ```
pub fn symbol_2d(symbol: Symbol2D, data: &[u8], size: Size2D, level: Correction) -> Result<Vec<u8>> {
    let len = store_len(data);
    let cn = symbol.group();
    let mut cmd = Vec::with_capacity(40 + data.len());

    match symbol.model() {
        None => {
            let pl = u8::try_from(len).map_err(|_| {
                invalid(format!(
                    "PDF417 data is {} bytes, at most 252 fit the length byte",
                    data.len()
                ))
            })?;
            cmd.extend([GS, b'(', b'k', 3, 0, cn, 67, size.code()]);
            cmd.extend([GS, b'(', b'k', 4, 0, cn, 69, 48, level.code()]);
            cmd.extend([GS, b'(', b'k', pl, 0, cn, 80, 48]);
        }
        Some(model) => {
            let len = u16::try_from(len).map_err(|_| {
                invalid(format!(
                    "QR data is {} bytes, at most 65532 fit the length field",
                    data.len()
                ))
            })?;
            let [pl, ph] = super::commands::u16_le(len);
            cmd.extend([GS, b'(', b'k', 4, 0, cn, 65, model, 0]);
            cmd.extend([GS, b'(', b'k', 3, 0, cn, 67, size.code()]);
            cmd.extend([GS, b'(', b'k', 3, 0, cn, 69, level.code()]);
            cmd.extend([GS, b'(', b'k', pl, ph, cn, 80, 48]);
        }
    }
    cmd.extend_from_slice(data);
    cmd.extend([GS, b'(', b'k', 3, 0, cn, 81, 48]);
    Ok(cmd)
}

// ============================================================================
// TESTS
// ============================================================================
