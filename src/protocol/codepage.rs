//! # Code Page Text Encoding
//!
//! Text frames carry bytes in a single-byte character table that the printer
//! has been told to use (`ESC GS t n`). This module turns Rust strings into
//! those bytes.
//!
//! The [`CodePageEncoder`] trait is the seam: sessions hold a boxed encoder
//! and callers can plug in their own tables. [`StandardCodePages`] covers the
//! tables found on common receipt printers, addressed by their Windows code
//! page id:
//!
//! | Id | Table |
//! |----|-------|
//! | 437 | IBM PC (built-in table) |
//! | 866 | Cyrillic DOS |
//! | 874 | Thai |
//! | 1250–1258 | Windows Latin / Cyrillic / Greek / Turkish / ... |
//! | 28592–28605 | ISO-8859-2 .. ISO-8859-15 |
//! | 20866 / 21866 | KOI8-R / KOI8-U |
//! | 10000 | Mac Roman |
//! | 65001 | UTF-8 |
//!
//! Characters a table cannot represent are replaced with `?`.

use encoding_rs::{EncoderResult, Encoding};
use tracing::warn;

use super::cp437;
use crate::error::{EscPosError, Result};

/// Substitute for characters missing from the selected table
pub const REPLACEMENT: u8 = b'?';

/// Maps text to bytes in a numbered code page.
pub trait CodePageEncoder {
    /// Encode `text` using code page `code_page`.
    ///
    /// Fails with [`EscPosError::EncodingUnsupported`] if the id is unknown.
    fn encode(&self, text: &str, code_page: u16) -> Result<Vec<u8>>;
}

/// Default encoder backed by `encoding_rs` plus a built-in CP437 table.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardCodePages;

impl StandardCodePages {
    /// Look up the `encoding_rs` encoding for a Windows code page id.
    pub fn encoding_for(code_page: u16) -> Option<&'static Encoding> {
        let encoding = match code_page {
            866 => encoding_rs::IBM866,
            874 => encoding_rs::WINDOWS_874,
            1250 => encoding_rs::WINDOWS_1250,
            1251 => encoding_rs::WINDOWS_1251,
            1252 => encoding_rs::WINDOWS_1252,
            1253 => encoding_rs::WINDOWS_1253,
            1254 => encoding_rs::WINDOWS_1254,
            1255 => encoding_rs::WINDOWS_1255,
            1256 => encoding_rs::WINDOWS_1256,
            1257 => encoding_rs::WINDOWS_1257,
            1258 => encoding_rs::WINDOWS_1258,
            10000 => encoding_rs::MACINTOSH,
            20866 => encoding_rs::KOI8_R,
            21866 => encoding_rs::KOI8_U,
            28592 => encoding_rs::ISO_8859_2,
            28593 => encoding_rs::ISO_8859_3,
            28594 => encoding_rs::ISO_8859_4,
            28595 => encoding_rs::ISO_8859_5,
            28596 => encoding_rs::ISO_8859_6,
            28597 => encoding_rs::ISO_8859_7,
            28598 => encoding_rs::ISO_8859_8,
            28603 => encoding_rs::ISO_8859_13,
            28605 => encoding_rs::ISO_8859_15,
            65001 => encoding_rs::UTF_8,
            _ => return None,
        };
        Some(encoding)
    }

    /// Whether `code_page` can be encoded.
    pub fn supports(code_page: u16) -> bool {
        code_page == 437 || Self::encoding_for(code_page).is_some()
    }
}

impl CodePageEncoder for StandardCodePages {
    fn encode(&self, text: &str, code_page: u16) -> Result<Vec<u8>> {
        if code_page == 437 {
            return Ok(encode_cp437(text));
        }
        let encoding =
            Self::encoding_for(code_page).ok_or(EscPosError::EncodingUnsupported(code_page))?;
        Ok(encode_with(encoding, text, code_page))
    }
}

fn encode_cp437(text: &str) -> Vec<u8> {
    text.chars()
        .map(|ch| {
            cp437::lookup(ch).unwrap_or_else(|| {
                unmapped(ch, 437);
                REPLACEMENT
            })
        })
        .collect()
}

/// Encode without HTML numeric-reference fallback: every unmappable
/// character becomes a single replacement byte.
fn encode_with(encoding: &'static Encoding, text: &str, code_page: u16) -> Vec<u8> {
    let mut encoder = encoding.new_encoder();
    let mut out = Vec::with_capacity(text.len());
    let mut src = text;

    loop {
        let (result, read) = encoder.encode_from_utf8_to_vec_without_replacement(src, &mut out, true);
        src = &src[read..];
        match result {
            EncoderResult::InputEmpty => break,
            EncoderResult::OutputFull => out.reserve(src.len().max(16)),
            EncoderResult::Unmappable(ch) => {
                unmapped(ch, code_page);
                out.push(REPLACEMENT);
            }
        }
    }
    out
}

fn unmapped(ch: char, code_page: u16) {
    warn!(
        code_page,
        "unmapped character '{}' (U+{:04X}), replacing with '?'",
        ch,
        ch as u32
    );
}
