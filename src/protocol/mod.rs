//! # ESC/POS Protocol Implementation
//!
//! This module provides low-level command builders for the ESC/POS protocol
//! used by network thermal receipt printers. Every builder is a pure function
//! returning the exact bytes of one frame.
//!
//! ## Module Structure
//!
//! - [`commands`]: Basic printer commands (reinitialize, feed, cut, raw)
//! - [`text`]: Text styling (alignment, fonts, bold, underline, size) and text frames
//! - [`codepage`]: Text to code page byte encoding
//! - [`barcode`]: 1D barcodes, QR codes and PDF417
//! - [`graphics`]: 24-dot double-density bit image bands
//!
//! ## Usage Example
//!
//! ```
//! use escpos_net::protocol::{commands, text};
//!
//! let mut data = Vec::new();
//! data.extend(commands::reinitialize());
//! data.extend(text::align(text::Alignment::Center));
//! data.extend(text::bold(true));
//! data.extend(b"RECEIPT\n");
//! data.extend(text::bold(false));
//! data.extend(commands::feed_lines(6));
//! data.extend(commands::cut(commands::CutMode::Full));
//! ```

pub mod barcode;
pub mod codepage;
pub mod commands;
pub mod cp437;
pub mod graphics;
pub mod text;

/// State change the printer undergoes as a side effect of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StateEffect {
    /// Formatting state is unchanged beyond what the frame sets explicitly
    #[default]
    None,
    /// The frame ends with `ESC @`: all formatting is back to defaults
    ResetFormatting,
}

/// An encoded frame plus the state change it implies.
///
/// Builders whose frames reset the printer return a `Frame` instead of bare
/// bytes so the session cannot append the bytes and forget the reset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub bytes: Vec<u8>,
    pub effect: StateEffect,
}

impl Frame {
    pub fn plain(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            effect: StateEffect::None,
        }
    }

    pub fn resetting(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            effect: StateEffect::ResetFormatting,
        }
    }
}
