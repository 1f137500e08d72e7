//! JSON schema types for print jobs.

use std::path::PathBuf;

use serde::Deserialize;

use crate::protocol::barcode::{CodeSet, Correction, HriPosition, Size2D, Symbol2D, Symbology};
use crate::protocol::commands::CutMode;
use crate::protocol::text::{Alignment, Font, Underline};

fn default_true() -> bool {
    true
}

/// Top-level job document.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Job {
    /// Operations, replayed in order.
    pub operations: Vec<Operation>,
    /// Directory relative image paths are resolved against.
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

/// A single session operation.
#[derive(Debug, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Operation {
    /// Append the reset preamble.
    Init,
    /// Discard whatever is pending.
    Clear,
    Raw(JobRaw),
    Repeat(JobRepeat),
    Text(JobText),
    Feed(JobFeed),
    Cut(JobCut),
    Size(JobSize),
    Underline(JobUnderline),
    Bold(JobToggle),
    Invert(JobToggle),
    Font(JobFont),
    Rotate(JobToggle),
    Align(JobAlign),
    Barcode(JobBarcode),
    Code2d(JobCode2d),
    Image(JobImage),
}

impl Operation {
    /// The `op` tag, for diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Init => "init",
            Operation::Clear => "clear",
            Operation::Raw(_) => "raw",
            Operation::Repeat(_) => "repeat",
            Operation::Text(_) => "text",
            Operation::Feed(_) => "feed",
            Operation::Cut(_) => "cut",
            Operation::Size(_) => "size",
            Operation::Underline(_) => "underline",
            Operation::Bold(_) => "bold",
            Operation::Invert(_) => "invert",
            Operation::Font(_) => "font",
            Operation::Rotate(_) => "rotate",
            Operation::Align(_) => "align",
            Operation::Barcode(_) => "barcode",
            Operation::Code2d(_) => "code2d",
            Operation::Image(_) => "image",
        }
    }
}

/// Bytes passed through untouched.
#[derive(Debug, Deserialize)]
pub struct JobRaw {
    pub bytes: Vec<u8>,
}

/// One byte repeated, e.g. a rule of dashes.
#[derive(Debug, Deserialize)]
pub struct JobRepeat {
    pub byte: u8,
    pub count: usize,
}

#[derive(Debug, Deserialize)]
pub struct JobText {
    pub content: String,
    /// If true, no trailing newline.
    #[serde(default, rename = "inline")]
    pub is_inline: bool,
    /// Printer character table (ESC GS t n).
    #[serde(default)]
    pub page_code: Option<u8>,
    /// Host code page the text is encoded with.
    #[serde(default)]
    pub code_page: Option<u16>,
}

#[derive(Debug, Deserialize)]
pub struct JobFeed {
    pub lines: u8,
}

#[derive(Debug, Deserialize)]
pub struct JobCut {
    /// "full" (default) or "partial".
    #[serde(default)]
    pub mode: CutMode,
}

/// Character magnification, 0-7 per axis.
#[derive(Debug, Deserialize)]
pub struct JobSize {
    #[serde(default)]
    pub horizontal: u8,
    #[serde(default)]
    pub vertical: u8,
}

#[derive(Debug, Deserialize)]
pub struct JobUnderline {
    /// "off", "one_dot" or "two_dot".
    pub mode: Underline,
}

/// Shared shape of the on/off operations. `enabled` defaults to true.
#[derive(Debug, Deserialize)]
pub struct JobToggle {
    #[serde(default = "default_true")]
    pub enabled: bool,
}

#[derive(Debug, Deserialize)]
pub struct JobFont {
    pub font: Font,
}

#[derive(Debug, Deserialize)]
pub struct JobAlign {
    pub align: Alignment,
}

/// 1D barcode. Unset layout fields take the barcode defaults.
#[derive(Debug, Deserialize)]
pub struct JobBarcode {
    pub symbology: Symbology,
    pub data: String,
    #[serde(default)]
    pub height: Option<u8>,
    #[serde(default)]
    pub width: Option<u8>,
    #[serde(default)]
    pub hri: Option<HriPosition>,
    #[serde(default)]
    pub hri_font: Option<Font>,
    #[serde(default)]
    pub code_set: Option<CodeSet>,
}

/// QR code or PDF417.
#[derive(Debug, Deserialize)]
pub struct JobCode2d {
    /// "qr_model2" (default), "qr_model1", "qr_micro" or "pdf417".
    #[serde(default)]
    pub symbol: Symbol2D,
    pub data: String,
    #[serde(default)]
    pub size: Size2D,
    #[serde(default)]
    pub correction: Correction,
}

#[derive(Debug, Deserialize)]
pub struct JobImage {
    pub path: PathBuf,
    #[serde(default)]
    pub threshold: Option<u8>,
    /// Output width in dots.
    #[serde(default)]
    pub width: Option<f64>,
    #[serde(default)]
    pub inverted: bool,
}
