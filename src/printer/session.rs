//! # Printer Session
//!
//! A [`Printer`] owns one job buffer, one transport and the endpoint it talks
//! to. Every public operation encodes its frame, appends it to the buffer and,
//! in direct mode, sends the buffer right away.
//!
//! ## Buffer Lifecycle
//!
//! ```text
//!   new ──► Primed (ESC @ ESC S) ──append──► Accumulating ──flush ok──► Empty
//!                 │                              │    ▲                   │
//!                 └───────────clear──────────────┴────┼───────────────────┘
//!                                                     └──── append ◄──────┘
//! ```
//!
//! - An operation whose parameters are invalid appends nothing.
//! - A failed send leaves the buffer untouched, so flushing again retries the
//!   same bytes. In direct mode the failed bytes go out with the next
//!   operation.
//! - Dropping the session does not flush. Unsent buffered bytes are lost.
//!
//! ## Example
//!
//! ```
//! use escpos_net::printer::{Printer, PrinterEndpoint, PrinterMode};
//! use escpos_net::transport::MemoryTransport;
//!
//! let endpoint = PrinterEndpoint::new("192.168.1.30", 9100, PrinterMode::Buffered);
//! let mut printer = Printer::new(endpoint, MemoryTransport::new());
//!
//! printer.print_text("ceci est un test")?;
//! printer.feed(10)?;
//! printer.cut()?;
//! printer.flush()?;
//!
//! assert_eq!(printer.transport().jobs().len(), 1);
//! # Ok::<(), escpos_net::EscPosError>(())
//! ```

use tracing::{debug, warn};

use super::buffer::JobBuffer;
use super::config::{PrinterEndpoint, PrinterMode};
use crate::error::{EscPosError, Result};
use crate::protocol::barcode::{self, BarcodeOptions, Correction, Size2D, Symbol2D, Symbology};
use crate::protocol::codepage::{CodePageEncoder, StandardCodePages};
use crate::protocol::commands::{self, CutMode};
use crate::protocol::text::{self, Alignment, Font, TextOptions, Underline};
use crate::protocol::{Frame, StateEffect, graphics};
use crate::raster::{self, PixelSource, RasterOptions};
use crate::transport::{TcpTransport, Transport};

/// Formatting the printer is currently in, as far as this session knows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FormatState {
    pub bold: bool,
    pub inverted: bool,
    pub underline: Underline,
    pub font: Font,
    pub rotated: bool,
    pub alignment: Alignment,
    /// (horizontal, vertical) magnification steps
    pub magnification: (u8, u8),
}

/// A printing session bound to one endpoint.
pub struct Printer<T: Transport = TcpTransport> {
    endpoint: PrinterEndpoint,
    transport: T,
    buffer: JobBuffer,
    format: FormatState,
    encoder: Box<dyn CodePageEncoder + Send + Sync>,
}

impl Printer<TcpTransport> {
    /// Session over raw TCP.
    pub fn connect(endpoint: PrinterEndpoint) -> Self {
        Self::new(endpoint, TcpTransport::new())
    }
}

impl<T: Transport> Printer<T> {
    pub fn new(endpoint: PrinterEndpoint, transport: T) -> Self {
        Self {
            endpoint,
            transport,
            buffer: JobBuffer::primed(),
            format: FormatState::default(),
            encoder: Box::new(StandardCodePages),
        }
    }

    /// Replace the code page service used by text operations.
    #[must_use]
    pub fn with_encoder(mut self, encoder: impl CodePageEncoder + Send + Sync + 'static) -> Self {
        self.encoder = Box::new(encoder);
        self
    }

    pub fn endpoint(&self) -> &PrinterEndpoint {
        &self.endpoint
    }

    pub fn mode(&self) -> PrinterMode {
        self.endpoint.mode()
    }

    /// Bytes not yet delivered.
    pub fn pending(&self) -> &[u8] {
        self.buffer.as_bytes()
    }

    pub fn format(&self) -> &FormatState {
        &self.format
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    // ========================================================================
    // BUFFER CONTROL
    // ========================================================================

    /// Append the reset preamble. Formatting returns to defaults.
    pub fn reinitialize(&mut self) -> Result<()> {
        self.submit(Frame::resetting(commands::reinitialize()), |_| {})
    }

    /// Discard pending bytes without sending them.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Send everything pending. Only valid in buffered mode.
    pub fn flush(&mut self) -> Result<()> {
        if self.mode() != PrinterMode::Buffered {
            return Err(EscPosError::ModeViolation(format!(
                "flush() requires buffered mode, session is in {} mode",
                self.mode()
            )));
        }
        self.transmit()
    }

    fn transmit(&mut self) -> Result<()> {
        if self.buffer.is_empty() {
            debug!(addr = %self.endpoint.address(), "nothing to send");
            return Ok(());
        }
        debug!(
            addr = %self.endpoint.address(),
            mode = %self.mode(),
            bytes = self.buffer.len(),
            "sending job"
        );
        self.transport.send(&self.endpoint, self.buffer.as_bytes())?;
        self.buffer.clear();
        Ok(())
    }

    fn submit(&mut self, frame: Frame, update: impl FnOnce(&mut FormatState)) -> Result<()> {
        self.buffer.append(&frame.bytes);
        update(&mut self.format);
        if frame.effect == StateEffect::ResetFormatting {
            self.format = FormatState::default();
        }
        if self.mode() == PrinterMode::Direct {
            self.transmit()?;
        }
        Ok(())
    }

    fn submit_bytes(&mut self, bytes: Vec<u8>) -> Result<()> {
        self.submit(Frame::plain(bytes), |_| {})
    }

    // ========================================================================
    // RAW AND TEXT
    // ========================================================================

    /// Append bytes as-is.
    pub fn print_raw(&mut self, data: &[u8]) -> Result<()> {
        self.submit_bytes(data.to_vec())
    }

    /// Append `byte` `count` times; `count` must be at least 1.
    pub fn print_repeated(&mut self, byte: u8, count: usize) -> Result<()> {
        let bytes = commands::repeat(byte, count)?;
        self.submit_bytes(bytes)
    }

    /// Print one line of text in Windows-1252.
    pub fn print_text(&mut self, content: &str) -> Result<()> {
        self.print_text_with(content, TextOptions::default())
    }

    pub fn print_text_with(&mut self, content: &str, options: TextOptions) -> Result<()> {
        let bytes = text::text(self.encoder.as_ref(), content, options)?;
        self.submit_bytes(bytes)
    }

    // ========================================================================
    // PAPER
    // ========================================================================

    pub fn feed(&mut self, lines: u8) -> Result<()> {
        self.submit_bytes(commands::feed_lines(lines))
    }

    /// Full cut.
    pub fn cut(&mut self) -> Result<()> {
        self.cut_with(CutMode::Full)
    }

    pub fn cut_with(&mut self, mode: CutMode) -> Result<()> {
        self.submit_bytes(commands::cut(mode))
    }

    // ========================================================================
    // FORMATTING
    // ========================================================================

    /// Character magnification, 0..=7 on each axis.
    pub fn set_magnification(&mut self, horizontal: u8, vertical: u8) -> Result<()> {
        let bytes = text::magnification(horizontal, vertical)?;
        self.submit(Frame::plain(bytes), |f| f.magnification = (horizontal, vertical))
    }

    pub fn set_underline(&mut self, mode: Underline) -> Result<()> {
        self.submit(Frame::plain(text::underline(mode)), |f| f.underline = mode)
    }

    pub fn set_bold(&mut self, enabled: bool) -> Result<()> {
        self.submit(Frame::plain(text::bold(enabled)), |f| f.bold = enabled)
    }

    pub fn set_inverted(&mut self, enabled: bool) -> Result<()> {
        self.submit(Frame::plain(text::inverted(enabled)), |f| f.inverted = enabled)
    }

    pub fn set_font(&mut self, font: Font) -> Result<()> {
        self.submit(Frame::plain(text::font(font)), |f| f.font = font)
    }

    pub fn set_clockwise_rotation(&mut self, enabled: bool) -> Result<()> {
        self.submit(Frame::plain(text::rotate_clockwise(enabled)), |f| f.rotated = enabled)
    }

    pub fn set_align(&mut self, alignment: Alignment) -> Result<()> {
        self.submit(Frame::plain(text::align(alignment)), |f| f.alignment = alignment)
    }

    // ========================================================================
    // BARCODES AND IMAGES
    // ========================================================================

    pub fn print_barcode(
        &mut self,
        symbology: Symbology,
        data: &str,
        options: BarcodeOptions,
    ) -> Result<()> {
        let bytes = barcode::barcode(symbology, data, options)?;
        self.submit_bytes(bytes)
    }

    pub fn print_2d(
        &mut self,
        symbol: Symbol2D,
        data: &[u8],
        size: Size2D,
        level: Correction,
    ) -> Result<()> {
        let bytes = barcode::symbol_2d(symbol, data, size, level)?;
        self.submit_bytes(bytes)
    }

    /// Print an image. The printer is reinitialized afterwards, so all
    /// formatting is back to defaults.
    pub fn print_image<S: PixelSource + ?Sized>(
        &mut self,
        source: &S,
        options: RasterOptions,
    ) -> Result<()> {
        let bitmap = raster::monochrome(source, options)?;
        let frame = graphics::image(&bitmap)?;
        self.submit(frame, |_| {})
    }
}

impl<T: Transport> Drop for Printer<T> {
    fn drop(&mut self) {
        if self.buffer.has_operations() {
            warn!(
                addr = %self.endpoint.address(),
                bytes = self.buffer.len(),
                "session dropped with unsent bytes"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::MemoryTransport;

    const PREAMBLE: [u8; 4] = [0x1B, 0x40, 0x1B, 0x53];

    fn session(mode: PrinterMode) -> Printer<MemoryTransport> {
        Printer::new(PrinterEndpoint::new("test", 9100, mode), MemoryTransport::new())
    }

    #[test]
    fn test_direct_mode_sends_each_operation() {
        let mut printer = session(PrinterMode::Direct);
        printer.set_bold(true).unwrap();
        printer.feed(2).unwrap();

        let jobs = printer.transport().jobs();
        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0], [&PREAMBLE[..], &[0x1B, 0x45, 1]].concat());
        assert_eq!(jobs[1], vec![0x1B, 0x64, 2]);
        assert!(printer.pending().is_empty());
    }

    #[test]
    fn test_flush_in_direct_mode_is_violation() {
        let mut printer = session(PrinterMode::Direct);
        assert!(matches!(printer.flush(), Err(EscPosError::ModeViolation(_))));
        assert_eq!(printer.transport().attempts(), 0);
    }

    #[test]
    fn test_buffered_accumulates_until_flush() {
        let mut printer = session(PrinterMode::Buffered);
        printer.print_raw(b"A").unwrap();
        printer.print_raw(b"B").unwrap();
        assert!(printer.transport().jobs().is_empty());

        printer.flush().unwrap();
        assert_eq!(printer.transport().jobs(), &[[&PREAMBLE[..], b"AB"].concat()]);
    }

    #[test]
    fn test_append_flush_append() {
        let mut printer = session(PrinterMode::Buffered);
        printer.print_raw(b"first").unwrap();
        printer.flush().unwrap();
        printer.print_raw(b"second").unwrap();
        assert_eq!(printer.pending(), b"second");
    }

    #[test]
    fn test_clear_discards_without_sending() {
        let mut printer = session(PrinterMode::Buffered);
        printer.print_raw(b"junk").unwrap();
        printer.clear();
        assert!(printer.pending().is_empty());
        printer.flush().unwrap();
        assert_eq!(printer.transport().attempts(), 0);
    }

    #[test]
    fn test_failed_flush_preserves_buffer() {
        let mut printer = session(PrinterMode::Buffered);
        printer.print_text("retry me").unwrap();
        let before = printer.pending().to_vec();

        printer.transport_mut().fail_next(1);
        assert!(matches!(printer.flush(), Err(EscPosError::Transport(_))));
        assert_eq!(printer.pending(), &before[..]);

        printer.flush().unwrap();
        assert_eq!(printer.transport().jobs(), &[before]);
    }

    #[test]
    fn test_direct_failure_rides_with_next_operation() {
        let mut printer = session(PrinterMode::Direct);
        printer.transport_mut().fail_next(1);
        assert!(printer.feed(1).is_err());
        printer.feed(2).unwrap();

        let expected = [&PREAMBLE[..], &[0x1B, 0x64, 1, 0x1B, 0x64, 2]].concat();
        assert_eq!(printer.transport().jobs(), &[expected]);
    }

    #[test]
    fn test_invalid_parameter_appends_nothing() {
        let mut printer = session(PrinterMode::Buffered);
        assert!(printer.set_magnification(8, 0).is_err());
        assert!(printer.print_repeated(b'-', 0).is_err());
        let options = BarcodeOptions {
            width: 7,
            ..BarcodeOptions::default()
        };
        assert!(printer.print_barcode(Symbology::Code39, "A", options).is_err());
        assert_eq!(printer.pending(), &PREAMBLE);
        assert_eq!(printer.format(), &FormatState::default());
    }

    #[test]
    fn test_invalid_parameter_in_direct_mode_sends_nothing() {
        let mut printer = session(PrinterMode::Direct);
        assert!(printer.set_magnification(0, 9).is_err());
        assert_eq!(printer.transport().attempts(), 0);
    }

    #[test]
    fn test_format_state_tracking() {
        let mut printer = session(PrinterMode::Buffered);
        printer.set_bold(true).unwrap();
        printer.set_align(Alignment::Center).unwrap();
        printer.set_magnification(1, 2).unwrap();
        printer.set_underline(Underline::TwoDot).unwrap();

        let format = printer.format();
        assert!(format.bold);
        assert_eq!(format.alignment, Alignment::Center);
        assert_eq!(format.magnification, (1, 2));
        assert_eq!(format.underline, Underline::TwoDot);
    }

    #[test]
    fn test_reinitialize_resets_format() {
        let mut printer = session(PrinterMode::Buffered);
        printer.set_inverted(true).unwrap();
        printer.reinitialize().unwrap();
        assert_eq!(printer.format(), &FormatState::default());
        assert!(printer.pending().ends_with(&PREAMBLE));
    }

    #[test]
    fn test_image_resets_format() {
        let mut printer = session(PrinterMode::Buffered);
        printer.set_font(Font::B).unwrap();
        printer.set_clockwise_rotation(true).unwrap();

        let img = image::RgbImage::from_pixel(4, 4, image::Rgb([255, 255, 255]));
        let options = RasterOptions {
            width_dots: 4.0,
            ..RasterOptions::default()
        };
        printer.print_image(&img, options).unwrap();

        assert_eq!(printer.format(), &FormatState::default());
        assert!(printer.pending().ends_with(&PREAMBLE));
    }

    #[test]
    fn test_custom_encoder() {
        struct Upper;
        impl CodePageEncoder for Upper {
            fn encode(&self, text: &str, _code_page: u16) -> Result<Vec<u8>> {
                Ok(text.to_uppercase().into_bytes())
            }
        }

        let mut printer = session(PrinterMode::Buffered).with_encoder(Upper);
        printer.clear();
        printer.print_text_with("abc", TextOptions::inline()).unwrap();
        assert_eq!(printer.pending(), &[0x1B, 0x1D, 0x74, 32, b'A', b'B', b'C']);
    }
}
