//! # escpos-net - ESC/POS Network Printer Library
//!
//! escpos-net drives ESC/POS thermal receipt printers over raw TCP
//! (port 9100). It provides:
//!
//! - **Protocol implementation**: byte-exact ESC/POS command builders
//! - **Barcodes**: 1D symbologies, QR codes and PDF417 rendered by the printer
//! - **Rasterization**: color images thresholded into 24-dot bands
//! - **Sessions**: direct or buffered delivery of a job buffer
//! - **Transport**: raw TCP, plus an in-memory recorder
//!
//! ## Quick Start
//!
//! ```no_run
//! use escpos_net::{
//!     printer::{Printer, PrinterEndpoint, PrinterMode, DEFAULT_PORT},
//!     protocol::text::Alignment,
//!     protocol::barcode::{Correction, Size2D, Symbol2D},
//! };
//!
//! let endpoint = PrinterEndpoint::new("192.168.1.30", DEFAULT_PORT, PrinterMode::Buffered);
//! let mut printer = Printer::connect(endpoint);
//!
//! printer.set_align(Alignment::Center)?;
//! printer.set_magnification(1, 1)?;
//! printer.print_text("RECEIPT")?;
//! printer.set_magnification(0, 0)?;
//! printer.print_2d(Symbol2D::QrModel2, b"https://example.com", Size2D::Large, Correction::Percent15)?;
//! printer.feed(4)?;
//! printer.cut()?;
//!
//! // Nothing is sent until the buffered session is flushed
//! printer.flush()?;
//!
//! # Ok::<(), escpos_net::EscPosError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`protocol`] | ESC/POS command builders |
//! | [`raster`] | Image to dot grid conversion |
//! | [`printer`] | Endpoint configuration and sessions |
//! | [`transport`] | Delivery backends |
//! | [`job`] | JSON job descriptions |
//! | [`error`] | Error types |

pub mod error;
pub mod job;
pub mod printer;
pub mod protocol;
pub mod raster;
pub mod transport;

// Re-exports for convenience
pub use error::{EscPosError, TransportError};
pub use printer::{Printer, PrinterEndpoint, PrinterMode};
pub use transport::{MemoryTransport, TcpTransport, Transport};
