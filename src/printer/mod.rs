//! # Printer Module
//!
//! Endpoint configuration and the printing session built on top of it.
//!
//! ## Modules
//!
//! - [`config`]: where a printer lives and how a session talks to it
//! - [`buffer`]: bytes waiting to be delivered
//! - [`session`]: the [`Printer`] session

pub mod buffer;
pub mod config;
pub mod session;

pub use buffer::JobBuffer;
pub use config::{DEFAULT_PORT, DEFAULT_TIMEOUT, PrinterEndpoint, PrinterMode};
pub use session::{FormatState, Printer};
