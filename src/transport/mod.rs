//! # Printer Transport Layer
//!
//! This module provides the delivery backends a session hands its job bytes
//! to.
//!
//! ## Available Transports
//!
//! - [`tcp`]: raw TCP (port 9100) to a network printer
//! - [`memory`]: records jobs in memory, for dry runs and tests
//!
//! A transport call is blocking and all-or-nothing from the session's point
//! of view: on error the session keeps its buffer so the same bytes can be
//! sent again.

pub mod memory;
pub mod tcp;

pub use memory::MemoryTransport;
pub use tcp::TcpTransport;

use crate::error::TransportError;
use crate::printer::PrinterEndpoint;

/// Sends a complete job to a printer endpoint.
pub trait Transport {
    /// Deliver `data` to `endpoint`, bounded by `endpoint.timeout()`.
    fn send(&mut self, endpoint: &PrinterEndpoint, data: &[u8]) -> Result<(), TransportError>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn send(&mut self, endpoint: &PrinterEndpoint, data: &[u8]) -> Result<(), TransportError> {
        (**self).send(endpoint, data)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn send(&mut self, endpoint: &PrinterEndpoint, data: &[u8]) -> Result<(), TransportError> {
        (**self).send(endpoint, data)
    }
}
