//! # Printer Endpoint Configuration
//!
//! Where a session sends its jobs and how.
//!
//! ## Usage
//!
//! ```
//! use std::time::Duration;
//! use escpos_net::printer::{PrinterEndpoint, PrinterMode};
//!
//! let endpoint = PrinterEndpoint::new("192.168.1.30", 9100, PrinterMode::Buffered)
//!     .with_timeout(Duration::from_secs(2));
//! assert_eq!(endpoint.address(), "192.168.1.30:9100");
//! ```

use std::fmt;
use std::time::Duration;

/// Raw TCP printing port (JetDirect)
pub const DEFAULT_PORT: u16 = 9100;

/// Connect and send timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// # Transmission Mode
///
/// | Mode | Behavior |
/// |------|----------|
/// | Direct | every operation is sent as soon as it is encoded |
/// | Buffered | operations accumulate until `flush()` |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrinterMode {
    #[default]
    Direct,
    Buffered,
}

impl fmt::Display for PrinterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrinterMode::Direct => f.write_str("direct"),
            PrinterMode::Buffered => f.write_str("buffered"),
        }
    }
}

/// Network location and transmission policy of a printer.
///
/// Fixed for the lifetime of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrinterEndpoint {
    host: String,
    port: u16,
    mode: PrinterMode,
    timeout: Duration,
}

impl PrinterEndpoint {
    pub fn new(host: impl Into<String>, port: u16, mode: PrinterMode) -> Self {
        Self {
            host: host.into(),
            port,
            mode,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Override the connect/send timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn mode(&self) -> PrinterMode {
        self.mode
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// `host:port`, with IPv6 literals bracketed.
    pub fn address(&self) -> String {
        if self.host.contains(':') && !self.host.starts_with('[') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }
}
