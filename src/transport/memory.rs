//! # In-Memory Transport
//!
//! Keeps every delivered job instead of sending it anywhere. Used by the CLI's
//! `--dump` option and by tests, which can also make upcoming sends fail to
//! exercise the retry path.

use std::io;

use super::Transport;
use crate::error::TransportError;
use crate::printer::PrinterEndpoint;

/// Records jobs in delivery order.
#[derive(Debug, Default, Clone)]
pub struct MemoryTransport {
    jobs: Vec<Vec<u8>>,
    failures: usize,
    attempts: usize,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `n` sends fail with a connection error.
    pub fn fail_next(&mut self, n: usize) {
        self.failures = n;
    }

    /// Jobs delivered so far, one entry per successful send.
    pub fn jobs(&self) -> &[Vec<u8>] {
        &self.jobs
    }

    /// Every delivered byte, concatenated.
    pub fn bytes(&self) -> Vec<u8> {
        self.jobs.concat()
    }

    /// Number of send calls, failed ones included.
    pub fn attempts(&self) -> usize {
        self.attempts
    }
}

impl Transport for MemoryTransport {
    fn send(&mut self, endpoint: &PrinterEndpoint, data: &[u8]) -> Result<(), TransportError> {
        self.attempts += 1;
        if self.failures > 0 {
            self.failures -= 1;
            return Err(TransportError::ConnectFailed {
                addr: endpoint.address(),
                source: io::Error::new(io::ErrorKind::ConnectionRefused, "simulated failure"),
            });
        }
        self.jobs.push(data.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::printer::PrinterMode;

    #[test]
    fn records_and_fails_on_demand() {
        let endpoint = PrinterEndpoint::new("mem", 1, PrinterMode::Buffered);
        let mut transport = MemoryTransport::new();
        transport.fail_next(1);

        assert!(transport.send(&endpoint, b"one").is_err());
        transport.send(&endpoint, b"two").unwrap();
        transport.send(&endpoint, b"three").unwrap();

        assert_eq!(transport.attempts(), 3);
        assert_eq!(transport.jobs(), &[b"two".to_vec(), b"three".to_vec()]);
        assert_eq!(transport.bytes(), b"twothree".to_vec());
    }
}
