//! # Raw TCP Transport
//!
//! Opens a connection per job, writes every byte, and closes. No status is
//! read back from the printer.
//!
//! ## Timeouts
//!
//! The endpoint timeout bounds connecting to each resolved address as well
//! as each blocking write and read on the socket. A timeout surfaces as
//! [`TransportError::Timeout`]; other socket failures are reported as
//! connect or write failures depending on the phase.

use std::io::{self, Write};
use std::net::{Shutdown, SocketAddr, TcpStream, ToSocketAddrs};

use tracing::{debug, info};

use super::Transport;
use crate::error::TransportError;
use crate::printer::PrinterEndpoint;

/// # TCP Printer Transport
///
/// ## Example
///
/// ```no_run
/// use escpos_net::printer::{Printer, PrinterEndpoint, PrinterMode};
/// use escpos_net::transport::TcpTransport;
///
/// let endpoint = PrinterEndpoint::new("192.168.1.30", 9100, PrinterMode::Direct);
/// let mut printer = Printer::new(endpoint, TcpTransport::new());
/// printer.print_text("Hello")?;
///
/// # Ok::<(), escpos_net::EscPosError>(())
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct TcpTransport;

impl TcpTransport {
    pub fn new() -> Self {
        Self
    }

    fn connect(endpoint: &PrinterEndpoint) -> Result<TcpStream, TransportError> {
        let addr = endpoint.address();
        let candidates: Vec<SocketAddr> = (endpoint.host(), endpoint.port())
            .to_socket_addrs()
            .map_err(|source| TransportError::Resolve {
                addr: addr.clone(),
                source,
            })?
            .collect();

        let mut last_err = None;
        for candidate in candidates {
            match TcpStream::connect_timeout(&candidate, endpoint.timeout()) {
                Ok(stream) => return Ok(stream),
                Err(e) => {
                    debug!(%candidate, error = %e, "connect attempt failed");
                    last_err = Some(e);
                }
            }
        }

        let source = last_err.unwrap_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, "no socket address for host")
        });
        if is_timeout(&source) {
            Err(TransportError::Timeout {
                addr,
                timeout: endpoint.timeout(),
            })
        } else {
            Err(TransportError::ConnectFailed { addr, source })
        }
    }
}

impl Transport for TcpTransport {
    fn send(&mut self, endpoint: &PrinterEndpoint, data: &[u8]) -> Result<(), TransportError> {
        let addr = endpoint.address();
        let mut stream = Self::connect(endpoint)?;

        let write_err = |source: io::Error| {
            if is_timeout(&source) {
                TransportError::Timeout {
                    addr: addr.clone(),
                    timeout: endpoint.timeout(),
                }
            } else {
                TransportError::WriteFailed {
                    addr: addr.clone(),
                    source,
                }
            }
        };

        stream
            .set_write_timeout(Some(endpoint.timeout()))
            .map_err(write_err)?;
        stream
            .set_read_timeout(Some(endpoint.timeout()))
            .map_err(write_err)?;
        stream.write_all(data).map_err(write_err)?;
        stream.flush().map_err(write_err)?;
        // Peer may already have closed after reading everything
        let _ = stream.shutdown(Shutdown::Write);

        info!(addr = %addr, bytes = data.len(), "job delivered");
        Ok(())
    }
}

fn is_timeout(e: &io::Error) -> bool {
    matches!(e.kind(), io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::printer::PrinterMode;
    use std::io::Read;
    use std::net::TcpListener;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_delivers_all_bytes() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        let server = thread::spawn(move || {
            let (mut conn, _) = listener.accept().unwrap();
            let mut received = Vec::new();
            conn.read_to_end(&mut received).unwrap();
            received
        });

        let endpoint = PrinterEndpoint::new("127.0.0.1", port, PrinterMode::Buffered);
        let payload: Vec<u8> = (0..100_000u32).map(|i| (i % 251) as u8).collect();
        TcpTransport::new().send(&endpoint, &payload).unwrap();

        assert_eq!(server.join().unwrap(), payload);
    }

    #[test]
    fn test_connection_refused() {
        // Bind then drop to get a port with nobody listening
        let port = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let endpoint = PrinterEndpoint::new("127.0.0.1", port, PrinterMode::Direct)
            .with_timeout(Duration::from_millis(500));

        let err = TcpTransport::new().send(&endpoint, b"x").unwrap_err();
        assert!(matches!(
            err,
            TransportError::ConnectFailed { .. } | TransportError::Timeout { .. }
        ));
    }

    #[test]
    fn test_unresolvable_host() {
        let endpoint = PrinterEndpoint::new("no such host.invalid", 9100, PrinterMode::Direct);
        let err = TcpTransport::new().send(&endpoint, b"x").unwrap_err();
        assert!(matches!(
            err,
            TransportError::Resolve { .. } | TransportError::ConnectFailed { .. }
        ));
    }
}
