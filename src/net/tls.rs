//! TLS session over a connected TCP socket.

use std::io::{self, Read, Write};
use std::net::TcpStream;
use std::sync::Arc;

use log::debug;
use rustls::pki_types::ServerName;
use rustls::{ClientConfig, ClientConnection, StreamOwned};

use crate::error_handling::NetworkError;

/// An established client TLS session. Owns the socket underneath it.
///
/// Dropping the session sends `close_notify` (best effort) and then closes
/// the socket.
pub struct TlsSession {
    stream: StreamOwned<ClientConnection, TcpStream>,
}

impl TlsSession {
    /// Negotiated protocol version, e.g. `TLSv1_3`.
    pub fn protocol_version(&self) -> Option<rustls::ProtocolVersion> {
        self.stream.conn.protocol_version()
    }

    /// Negotiated cipher suite.
    pub fn cipher_suite(&self) -> Option<rustls::SupportedCipherSuite> {
        self.stream.conn.negotiated_cipher_suite()
    }
}

/// Performs a client handshake on `sock`.
///
/// `server_name` is used for SNI and certificate verification. The socket
/// moves into this call: on failure it is dropped here together with the
/// partial TLS state, on success it belongs to the returned session.
///
/// # Errors
///
/// `NetworkError::Tls` if `server_name` is not a valid DNS name or IP, the
/// connection object cannot be created, or the handshake fails (including
/// certificate verification).
pub fn handshake(
    mut sock: TcpStream,
    context: Arc<ClientConfig>,
    server_name: &str,
) -> Result<TlsSession, NetworkError> {
    let name = ServerName::try_from(server_name.to_string())
        .map_err(|e| NetworkError::Tls(format!("invalid server name {server_name:?}: {e}")))?;

    let mut conn = ClientConnection::new(context, name)
        .map_err(|e| NetworkError::Tls(format!("failed to create TLS session: {e}")))?;

    while conn.is_handshaking() {
        conn.complete_io(&mut sock).map_err(|e| {
            NetworkError::Tls(format!("handshake with {server_name} failed: {e}"))
        })?;
    }

    debug!(
        "TLS established with {server_name}: {:?} {:?}",
        conn.protocol_version(),
        conn.negotiated_cipher_suite().map(|cs| cs.suite())
    );

    Ok(TlsSession {
        stream: StreamOwned::new(conn, sock),
    })
}

impl Read for TlsSession {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.stream.read(buf)
    }
}

impl Write for TlsSession {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.stream.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.stream.flush()
    }
}

impl Drop for TlsSession {
    fn drop(&mut self) {
        self.stream.conn.send_close_notify();
        // Write-only: never block waiting for the peer's close_notify
        while self.stream.conn.wants_write() {
            if self.stream.conn.write_tls(&mut self.stream.sock).is_err() {
                break;
            }
        }
        debug!("TLS session closed");
    }
}
