//! HTTP/1.1 GET request encoding.

use std::io::{self, Write};

use log::debug;

use crate::error_handling::NetworkError;

const METHOD: &[u8] = b"GET ";
const VERSION: &[u8] = b" HTTP/1.1\r\n";
const HOST_HEADER: &[u8] = b"Host: ";
const TRAILER: &[u8] = b"\r\nConnection: close\r\n\r\n";

/// A `Connection: close` GET request for one path on one host.
///
/// The path is sent byte-for-byte; encoding it is the caller's job.
#[derive(Debug, Clone, Copy)]
pub struct GetRequest<'a> {
    host: &'a str,
    path: &'a str,
}

impl<'a> GetRequest<'a> {
    /// Request for `path` with `host` in the `Host` header.
    pub fn new(host: &'a str, path: &'a str) -> Self {
        Self { host, path }
    }

    /// Exact length of [`render`](Self::render)'s output.
    pub fn encoded_len(&self) -> usize {
        METHOD.len() + self.path.len() + VERSION.len() + HOST_HEADER.len() + self.host.len()
            + TRAILER.len()
    }

    /// Renders `GET {path} HTTP/1.1\r\nHost: {host}\r\nConnection: close\r\n\r\n`
    /// into a buffer allocated at exactly `encoded_len()` bytes.
    pub fn render(&self) -> Vec<u8> {
        let len = self.encoded_len();
        let mut req = Vec::with_capacity(len);
        req.extend_from_slice(METHOD);
        req.extend_from_slice(self.path.as_bytes());
        req.extend_from_slice(VERSION);
        req.extend_from_slice(HOST_HEADER);
        req.extend_from_slice(self.host.as_bytes());
        req.extend_from_slice(TRAILER);
        debug_assert_eq!(req.len(), len);
        req
    }

    /// Writes the whole request to `writer`, looping over short writes.
    ///
    /// # Errors
    ///
    /// Returns `NetworkError::RequestWrite` if the writer fails or accepts zero
    /// bytes before the full request has gone out.
    pub fn send<W: Write>(&self, writer: &mut W) -> Result<(), NetworkError> {
        let bytes = self.render();
        let expected = bytes.len();
        let mut written = 0;

        while written < expected {
            match writer.write(&bytes[written..]) {
                Ok(0) => {
                    return Err(NetworkError::RequestWrite {
                        written,
                        expected,
                        source: io::Error::from(io::ErrorKind::WriteZero),
                    })
                }
                Ok(n) => written += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(source) => {
                    return Err(NetworkError::RequestWrite {
                        written,
                        expected,
                        source,
                    })
                }
            }
        }

        writer.flush().map_err(|source| NetworkError::RequestWrite {
            written,
            expected,
            source,
        })?;

        debug!("Sent {expected} byte request for {}{}", self.host, self.path);
        Ok(())
    }
}
