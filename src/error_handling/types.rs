//! Error type definitions.
//!
//! This module defines the errors raised by the HTTP client core and by
//! application initialization.

use std::io;
use std::net::SocketAddrV4;

use log::SetLoggerError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),
}

/// Errors produced by a single GET exchange.
///
/// Every variant is returned only after all resources acquired by the call
/// (socket, TLS session, partial buffers) have been released.
#[derive(Error, Debug)]
pub enum NetworkError {
    /// The host name did not resolve to an IPv4 address.
    #[error("failed to resolve {host}: {reason}")]
    Resolution {
        /// Host that was looked up
        host: String,
        /// Resolver message
        reason: String,
    },

    /// The TCP connection could not be established.
    #[error("failed to connect to {addr}: {source}")]
    Connect {
        /// Address that refused or timed out
        addr: SocketAddrV4,
        /// Underlying socket error
        #[source]
        source: io::Error,
    },

    /// TLS context creation, server name setup or handshake failed.
    #[error("TLS error: {0}")]
    Tls(String),

    /// The encoded request could not be fully transmitted.
    #[error("request write failed after {written} of {expected} bytes: {source}")]
    RequestWrite {
        /// Bytes accepted by the session before the failure
        written: usize,
        /// Length of the encoded request
        expected: usize,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Growing the response buffer failed.
    #[error("out of memory growing response buffer to {requested} bytes")]
    OutOfMemory {
        /// Capacity that could not be obtained
        requested: usize,
    },

    /// Reading the response failed before end-of-stream.
    #[error("failed to read response: {0}")]
    ResponseRead(#[source] io::Error),

    /// The response could not be framed.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl NetworkError {
    /// Shorthand for [`NetworkError::MalformedResponse`].
    pub(crate) fn malformed(msg: impl Into<String>) -> Self {
        NetworkError::MalformedResponse(msg.into())
    }

    /// Category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            NetworkError::Resolution { .. } => ErrorKind::ResolutionError,
            NetworkError::Connect { .. } => ErrorKind::ConnectError,
            NetworkError::Tls(_) => ErrorKind::TlsError,
            NetworkError::RequestWrite { .. } => ErrorKind::RequestWriteError,
            NetworkError::OutOfMemory { .. } => ErrorKind::OutOfMemoryError,
            NetworkError::ResponseRead(_) => ErrorKind::ResponseReadError,
            NetworkError::MalformedResponse(_) => ErrorKind::MalformedResponseError,
        }
    }
}

/// Fieldless categories of [`NetworkError`], for callers that only branch on
/// what went wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
#[allow(clippy::enum_variant_names)]
pub enum ErrorKind {
    /// See [`NetworkError::Resolution`]
    ResolutionError,
    /// See [`NetworkError::Connect`]
    ConnectError,
    /// See [`NetworkError::Tls`]
    TlsError,
    /// See [`NetworkError::RequestWrite`]
    RequestWriteError,
    /// See [`NetworkError::OutOfMemory`]
    OutOfMemoryError,
    /// See [`NetworkError::ResponseRead`]
    ResponseReadError,
    /// See [`NetworkError::MalformedResponse`]
    MalformedResponseError,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ErrorKind {
    /// Human-readable label, used by `Display`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::ResolutionError => "Host resolution error",
            ErrorKind::ConnectError => "TCP connect error",
            ErrorKind::TlsError => "TLS error",
            ErrorKind::RequestWriteError => "Request write error",
            ErrorKind::OutOfMemoryError => "Out of memory",
            ErrorKind::ResponseReadError => "Response read error",
            ErrorKind::MalformedResponseError => "Malformed response",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::net::Ipv4Addr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_error_kind_as_str_unique() {
        let labels: HashSet<&str> = ErrorKind::iter().map(|k| k.as_str()).collect();
        assert_eq!(labels.len(), ErrorKind::iter().count());
    }

    #[test]
    fn test_error_kind_display_matches_as_str() {
        for kind in ErrorKind::iter() {
            assert_eq!(kind.to_string(), kind.as_str());
        }
    }

    #[test]
    fn test_kind_mapping() {
        let err = NetworkError::Resolution {
            host: "nowhere.invalid".into(),
            reason: "no record".into(),
        };
        assert_eq!(err.kind(), ErrorKind::ResolutionError);

        let err = NetworkError::Connect {
            addr: SocketAddrV4::new(Ipv4Addr::LOCALHOST, 443),
            source: io::Error::from(io::ErrorKind::ConnectionRefused),
        };
        assert_eq!(err.kind(), ErrorKind::ConnectError);
        assert!(err.to_string().contains("127.0.0.1:443"));

        assert_eq!(
            NetworkError::OutOfMemory { requested: 8192 }.kind(),
            ErrorKind::OutOfMemoryError
        );
        assert_eq!(
            NetworkError::malformed("no header/body boundary").kind(),
            ErrorKind::MalformedResponseError
        );
    }

    #[test]
    fn test_request_write_message_reports_progress() {
        let err = NetworkError::RequestWrite {
            written: 10,
            expected: 64,
            source: io::Error::from(io::ErrorKind::WriteZero),
        };
        let msg = err.to_string();
        assert!(msg.contains("10 of 64"), "unexpected message: {msg}");
    }
}
