//! Minimal HTTP/1.1 over an already-established byte stream.
//!
//! - `request`: GET request encoding and full-length sending
//! - `buffer` / `accumulator`: read-until-close into a growable buffer
//! - `response` / `chunked`: framing of the accumulated bytes
//!
//! Nothing here knows about sockets or TLS; [`exchange`] runs over any
//! `Read + Write` stream, which is how the tests drive it.

pub mod accumulator;
pub mod buffer;
pub mod chunked;
pub mod request;
pub mod response;

use std::io::{Read, Write};

use log::debug;

use crate::config::ClientSettings;
use crate::error_handling::NetworkError;

pub use buffer::GrowableBuffer;
pub use request::GetRequest;
pub use response::HttpResponse;

/// Sends one GET over `stream`, reads until the peer closes, releases the
/// stream and frames what was read.
///
/// The stream is taken by value and dropped before framing starts, on every
/// path.
///
/// # Errors
///
/// Any of `RequestWrite`, `OutOfMemory`, `ResponseRead` or
/// `MalformedResponse`.
pub fn exchange<S: Read + Write>(
    mut stream: S,
    host: &str,
    path: &str,
    settings: &ClientSettings,
) -> Result<HttpResponse, NetworkError> {
    GetRequest::new(host, path).send(&mut stream)?;
    let raw = accumulator::accumulate(&mut stream, settings.max_response_bytes)?;
    drop(stream);
    debug!("Connection to {host} released");

    response::frame(raw.as_slice(), settings.chunked_mode)
}
