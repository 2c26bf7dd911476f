//! Response accumulation.
//!
//! Reads a `Connection: close` response until the peer closes the stream,
//! copying each read from a fixed stack window into a [`GrowableBuffer`].

use std::io::{self, Read};

use log::{debug, trace};

use crate::config::READ_WINDOW_SIZE;
use crate::error_handling::NetworkError;
use crate::http::buffer::GrowableBuffer;

/// Reads `reader` to end-of-stream.
///
/// A zero-byte read ends the loop. `UnexpectedEof` also ends it: rustls
/// reports a peer that closed TCP without sending `close_notify` that way, and
/// plenty of servers do exactly that after `Connection: close`.
///
/// # Arguments
///
/// * `reader` - TLS session (or any byte stream) to drain
/// * `limit` - Optional cap on the buffer capacity
///
/// # Errors
///
/// - `NetworkError::OutOfMemory` if the buffer cannot grow; everything read so
///   far is dropped.
/// - `NetworkError::ResponseRead` for any other I/O error.
pub fn accumulate<R: Read>(
    reader: &mut R,
    limit: Option<usize>,
) -> Result<GrowableBuffer, NetworkError> {
    let mut buffer = match limit {
        Some(limit) => GrowableBuffer::with_limit(limit),
        None => GrowableBuffer::new(),
    };
    let mut window = [0u8; READ_WINDOW_SIZE];

    loop {
        let n = match reader.read(&mut window) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                debug!("Peer closed without close_notify after {} bytes", buffer.len());
                break;
            }
            Err(e) => return Err(NetworkError::ResponseRead(e)),
        };
        trace!("Read {n} bytes");
        buffer.append(&window[..n])?;
    }

    debug!(
        "Accumulated {} bytes (capacity {})",
        buffer.len(),
        buffer.capacity()
    );
    Ok(buffer)
}
