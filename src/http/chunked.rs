//! Chunked transfer-encoding decoder.
//!
//! Works on a fully accumulated body, so there is no "need more data" state:
//! running out of input while reading sizes simply ends decoding, and running
//! out inside a size line or a chunk is a malformed response.

use log::{debug, warn};

use crate::config::ChunkedMode;
use crate::error_handling::NetworkError;

enum State {
    ReadSize,
    ReadData(usize),
    Done,
}

/// Decodes `body` (everything after the header separator).
///
/// # Errors
///
/// `NetworkError::MalformedResponse` when a size line has no terminator, a
/// size overflows, a chunk is shorter than its declared size, or (in
/// `Strict` mode) a size line is not hex.
pub fn decode(body: &[u8], mode: ChunkedMode) -> Result<Vec<u8>, NetworkError> {
    let mut out = Vec::with_capacity(body.len());
    let mut pos = 0;
    let mut state = State::ReadSize;

    loop {
        state = match state {
            State::ReadSize => {
                while pos < body.len() && matches!(body[pos], b'\r' | b'\n') {
                    pos += 1;
                }
                if pos == body.len() {
                    State::Done
                } else {
                    let size = match mode {
                        ChunkedMode::Lenient => parse_size_lenient(&body[pos..])?,
                        ChunkedMode::Strict => parse_size_strict(&body[pos..])?,
                    };
                    match size {
                        None => State::Done,
                        Some(size) => {
                            let eol = find_byte(&body[pos..], b'\n').ok_or_else(|| {
                                NetworkError::malformed("unterminated chunk size line")
                            })?;
                            pos += eol + 1;
                            State::ReadData(size)
                        }
                    }
                }
            }
            State::ReadData(size) => {
                let end = pos
                    .checked_add(size)
                    .filter(|&end| end <= body.len())
                    .ok_or_else(|| {
                        NetworkError::malformed(format!(
                            "chunk of {size} bytes exceeds remaining {} bytes",
                            body.len() - pos
                        ))
                    })?;
                out.extend_from_slice(&body[pos..end]);
                pos = end;
                if body[pos..].starts_with(b"\r\n") {
                    pos += 2;
                }
                State::ReadSize
            }
            State::Done => break,
        };
    }

    debug!("Decoded chunked body: {} -> {} bytes", body.len(), out.len());
    Ok(out)
}

/// `strtol(line, _, 16)` semantics. `None` means "stop decoding": the size was
/// zero, negative or had no digits at all.
fn parse_size_lenient(line: &[u8]) -> Result<Option<usize>, NetworkError> {
    let mut i = 0;
    while i < line.len() && matches!(line[i], b' ' | b'\t' | b'\x0b' | b'\x0c') {
        i += 1;
    }

    let negative = match line.get(i) {
        Some(b'-') => {
            i += 1;
            true
        }
        Some(b'+') => {
            i += 1;
            false
        }
        _ => false,
    };

    if line.len() > i + 2
        && line[i] == b'0'
        && matches!(line[i + 1], b'x' | b'X')
        && line[i + 2].is_ascii_hexdigit()
    {
        i += 2;
    }

    let digits = line[i..]
        .iter()
        .take_while(|b| b.is_ascii_hexdigit())
        .count();
    if digits == 0 {
        warn!("Chunk size line has no hex digits; ending body");
        return Ok(None);
    }

    // strtol clamps a huge negative value to LONG_MIN, still <= 0
    if negative {
        return Ok(None);
    }

    let size = parse_hex(&line[i..i + digits])?;
    Ok((size > 0).then_some(size))
}

fn parse_size_strict(line: &[u8]) -> Result<Option<usize>, NetworkError> {
    let eol = find_byte(line, b'\n').unwrap_or(line.len());
    let token = line[..eol]
        .split(|&b| b == b';')
        .next()
        .unwrap_or_default()
        .trim_ascii();

    if token.is_empty() || !token.iter().all(u8::is_ascii_hexdigit) {
        return Err(NetworkError::malformed(format!(
            "invalid chunk size line {:?}",
            String::from_utf8_lossy(&line[..eol])
        )));
    }

    let size = parse_hex(token)?;
    Ok((size > 0).then_some(size))
}

fn parse_hex(digits: &[u8]) -> Result<usize, NetworkError> {
    digits.iter().try_fold(0usize, |acc, &b| {
        let digit = (b as char).to_digit(16).unwrap_or(0) as usize;
        acc.checked_mul(16)
            .and_then(|v| v.checked_add(digit))
            .ok_or_else(|| NetworkError::malformed("chunk size overflows"))
    })
}

fn find_byte(data: &[u8], needle: u8) -> Option<usize> {
    data.iter().position(|&b| b == needle)
}
