//! Response framing.
//!
//! Turns the raw bytes of a `Connection: close` exchange into an
//! [`HttpResponse`]: header/body split at the first blank line, status code
//! from the status line, and chunked decoding when the header block asks for
//! it.

use log::{debug, warn};

use crate::config::{ChunkedMode, CHUNKED_MARKER, HEADER_SEPARATOR, STATUS_CODE_WIDTH};
use crate::error_handling::NetworkError;
use crate::http::chunked;

/// A framed HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    status_code: u16,
    header_text: String,
    body: Vec<u8>,
}

impl HttpResponse {
    pub(crate) fn new(status_code: u16, header_text: String, body: Vec<u8>) -> Self {
        Self {
            status_code,
            header_text,
            body,
        }
    }

    /// HTTP status code (e.g. 200, 404).
    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    /// Whether the status code is 2xx.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    /// Raw header block, status line included, without the trailing blank line.
    pub fn header_text(&self) -> &str {
        &self.header_text
    }

    /// First value of header `name` (case-insensitive), trimmed.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.header_text.split("\r\n").skip(1).find_map(|line| {
            let (k, v) = line.split_once(':')?;
            k.trim().eq_ignore_ascii_case(name).then(|| v.trim())
        })
    }

    /// Decoded body bytes.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Consume the response and return the body bytes.
    pub fn into_body(self) -> Vec<u8> {
        self.body
    }

    /// The body as UTF-8 text.
    ///
    /// # Errors
    ///
    /// `NetworkError::MalformedResponse` if the body is not valid UTF-8.
    pub fn text(&self) -> Result<&str, NetworkError> {
        std::str::from_utf8(&self.body)
            .map_err(|e| NetworkError::malformed(format!("body is not UTF-8: {e}")))
    }
}

/// Frames an accumulated response.
///
/// # Errors
///
/// `NetworkError::MalformedResponse` if there is no `CRLFCRLF`, the status
/// line has fewer than two spaces or no numeric code, or chunked decoding
/// fails.
pub fn frame(raw: &[u8], mode: ChunkedMode) -> Result<HttpResponse, NetworkError> {
    let split = find_subsequence(raw, HEADER_SEPARATOR)
        .ok_or_else(|| NetworkError::malformed("no header/body boundary"))?;
    let header_text = match std::str::from_utf8(&raw[..split]) {
        Ok(text) => text.to_owned(),
        Err(e) => {
            warn!("Header block is not UTF-8 ({e}); replacing invalid bytes");
            String::from_utf8_lossy(&raw[..split]).into_owned()
        }
    };
    let raw_body = &raw[split + HEADER_SEPARATOR.len()..];

    let status_code = parse_status_code(&header_text)?;

    let body = if header_text.contains(CHUNKED_MARKER) {
        chunked::decode(raw_body, mode)?
    } else {
        raw_body.to_vec()
    };

    debug!(
        "Framed response: status {status_code}, {} header bytes, {} body bytes",
        header_text.len(),
        body.len()
    );
    Ok(HttpResponse::new(status_code, header_text, body))
}

/// Extracts the status code from `HTTP/<version> <status> <reason>`.
///
/// The token between the first and second space is cut to three characters
/// before conversion; its leading digits are the code.
pub fn parse_status_code(header_text: &str) -> Result<u16, NetworkError> {
    let status_line = header_text.split("\r\n").next().unwrap_or_default();

    let mut parts = status_line.splitn(3, ' ');
    let _version = parts.next();
    let token = parts.next();
    let token = match (token, parts.next()) {
        (Some(token), Some(_reason)) => token,
        _ => {
            return Err(NetworkError::malformed(format!(
                "status line {status_line:?} has fewer than two spaces"
            )))
        }
    };

    let digits: String = token
        .chars()
        .take(STATUS_CODE_WIDTH)
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().map_err(|_| {
        NetworkError::malformed(format!("status code {token:?} is not numeric"))
    })
}

fn find_subsequence(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
