//! Configuration constants.
//!
//! Fixed endpoint of the prayer-times API plus the sizes used by the
//! response accumulator.

/// HTTPS port used for every request.
pub const PORT: u16 = 443;

/// API host. Used both for DNS resolution and for TLS SNI/certificate checks.
pub const HOST: &str = "api.myquran.com";

/// API version prefix shared by all endpoints.
pub const API_VERSION: &str = "/v2";

/// City list endpoint (relative to `API_VERSION`).
pub const CITY_ENDPOINT: &str = "/sholat/kota/semua";

/// Monthly schedule endpoint prefix (relative to `API_VERSION`).
/// Followed by `/{city_id}/{year}/{month}`.
pub const PRAYER_TIME_ENDPOINT: &str = "/sholat/jadwal";

/// Size of the stack transfer window used for each read from the TLS session.
pub const READ_WINDOW_SIZE: usize = 4096;

/// Capacity allocated by the first append into an empty response buffer.
pub const INITIAL_BUFFER_CAPACITY: usize = 4096;

/// Separator between the header block and the body.
pub const HEADER_SEPARATOR: &[u8] = b"\r\n\r\n";

/// Header marker that switches body decoding to chunked transfer encoding.
/// Matched case-sensitively against the raw header block.
pub const CHUNKED_MARKER: &str = "Transfer-Encoding: chunked";

/// Status codes are at most this many characters wide.
pub const STATUS_CODE_WIDTH: usize = 3;
