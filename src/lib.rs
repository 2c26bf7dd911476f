//! muslimkit library: a minimal HTTPS client and the myquran.com prayer-times API
//!
//! The core is a small blocking HTTP/1.1 client written directly on top of a
//! TCP socket and a rustls session: resolve, connect, handshake, send one
//! `GET` with `Connection: close`, read until the peer closes, then frame the
//! bytes into a status code, the raw header block and a (possibly chunked)
//! body. The [`domain`] module decodes the API's JSON on top of it.
//!
//! # Example
//!
//! ```no_run
//! use muslimkit::config::ClientSettings;
//! use muslimkit::domain::{fetch_prayer_times, Period};
//! use muslimkit::HttpClient;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HttpClient::new(ClientSettings::default())?;
//! let times = fetch_prayer_times(&client, "1301", Period::current())?;
//! for day in &times.schedule {
//!     println!("{} fajr {} maghrib {}", day.iso_date, day.fajr, day.maghrib);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Nothing is pooled: every request opens and closes its own connection, and
//! all resources are released before a call returns.

#![warn(missing_docs)]

pub mod config;
pub mod domain;
mod error_handling;
pub mod http;
pub mod initialization;
pub mod net;

// Re-export public API
pub use config::{ClientSettings, LogFormat, LogLevel};
pub use error_handling::{ErrorKind, InitializationError, NetworkError};
pub use http::HttpResponse;
pub use net::{perform_get, HttpClient};
