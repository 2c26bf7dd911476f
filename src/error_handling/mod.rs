//! Error handling.
//!
//! This module provides:
//! - `NetworkError`, the single error type of the HTTP client core
//! - `ErrorKind`, its fieldless category for matching and reporting
//! - `InitializationError` for application setup
//!
//! Nothing in the core retries: a failed call is fully failed and the caller
//! decides whether to try again.

mod types;

// Re-export public API
pub use types::{ErrorKind, InitializationError, NetworkError};
