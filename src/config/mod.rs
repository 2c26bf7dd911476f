//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (host, endpoints, buffer sizes)
//! - Client settings and their validation
//! - CLI option types and parsing

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{
    ChunkedMode, Cli, ClientSettings, Command, ConfigValidationError, LogFormat, LogLevel,
    ResolverKind, ScheduleArgs,
};
