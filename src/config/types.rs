//! Configuration types and CLI options.
//!
//! This module defines the settings consumed by the HTTP client and the
//! `clap` parser that builds them from the command line.

use clap::{Args, Parser, Subcommand, ValueEnum};
use thiserror::Error;

use crate::config::constants::{HOST, PORT};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Which resolver turns the host name into an IPv4 address.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ResolverKind {
    /// hickory DNS resolver built from the system configuration
    Dns,
    /// Platform resolver (`getaddrinfo`)
    System,
}

/// How strictly chunk-size lines are parsed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ChunkedMode {
    /// `strtol`-style parse; an unparsable size ends decoding like the
    /// terminating zero-size chunk.
    #[default]
    Lenient,
    /// An unparsable size is a malformed response.
    Strict,
}

/// Settings for [`HttpClient`](crate::net::HttpClient).
///
/// # Examples
///
/// ```
/// use muslimkit::config::{ChunkedMode, ClientSettings};
///
/// let settings = ClientSettings {
///     chunked_mode: ChunkedMode::Strict,
///     ..Default::default()
/// };
/// assert!(settings.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    /// TCP port to connect to
    pub port: u16,

    /// Resolver implementation
    pub resolver: ResolverKind,

    /// Chunk-size parsing mode
    pub chunked_mode: ChunkedMode,

    /// Upper bound on the accumulated response size. `None` means the buffer
    /// grows until allocation fails.
    pub max_response_bytes: Option<usize>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            port: PORT,
            resolver: ResolverKind::Dns,
            chunked_mode: ChunkedMode::Lenient,
            max_response_bytes: None,
        }
    }
}

/// A settings field that failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {field}: {message}")]
pub struct ConfigValidationError {
    /// Name of the offending field
    pub field: &'static str,
    /// What is wrong and what is accepted
    pub message: String,
}

impl ClientSettings {
    /// Checks the settings for values the client cannot work with.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigValidationError`] naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.port == 0 {
            return Err(ConfigValidationError {
                field: "port",
                message: "must be greater than 0".to_string(),
            });
        }
        if self.max_response_bytes == Some(0) {
            return Err(ConfigValidationError {
                field: "max_response_bytes",
                message: "must be greater than 0 when set".to_string(),
            });
        }
        Ok(())
    }
}

/// Command-line interface of the `muslimkit` binary.
#[derive(Debug, Parser)]
#[command(
    name = "muslimkit",
    version,
    about = "Indonesian prayer times from api.myquran.com"
)]
pub struct Cli {
    /// Log level
    #[arg(long, value_enum, default_value_t = LogLevel::Warn, global = true)]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value_t = LogFormat::Plain, global = true)]
    pub log_format: LogFormat,

    /// Resolver used for the API host
    #[arg(long, value_enum, default_value_t = ResolverKind::Dns, global = true)]
    pub resolver: ResolverKind,

    /// Reject unparsable chunk-size lines instead of ending the body there
    #[arg(long, global = true)]
    pub strict_chunked: bool,

    /// Fail responses larger than this many bytes
    #[arg(long, global = true)]
    pub max_response_bytes: Option<usize>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List every city known to the API
    Cities {
        /// Only show cities whose name contains this text (case-insensitive)
        #[arg(long)]
        search: Option<String>,
    },
    /// Show the monthly prayer schedule of a city
    Schedule(ScheduleArgs),
    /// Perform a raw GET and print the response
    Get {
        /// Request path, e.g. /v2/sholat/kota/semua
        path: String,
        /// Host to contact
        #[arg(long, default_value = HOST)]
        host: String,
        /// Print the header block before the body
        #[arg(long)]
        include_headers: bool,
    },
}

/// Arguments of `muslimkit schedule`.
#[derive(Debug, Args)]
pub struct ScheduleArgs {
    /// City identifier as listed by `muslimkit cities`
    pub city_id: String,
    /// Year (defaults to the current year)
    #[arg(long)]
    pub year: Option<i32>,
    /// Month 1-12 (defaults to the current month)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
    pub month: Option<u32>,
    /// Only print today's entry
    #[arg(long)]
    pub today: bool,
}

impl Cli {
    /// Builds client settings from the global flags.
    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            resolver: self.resolver,
            chunked_mode: if self.strict_chunked {
                ChunkedMode::Strict
            } else {
                ChunkedMode::Lenient
            },
            max_response_bytes: self.max_response_bytes,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(
            log::LevelFilter::from(LogLevel::Error),
            log::LevelFilter::Error
        );
        assert_eq!(log::LevelFilter::from(LogLevel::Warn), log::LevelFilter::Warn);
        assert_eq!(log::LevelFilter::from(LogLevel::Info), log::LevelFilter::Info);
        assert_eq!(
            log::LevelFilter::from(LogLevel::Debug),
            log::LevelFilter::Debug
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Trace),
            log::LevelFilter::Trace
        );
    }

    #[test]
    fn test_default_settings_are_valid() {
        let settings = ClientSettings::default();
        assert_eq!(settings.port, 443);
        assert_eq!(settings.resolver, ResolverKind::Dns);
        assert_eq!(settings.chunked_mode, ChunkedMode::Lenient);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_zero_port_rejected() {
        let settings = ClientSettings {
            port: 0,
            ..Default::default()
        };
        let err = settings.validate().unwrap_err();
        assert_eq!(err.field, "port");
        assert!(err.message.contains("greater than 0"));
    }

    #[test]
    fn test_zero_response_cap_rejected() {
        let settings = ClientSettings {
            max_response_bytes: Some(0),
            ..Default::default()
        };
        let err = settings.validate().unwrap_err();
        assert_eq!(err.field, "max_response_bytes");
    }

    #[test]
    fn test_cli_flags_map_to_settings() {
        let cli = Cli::parse_from([
            "muslimkit",
            "--strict-chunked",
            "--resolver",
            "system",
            "--max-response-bytes",
            "1024",
            "cities",
        ]);
        let settings = cli.client_settings();
        assert_eq!(settings.chunked_mode, ChunkedMode::Strict);
        assert_eq!(settings.resolver, ResolverKind::System);
        assert_eq!(settings.max_response_bytes, Some(1024));
        assert_eq!(settings.port, 443);
    }
}
