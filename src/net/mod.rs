//! Connection setup and the one-shot GET entry point.
//!
//! A GET runs through fixed stages: resolve, connect, TLS handshake, then the
//! HTTP exchange in [`crate::http`]. Each stage owns the resources it creates
//! and hands them to the next stage by value, so every failure path releases
//! exactly what was acquired up to that point.

pub mod resolver;
pub mod tls;
pub mod transport;

use std::io::{Read, Write};
use std::net::SocketAddrV4;
use std::sync::Arc;

use log::{debug, info};
use rustls::ClientConfig;

use crate::config::ClientSettings;
use crate::error_handling::NetworkError;
use crate::http::{self, HttpResponse};
use crate::initialization::init_tls_context;

pub use resolver::{ConfiguredResolver, DnsResolver, Resolve, SystemResolver};
pub use tls::TlsSession;

/// Opens an encrypted byte stream to a resolved address.
pub trait Dial {
    /// Stream handed to the HTTP exchange. Dropping it closes the connection.
    type Stream: Read + Write;

    /// Connects to `addr` and authenticates the peer as `host`.
    ///
    /// # Errors
    ///
    /// `NetworkError::Connect` or `NetworkError::Tls`.
    fn dial(&self, host: &str, addr: SocketAddrV4) -> Result<Self::Stream, NetworkError>;
}

/// TCP plus rustls.
#[derive(Clone)]
pub struct TlsDialer {
    context: Arc<ClientConfig>,
}

impl TlsDialer {
    /// Dialer with a fresh context trusting the webpki root set.
    pub fn new() -> Result<Self, NetworkError> {
        Ok(Self::with_context(init_tls_context()?))
    }

    /// Dialer sharing an existing client context.
    pub fn with_context(context: Arc<ClientConfig>) -> Self {
        Self { context }
    }
}

impl Dial for TlsDialer {
    type Stream = TlsSession;

    fn dial(&self, host: &str, addr: SocketAddrV4) -> Result<TlsSession, NetworkError> {
        let sock = transport::connect(addr)?;
        tls::handshake(sock, Arc::clone(&self.context), host)
    }
}

/// Blocking HTTPS GET client.
///
/// Each call to [`get`](HttpClient::get) opens a new connection and closes it
/// before returning. The resolver and TLS context are reused across calls.
pub struct HttpClient<R = ConfiguredResolver, D = TlsDialer> {
    resolver: R,
    dialer: D,
    settings: ClientSettings,
}

impl HttpClient {
    /// Client using the resolver named in `settings` and a default TLS
    /// context.
    ///
    /// # Errors
    ///
    /// `NetworkError::Resolution` if the DNS resolver cannot be built,
    /// `NetworkError::Tls` if the TLS context cannot be built.
    pub fn new(settings: ClientSettings) -> Result<Self, NetworkError> {
        let resolver = ConfiguredResolver::new(settings.resolver)?;
        let dialer = TlsDialer::new()?;
        Ok(Self::with_parts(resolver, dialer, settings))
    }
}

impl<R: Resolve, D: Dial> HttpClient<R, D> {
    /// Client from explicit parts.
    pub fn with_parts(resolver: R, dialer: D, settings: ClientSettings) -> Self {
        Self {
            resolver,
            dialer,
            settings,
        }
    }

    /// Settings this client was built with.
    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    /// Resolver used for every request.
    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    /// Dialer used for every request.
    pub fn dialer(&self) -> &D {
        &self.dialer
    }

    /// Performs `GET path` against `host` and returns the framed response.
    ///
    /// The connection is closed before this returns, on success and on every
    /// error.
    ///
    /// # Errors
    ///
    /// Any [`NetworkError`]; the variant tells which stage failed.
    pub fn get(&self, host: &str, path: &str) -> Result<HttpResponse, NetworkError> {
        let ip = self.resolver.resolve(host, self.settings.port)?;
        let addr = SocketAddrV4::new(ip, self.settings.port);
        let stream = self.dialer.dial(host, addr)?;
        debug!("GET {path} from {host} ({addr})");

        let response = http::exchange(stream, host, path, &self.settings)?;
        info!(
            "GET {host}{path} -> {} ({} body bytes)",
            response.status_code(),
            response.body().len()
        );
        Ok(response)
    }
}

/// Performs a single `GET path` against `host` on port 443 with default
/// settings.
///
/// # Errors
///
/// Any [`NetworkError`].
///
/// # Examples
///
/// ```no_run
/// let response = muslimkit::perform_get("api.myquran.com", "/v2/sholat/kota/semua")?;
/// assert_eq!(response.status_code(), 200);
/// # Ok::<(), muslimkit::NetworkError>(())
/// ```
pub fn perform_get(host: &str, path: &str) -> Result<HttpResponse, NetworkError> {
    HttpClient::new(ClientSettings::default())?.get(host, path)
}

