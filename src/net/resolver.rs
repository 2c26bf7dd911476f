//! Host name resolution.
//!
//! Only the first IPv4 answer is used. Resolver handles live inside the
//! implementing types and are released by `Drop` whatever the outcome.

use std::net::{IpAddr, Ipv4Addr, ToSocketAddrs};

use log::debug;

use crate::config::ResolverKind;
use crate::error_handling::NetworkError;
use crate::initialization::init_resolver;

/// Turns a host name into an IPv4 address.
pub trait Resolve {
    /// Returns the first IPv4 address of `host`.
    ///
    /// # Errors
    ///
    /// `NetworkError::Resolution` when the lookup fails or yields no IPv4
    /// address.
    fn resolve(&self, host: &str, port: u16) -> Result<Ipv4Addr, NetworkError>;
}

/// Resolver backed by hickory's blocking DNS client.
pub struct DnsResolver {
    inner: hickory_resolver::Resolver,
}

impl DnsResolver {
    /// See [`init_resolver`] for how the configuration is chosen.
    pub fn new() -> Result<Self, NetworkError> {
        Ok(Self {
            inner: init_resolver()?,
        })
    }
}

impl Resolve for DnsResolver {
    fn resolve(&self, host: &str, _port: u16) -> Result<Ipv4Addr, NetworkError> {
        let response = self
            .inner
            .lookup_ip(host)
            .map_err(|e| NetworkError::Resolution {
                host: host.to_string(),
                reason: e.to_string(),
            })?;
        first_ipv4(host, response.iter())
    }
}

/// Resolver backed by the platform's `getaddrinfo`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemResolver;

impl Resolve for SystemResolver {
    fn resolve(&self, host: &str, port: u16) -> Result<Ipv4Addr, NetworkError> {
        let addrs = (host, port)
            .to_socket_addrs()
            .map_err(|e| NetworkError::Resolution {
                host: host.to_string(),
                reason: e.to_string(),
            })?;
        first_ipv4(host, addrs.map(|addr| addr.ip()))
    }
}

/// Resolver chosen at runtime from [`ResolverKind`].
pub enum ConfiguredResolver {
    /// hickory DNS
    Dns(DnsResolver),
    /// Platform resolver
    System(SystemResolver),
}

impl ConfiguredResolver {
    /// Builds the resolver named by `kind`.
    ///
    /// # Errors
    ///
    /// `NetworkError::Resolution` if the DNS resolver cannot be initialized.
    pub fn new(kind: ResolverKind) -> Result<Self, NetworkError> {
        Ok(match kind {
            ResolverKind::Dns => ConfiguredResolver::Dns(DnsResolver::new()?),
            ResolverKind::System => ConfiguredResolver::System(SystemResolver),
        })
    }
}

impl Resolve for ConfiguredResolver {
    fn resolve(&self, host: &str, port: u16) -> Result<Ipv4Addr, NetworkError> {
        match self {
            ConfiguredResolver::Dns(r) => r.resolve(host, port),
            ConfiguredResolver::System(r) => r.resolve(host, port),
        }
    }
}

fn first_ipv4(
    host: &str,
    addrs: impl IntoIterator<Item = IpAddr>,
) -> Result<Ipv4Addr, NetworkError> {
    let ip = addrs
        .into_iter()
        .find_map(|ip| match ip {
            IpAddr::V4(v4) => Some(v4),
            IpAddr::V6(_) => None,
        })
        .ok_or_else(|| NetworkError::Resolution {
            host: host.to_string(),
            reason: "no IPv4 address found".to_string(),
        })?;
    debug!("Resolved {host} to {ip}");
    Ok(ip)
}
