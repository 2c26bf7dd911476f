//! DNS resolver initialization.

use hickory_resolver::config::{ResolverConfig, ResolverOpts};
use hickory_resolver::Resolver;
use log::{debug, warn};

use crate::error_handling::NetworkError;

/// Initializes the blocking DNS resolver used for host lookups.
///
/// Reads the system configuration (`/etc/resolv.conf` on Unix). If that
/// fails, falls back to the library default configuration (Google public DNS).
/// Search-domain appending is disabled (`ndots = 0`) since only fully
/// qualified API hosts are looked up.
///
/// # Errors
///
/// Returns `NetworkError::Resolution` if both configurations fail to produce
/// a resolver.
pub fn init_resolver() -> Result<Resolver, NetworkError> {
    match Resolver::from_system_conf() {
        Ok(resolver) => {
            debug!("Using system DNS configuration");
            Ok(resolver)
        }
        Err(e) => {
            warn!("Failed to read system DNS configuration ({e}); using default resolvers");
            let mut opts = ResolverOpts::default();
            opts.ndots = 0;
            Resolver::new(ResolverConfig::default(), opts).map_err(|e| {
                NetworkError::Resolution {
                    host: String::new(),
                    reason: format!("resolver initialization failed: {e}"),
                }
            })
        }
    }
}
