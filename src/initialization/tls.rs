//! TLS client context initialization.

use std::sync::Arc;

use rustls::crypto::ring::default_provider;
use rustls::{ClientConfig, RootCertStore};

use crate::error_handling::NetworkError;

/// Builds the reusable TLS client context.
///
/// Trusts the Mozilla root set shipped in `webpki-roots`, uses the `ring`
/// crypto provider and rustls' safe default protocol versions. No client
/// certificate. The returned context is immutable and can be shared by any
/// number of connections.
///
/// # Errors
///
/// Returns `NetworkError::Tls` if the provider rejects the protocol versions.
pub fn init_tls_context() -> Result<Arc<ClientConfig>, NetworkError> {
    let mut root_store = RootCertStore::empty();
    root_store.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());

    let config = ClientConfig::builder_with_provider(Arc::new(default_provider()))
        .with_safe_default_protocol_versions()
        .map_err(|e| NetworkError::Tls(format!("failed to create TLS context: {e}")))?
        .with_root_certificates(root_store)
        .with_no_client_auth();

    Ok(Arc::new(config))
}
