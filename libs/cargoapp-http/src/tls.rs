//! TLS setup for the HTTP client.
//!
//! Uses the bundled webpki roots by default so the client works in minimal
//! containers that ship no OS certificate store.

use std::sync::Arc;

/// Get the crypto provider for TLS connections.
///
/// Checks whether a default provider is already installed globally and uses
/// that; otherwise creates a new aws-lc-rs provider without installing it
/// globally. Safe to call from multiple threads.
pub(crate) fn crypto_provider() -> Arc<rustls::crypto::CryptoProvider> {
    rustls::crypto::CryptoProvider::get_default()
        .cloned()
        .unwrap_or_else(|| Arc::new(rustls::crypto::aws_lc_rs::default_provider()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crypto_provider_is_usable() {
        let provider = crypto_provider();
        assert!(!provider.cipher_suites.is_empty());
    }
}
