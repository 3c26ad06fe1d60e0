use crate::ssl::structs::certificate_lease::CertificateLease;
use crate::ssl::structs::handshake_options::HandshakeOptions;
use rustls::ServerConfig;
use std::sync::Arc;

impl std::fmt::Debug for HandshakeOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandshakeOptions")
            .field("domain", &self.domain)
            .field("alpn", &self.server_config.alpn_protocols)
            .field("lease", &self.lease)
            .field("policy", &self.policy)
            .finish()
    }
}

impl HandshakeOptions {
    pub fn into_parts(self) -> (Arc<ServerConfig>, CertificateLease) {
        (self.server_config, self.lease)
    }
}
