use crate::ssl::structs::certificate_lease::CertificateLease;
use crate::ssl::structs::handshake_policy::HandshakePolicy;
use rustls::ServerConfig;
use std::sync::Arc;

/// What the transport needs to finish one handshake. The lease travels with
/// the connection and is returned when the connection is dropped.
pub struct HandshakeOptions {
    pub domain: String,
    pub server_config: Arc<ServerConfig>,
    pub lease: CertificateLease,
    pub policy: Arc<HandshakePolicy>,
}
