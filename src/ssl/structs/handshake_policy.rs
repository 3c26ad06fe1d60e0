use crate::ssl::structs::cert_entity::CertEntity;
use rustls::crypto::CryptoProvider;
use rustls::server::danger::ClientCertVerifier;
use rustls::server::StoresServerSessions;
use rustls::SupportedProtocolVersion;
use std::sync::Arc;

/// Compiled per-domain TLS policy. Building a `ServerConfig` from it does no I/O.
pub struct HandshakePolicy {
    pub(crate) entity: CertEntity,
    pub(crate) provider: Arc<CryptoProvider>,
    pub(crate) versions: Vec<&'static SupportedProtocolVersion>,
    pub(crate) client_verifier: Option<Arc<dyn ClientCertVerifier>>,
    pub(crate) alpn_protocols: Vec<Vec<u8>>,
    pub(crate) cipher_order_enforced: bool,
    /// Shared by every connection of this policy so sessions can resume.
    pub(crate) session_storage: Arc<dyn StoresServerSessions>,
    /// SHA-256 over the client CA and CRL files the verifier was built from.
    pub(crate) material_hash: String,
    pub(crate) warnings: Vec<String>,
}
