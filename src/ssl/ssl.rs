use crate::ssl::structs::certificate_store::CertificateStore;
use crate::ssl::structs::handshake_adapter::HandshakeAdapter;
use crate::ssl::structs::tls_capabilities::TlsCapabilities;
use once_cell::sync::Lazy;
use std::sync::Arc;

/// Catch-all entry used when no domain or alias matches.
pub const DEFAULT_DOMAIN: &str = "default";

pub const DEFAULT_ALPN: [&str; 2] = ["h2", "http/1.1"];

static TLS_CAPABILITIES: Lazy<TlsCapabilities> = Lazy::new(TlsCapabilities::detect);

pub fn tls_capabilities() -> &'static TlsCapabilities {
    &TLS_CAPABILITIES
}

pub fn create_certificate_store() -> Arc<CertificateStore> {
    Arc::new(CertificateStore::new())
}

pub fn create_handshake_adapter(store: Arc<CertificateStore>) -> Arc<HandshakeAdapter> {
    Arc::new(HandshakeAdapter::new(store))
}

/// Lower-cases a host name and strips one trailing dot.
pub fn normalize_server_name(name: &str) -> String {
    let trimmed = name.trim();
    trimmed.strip_suffix('.').unwrap_or(trimmed).to_ascii_lowercase()
}

/// Maps configuration ALPN names to their wire identifiers.
pub fn alpn_wire_name(name: &str) -> String {
    match name.trim() {
        "Http11" | "http11" => "http/1.1".to_string(),
        "Http2" | "http2" => "h2".to_string(),
        "Http3" | "http3" => "h3".to_string(),
        other => other.to_string(),
    }
}
