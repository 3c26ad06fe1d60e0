use serde::{Deserialize, Serialize};

/// One `[certificates.<domain>]` table. Enum-like fields stay strings so a
/// typo rejects only its own domain, not the whole file.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct CertificateConfig {
    pub format: String,
    pub primary_path: String,
    /// PEM key file, or the PKCS12 passphrase.
    pub secondary_path: Option<String>,
    pub protocols: Option<Vec<String>>,
    pub cipher_suites: Option<Vec<String>>,
    pub alpn: Option<Vec<String>>,
    pub client_cert_required: Option<bool>,
    pub client_ca_path: Option<String>,
    pub crl_paths: Option<Vec<String>>,
    pub revocation_mode: Option<String>,
    pub allow_renegotiation: Option<bool>,
    pub allow_session_resumption: Option<bool>,
    pub encryption_policy: Option<String>,
}
