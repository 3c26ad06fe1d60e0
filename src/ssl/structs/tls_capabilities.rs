use serde::Serialize;

/// What the linked TLS stack can honor, probed once per process.
#[derive(Debug, Clone, Serialize)]
pub struct TlsCapabilities {
    pub cipher_policy: bool,
    pub legacy_protocols: bool,
    pub renegotiation: bool,
    pub online_revocation: bool,
    pub null_encryption: bool,
    pub cipher_suites: Vec<String>,
}
