use crate::ssl::enums::certificate_format::CertificateFormat;
use crate::ssl::enums::encryption_policy::EncryptionPolicy;
use crate::ssl::enums::revocation_mode::RevocationMode;
use crate::ssl::structs::protocol_set::ProtocolSet;
use std::path::PathBuf;

/// One configured domain: where its credentials live and how its handshakes
/// are shaped. Immutable for the length of a reconcile pass.
#[derive(Clone, PartialEq, Eq)]
pub struct CertEntity {
    pub domain: String,
    pub format: CertificateFormat,
    pub primary_path: PathBuf,
    /// PKCS12 passphrase, or the PEM key file path (empty: key is inside the primary file).
    pub secondary: String,
    pub protocols: ProtocolSet,
    pub cipher_suites: Vec<String>,
    /// ALPN identifiers in wire form (`h2`, `http/1.1`).
    pub alpn: Vec<String>,
    pub client_cert_required: bool,
    pub client_ca_path: Option<PathBuf>,
    pub crl_paths: Vec<PathBuf>,
    pub revocation_mode: RevocationMode,
    pub allow_renegotiation: bool,
    pub allow_session_resumption: bool,
    pub encryption_policy: EncryptionPolicy,
}
