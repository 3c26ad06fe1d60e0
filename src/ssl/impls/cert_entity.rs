use crate::ssl::enums::certificate_format::CertificateFormat;
use crate::ssl::enums::encryption_policy::EncryptionPolicy;
use crate::ssl::enums::revocation_mode::RevocationMode;
use crate::ssl::ssl::{normalize_server_name, DEFAULT_ALPN};
use crate::ssl::structs::cert_entity::CertEntity;
use crate::ssl::structs::protocol_set::ProtocolSet;
use std::path::{Path, PathBuf};

impl std::fmt::Debug for CertEntity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let secondary = match self.format {
            CertificateFormat::Pkcs12 if !self.secondary.is_empty() => "<redacted>",
            _ => self.secondary.as_str(),
        };
        f.debug_struct("CertEntity")
            .field("domain", &self.domain)
            .field("format", &self.format)
            .field("primary_path", &self.primary_path)
            .field("secondary", &secondary)
            .field("protocols", &self.protocols)
            .field("cipher_suites", &self.cipher_suites)
            .field("alpn", &self.alpn)
            .field("client_cert_required", &self.client_cert_required)
            .field("client_ca_path", &self.client_ca_path)
            .field("crl_paths", &self.crl_paths)
            .field("revocation_mode", &self.revocation_mode)
            .field("allow_renegotiation", &self.allow_renegotiation)
            .field("allow_session_resumption", &self.allow_session_resumption)
            .field("encryption_policy", &self.encryption_policy)
            .finish()
    }
}

impl CertEntity {
    pub fn new(domain: &str, format: CertificateFormat, primary_path: impl AsRef<Path>, secondary: &str) -> Self {
        Self {
            domain: normalize_server_name(domain),
            format,
            primary_path: primary_path.as_ref().to_path_buf(),
            secondary: secondary.to_string(),
            protocols: ProtocolSet::empty(),
            cipher_suites: Vec::new(),
            alpn: DEFAULT_ALPN.iter().map(|name| name.to_string()).collect(),
            client_cert_required: false,
            client_ca_path: None,
            crl_paths: Vec::new(),
            revocation_mode: RevocationMode::NoCheck,
            allow_renegotiation: false,
            allow_session_resumption: true,
            encryption_policy: EncryptionPolicy::RequireEncryption,
        }
    }

    pub fn pem(domain: &str, cert_path: impl AsRef<Path>, key_path: impl AsRef<Path>) -> Self {
        Self::new(domain, CertificateFormat::Pem, cert_path, &key_path.as_ref().to_string_lossy())
    }

    pub fn pkcs12(domain: &str, archive_path: impl AsRef<Path>, passphrase: &str) -> Self {
        Self::new(domain, CertificateFormat::Pkcs12, archive_path, passphrase)
    }

    pub fn with_protocols(mut self, protocols: ProtocolSet) -> Self {
        self.protocols = protocols;
        self
    }

    pub fn with_cipher_suites(mut self, cipher_suites: &[&str]) -> Self {
        self.cipher_suites = cipher_suites.iter().map(|name| name.to_string()).collect();
        self
    }

    pub fn with_alpn(mut self, alpn: &[&str]) -> Self {
        self.alpn = alpn.iter().map(|name| name.to_string()).collect();
        self
    }

    pub fn with_client_auth(mut self, ca_path: impl AsRef<Path>, required: bool) -> Self {
        self.client_ca_path = Some(ca_path.as_ref().to_path_buf());
        self.client_cert_required = required;
        self
    }

    /// Separate PEM key file, if one is configured.
    pub fn key_path(&self) -> Option<PathBuf> {
        match self.format {
            CertificateFormat::Pem if !self.secondary.is_empty() => Some(PathBuf::from(&self.secondary)),
            _ => None,
        }
    }

    pub fn passphrase(&self) -> &str {
        match self.format {
            CertificateFormat::Pkcs12 => &self.secondary,
            CertificateFormat::Pem => "",
        }
    }
}
