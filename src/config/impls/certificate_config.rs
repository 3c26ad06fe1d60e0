use crate::ssl::enums::certificate_error::CertificateError;
use crate::ssl::enums::certificate_format::CertificateFormat;
use crate::ssl::enums::encryption_policy::EncryptionPolicy;
use crate::ssl::enums::revocation_mode::RevocationMode;
use crate::ssl::enums::tls_protocol::TlsProtocol;
use crate::ssl::ssl::{alpn_wire_name, normalize_server_name, DEFAULT_DOMAIN};
use crate::ssl::structs::cert_entity::CertEntity;
use crate::config::structs::certificate_config::CertificateConfig;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Path, PathBuf};

static DOMAIN_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\*\.)?[a-z0-9]([a-z0-9-]{0,61}[a-z0-9])?(\.[a-z0-9]([a-z0-9-]{0,61}[a-z0-9])?)*$")
        .expect("domain pattern")
});

static CIPHER_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^TLS[0-9]*_[A-Z0-9_]+$").expect("cipher pattern"));

impl CertificateConfig {
    /// Validates the table and turns it into a `CertEntity`. Relative paths
    /// resolve against `base`.
    pub fn to_entity(&self, domain: &str, base: Option<&Path>) -> Result<CertEntity, CertificateError> {
        let domain = normalize_server_name(domain);
        if domain != DEFAULT_DOMAIN && !DOMAIN_REGEX.is_match(&domain) {
            return Err(CertificateError::Config(format!("invalid domain name '{}'", domain)));
        }
        let format: CertificateFormat = self.format.parse()?;
        if self.primary_path.trim().is_empty() {
            return Err(CertificateError::Config(format!("{}: primary_path is empty", domain)));
        }
        let secondary = match (format, self.secondary_path.as_deref()) {
            (CertificateFormat::Pem, Some(path)) if !path.trim().is_empty() => {
                Self::resolve_path(path, base).to_string_lossy().to_string()
            }
            (CertificateFormat::Pem, _) => String::new(),
            (CertificateFormat::Pkcs12, passphrase) => passphrase.unwrap_or_default().to_string(),
        };
        let mut entity = CertEntity::new(&domain, format, Self::resolve_path(&self.primary_path, base), &secondary);

        if let Some(protocols) = &self.protocols {
            entity.protocols = protocols
                .iter()
                .map(|name| name.parse::<TlsProtocol>())
                .collect::<Result<_, _>>()?;
        }
        if let Some(cipher_suites) = &self.cipher_suites {
            for name in cipher_suites {
                if !CIPHER_REGEX.is_match(&name.trim().to_ascii_uppercase()) {
                    return Err(CertificateError::Config(format!("{}: invalid cipher suite name '{}'", domain, name)));
                }
            }
            entity.cipher_suites = cipher_suites.clone();
        }
        if let Some(alpn) = &self.alpn {
            entity.alpn = alpn.iter().map(|name| alpn_wire_name(name)).collect();
        }
        entity.client_cert_required = self.client_cert_required.unwrap_or(false);
        entity.client_ca_path = self
            .client_ca_path
            .as_deref()
            .filter(|path| !path.trim().is_empty())
            .map(|path| Self::resolve_path(path, base));
        if entity.client_cert_required && entity.client_ca_path.is_none() {
            return Err(CertificateError::Config(format!(
                "{}: client_cert_required needs client_ca_path",
                domain
            )));
        }
        entity.crl_paths = self
            .crl_paths
            .iter()
            .flatten()
            .map(|path| Self::resolve_path(path, base))
            .collect();
        if let Some(mode) = &self.revocation_mode {
            entity.revocation_mode = mode.parse::<RevocationMode>()?;
        }
        entity.allow_renegotiation = self.allow_renegotiation.unwrap_or(false);
        entity.allow_session_resumption = self.allow_session_resumption.unwrap_or(true);
        if let Some(policy) = &self.encryption_policy {
            entity.encryption_policy = policy.parse::<EncryptionPolicy>()?;
        }
        Ok(entity)
    }

    fn resolve_path(path: &str, base: Option<&Path>) -> PathBuf {
        let path = Path::new(path.trim());
        match base {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }
}
