use crate::ssl::enums::certificate_error::CertificateError;
use crate::ssl::enums::encryption_policy::EncryptionPolicy;
use crate::ssl::enums::revocation_mode::RevocationMode;
use crate::ssl::structs::cert_entity::CertEntity;
use crate::ssl::structs::handshake_policy::HandshakePolicy;
use crate::ssl::structs::leased_certificate_resolver::LeasedCertificateResolver;
use crate::ssl::structs::tls_capabilities::TlsCapabilities;
use log::{debug, warn};
use rustls::crypto::CryptoProvider;
use rustls::pki_types::CertificateRevocationListDer;
use rustls::server::danger::ClientCertVerifier;
use rustls::server::{NoServerSessionStorage, ServerSessionMemoryCache, StoresServerSessions, WebPkiClientVerifier};
use rustls::sign::CertifiedKey;
use rustls::{RootCertStore, ServerConfig, SupportedProtocolVersion};
use sha2::{Digest, Sha256};
use std::path::Path;
use std::sync::Arc;

const SESSION_CACHE_SIZE: usize = 256;

impl std::fmt::Debug for HandshakePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandshakePolicy")
            .field("domain", &self.entity.domain)
            .field("cipher_suites", &self.cipher_suite_names())
            .field("versions", &self.version_names())
            .field("client_auth", &self.client_verifier.is_some())
            .field("alpn", &self.entity.alpn)
            .field("session_resumption", &self.entity.allow_session_resumption)
            .field("warnings", &self.warnings)
            .finish()
    }
}

impl HandshakePolicy {
    pub fn compile(entity: &CertEntity, capabilities: &TlsCapabilities) -> Result<Self, CertificateError> {
        let mut warnings = Vec::new();
        let (provider, cipher_order_enforced) = Self::select_cipher_suites(entity, capabilities, &mut warnings);
        let versions = Self::select_versions(entity, capabilities, &mut warnings);
        let trial = ServerConfig::builder_with_provider(Arc::clone(&provider))
            .with_protocol_versions(&versions)
            .map(|_| ());
        let (provider, versions) = match trial {
            Ok(()) => (provider, versions),
            Err(error) => {
                Self::unsupported(
                    &mut warnings,
                    format!("{}: cipher suites and protocols do not combine ({}), using defaults", entity.domain, error),
                );
                (Arc::new(rustls::crypto::ring::default_provider()), rustls::DEFAULT_VERSIONS.to_vec())
            }
        };
        let mut material = Sha256::new();
        let client_verifier = Self::build_client_verifier(entity, capabilities, &provider, &mut warnings, &mut material)?;
        if entity.allow_renegotiation && !capabilities.renegotiation {
            Self::unsupported(&mut warnings, format!("{}: renegotiation is never offered", entity.domain));
        }
        if entity.encryption_policy != EncryptionPolicy::RequireEncryption && !capabilities.null_encryption {
            Self::unsupported(
                &mut warnings,
                format!("{}: {:?} not available, encryption stays required", entity.domain, entity.encryption_policy),
            );
        }
        Ok(Self {
            entity: entity.clone(),
            provider,
            versions,
            client_verifier,
            alpn_protocols: entity.alpn.iter().map(|name| name.as_bytes().to_vec()).collect(),
            cipher_order_enforced,
            session_storage: Self::session_storage(entity),
            material_hash: hex::encode_upper(material.finalize()),
            warnings,
        })
    }

    /// Builds the connection's `ServerConfig` around an already leased key.
    pub fn server_config(&self, certified_key: Arc<CertifiedKey>) -> Result<Arc<ServerConfig>, CertificateError> {
        let builder = ServerConfig::builder_with_provider(Arc::clone(&self.provider))
            .with_protocol_versions(&self.versions)
            .map_err(|e| CertificateError::PolicyUnsupported(format!("{}: {}", self.entity.domain, e)))?;
        let builder = match &self.client_verifier {
            Some(verifier) => builder.with_client_cert_verifier(Arc::clone(verifier)),
            None => builder.with_no_client_auth(),
        };
        let mut config = builder.with_cert_resolver(Arc::new(LeasedCertificateResolver::new(certified_key)));
        config.alpn_protocols = self.alpn_protocols.clone();
        config.ignore_client_order = self.cipher_order_enforced;
        config.session_storage = Arc::clone(&self.session_storage);
        if !self.entity.allow_session_resumption {
            config.send_tls13_tickets = 0;
        }
        Ok(Arc::new(config))
    }

    pub fn entity(&self) -> &CertEntity {
        &self.entity
    }

    /// Changes when the client CA or CRL files change, even if the entity does not.
    pub fn material_hash(&self) -> &str {
        &self.material_hash
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn alpn_protocols(&self) -> &[Vec<u8>] {
        &self.alpn_protocols
    }

    pub fn requires_client_auth(&self) -> bool {
        self.client_verifier.is_some() && self.entity.client_cert_required
    }

    pub fn cipher_suite_names(&self) -> Vec<String> {
        self.provider.cipher_suites.iter().map(TlsCapabilities::suite_name).collect()
    }

    pub fn version_names(&self) -> Vec<String> {
        self.versions.iter().map(|version| format!("{:?}", version.version)).collect()
    }

    fn session_storage(entity: &CertEntity) -> Arc<dyn StoresServerSessions> {
        if entity.allow_session_resumption {
            ServerSessionMemoryCache::new(SESSION_CACHE_SIZE)
        } else {
            Arc::new(NoServerSessionStorage {})
        }
    }

    fn unsupported(warnings: &mut Vec<String>, message: String) {
        let error = CertificateError::PolicyUnsupported(message);
        warn!("[CERTIFICATE] {}", error);
        warnings.push(error.to_string());
    }

    fn select_cipher_suites(
        entity: &CertEntity,
        capabilities: &TlsCapabilities,
        warnings: &mut Vec<String>,
    ) -> (Arc<CryptoProvider>, bool) {
        let defaults = rustls::crypto::ring::default_provider();
        if entity.cipher_suites.is_empty() {
            return (Arc::new(defaults), false);
        }
        if !capabilities.cipher_policy {
            Self::unsupported(warnings, format!("{}: cipher policy not available on this stack", entity.domain));
            return (Arc::new(defaults), false);
        }
        let mut selected = Vec::with_capacity(entity.cipher_suites.len());
        for name in &entity.cipher_suites {
            let wanted = TlsCapabilities::normalize_suite_name(name);
            match defaults.cipher_suites.iter().find(|suite| TlsCapabilities::suite_name(suite) == wanted) {
                Some(suite) if !selected.iter().any(|chosen: &rustls::SupportedCipherSuite| chosen.suite() == suite.suite()) => {
                    selected.push(*suite);
                }
                Some(_) => {}
                None => Self::unsupported(warnings, format!("{}: unknown cipher suite {}", entity.domain, name)),
            }
        }
        if selected.is_empty() {
            Self::unsupported(warnings, format!("{}: no configured cipher suite is available, using defaults", entity.domain));
            return (Arc::new(defaults), false);
        }
        (Arc::new(CryptoProvider { cipher_suites: selected, ..defaults }), true)
    }

    fn select_versions(
        entity: &CertEntity,
        capabilities: &TlsCapabilities,
        warnings: &mut Vec<String>,
    ) -> Vec<&'static SupportedProtocolVersion> {
        if entity.protocols.is_empty() {
            return rustls::DEFAULT_VERSIONS.to_vec();
        }
        let mut versions = Vec::new();
        for protocol in entity.protocols.iter() {
            match protocol.rustls_version() {
                Some(version) => versions.push(version),
                None if !capabilities.legacy_protocols => {
                    Self::unsupported(warnings, format!("{}: protocol {} is not offered", entity.domain, protocol));
                }
                None => {}
            }
        }
        if versions.is_empty() {
            Self::unsupported(warnings, format!("{}: no usable protocol configured, using defaults", entity.domain));
            return rustls::DEFAULT_VERSIONS.to_vec();
        }
        versions
    }

    fn build_client_verifier(
        entity: &CertEntity,
        capabilities: &TlsCapabilities,
        provider: &Arc<CryptoProvider>,
        warnings: &mut Vec<String>,
        material: &mut Sha256,
    ) -> Result<Option<Arc<dyn ClientCertVerifier>>, CertificateError> {
        let ca_path = match &entity.client_ca_path {
            Some(path) => path,
            None if entity.client_cert_required => {
                return Err(CertificateError::Config(format!(
                    "{}: client certificates are required but no client_ca_path is set",
                    entity.domain
                )));
            }
            None => return Ok(None),
        };
        let ca_bytes = std::fs::read(ca_path)
            .map_err(|e| CertificateError::FileNotFound(format!("{}: {}", ca_path.display(), e)))?;
        material.update(&ca_bytes);
        let mut roots = RootCertStore::empty();
        for cert in rustls_pemfile::certs(&mut ca_bytes.as_slice()) {
            let cert = cert.map_err(|e| CertificateError::Parse(format!("{}: {}", ca_path.display(), e)))?;
            roots
                .add(cert)
                .map_err(|e| CertificateError::Config(format!("{}: {}", ca_path.display(), e)))?;
        }
        if roots.is_empty() {
            return Err(CertificateError::Config(format!(
                "{}: no CA certificates found",
                ca_path.display()
            )));
        }
        let crls = match entity.revocation_mode {
            RevocationMode::NoCheck => {
                if !entity.crl_paths.is_empty() {
                    debug!("[CERTIFICATE] {}: revocation checking disabled, CRLs ignored", entity.domain);
                }
                Vec::new()
            }
            RevocationMode::Online => {
                if !capabilities.online_revocation {
                    Self::unsupported(
                        warnings,
                        format!("{}: online revocation is not available, checking configured CRLs only", entity.domain),
                    );
                }
                Self::load_crls(&entity.crl_paths, material)?
            }
            RevocationMode::Offline => {
                if entity.crl_paths.is_empty() {
                    warn!("[CERTIFICATE] {}: offline revocation requested without crl_paths", entity.domain);
                }
                Self::load_crls(&entity.crl_paths, material)?
            }
        };
        let mut builder = WebPkiClientVerifier::builder_with_provider(Arc::new(roots), Arc::clone(provider));
        if !crls.is_empty() {
            builder = builder.with_crls(crls);
        }
        if !entity.client_cert_required {
            builder = builder.allow_unauthenticated();
        }
        builder
            .build()
            .map(Some)
            .map_err(|e| CertificateError::Config(format!("{}: client verifier: {}", entity.domain, e)))
    }

    fn load_crls<P: AsRef<Path>>(
        paths: &[P],
        material: &mut Sha256,
    ) -> Result<Vec<CertificateRevocationListDer<'static>>, CertificateError> {
        let mut crls = Vec::new();
        for path in paths {
            let path = path.as_ref();
            let bytes = std::fs::read(path)
                .map_err(|e| CertificateError::FileNotFound(format!("{}: {}", path.display(), e)))?;
            material.update(&bytes);
            let before = crls.len();
            for crl in rustls_pemfile::crls(&mut bytes.as_slice()) {
                crls.push(crl.map_err(|e| CertificateError::Parse(format!("{}: {}", path.display(), e)))?);
            }
            if crls.len() == before && !bytes.is_empty() {
                crls.push(CertificateRevocationListDer::from(bytes));
            }
        }
        Ok(crls)
    }
}
