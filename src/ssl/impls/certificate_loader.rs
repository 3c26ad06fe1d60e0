use crate::ssl::enums::certificate_error::CertificateError;
use crate::ssl::enums::certificate_format::CertificateFormat;
use crate::ssl::ssl::{normalize_server_name, tls_capabilities, DEFAULT_DOMAIN};
use crate::ssl::structs::cert_entity::CertEntity;
use crate::ssl::structs::certificate::Certificate;
use crate::ssl::structs::certificate_chain::CertificateChain;
use crate::ssl::structs::certificate_loader::CertificateLoader;
use crate::ssl::structs::certificate_summary::CertificateSummary;
use crate::ssl::structs::handshake_policy::HandshakePolicy;
use crate::ssl::structs::pem_block::PemBlock;
use log::{debug, info, warn};
use p12::{CertBag, PKCS12Attribute, SafeBagKind, PFX};
use rustls::pki_types::{CertificateDer, PrivateKeyDer, PrivatePkcs8KeyDer};
use rustls::sign::CertifiedKey;
use rustls::InconsistentKeys;
use rustls_pemfile::Item;
use sha2::{Digest, Sha256};
use std::path::Path;

impl CertificateLoader {
    pub fn new() -> Self {
        Self
    }

    /// Reads and parses the credentials of `entity` and compiles its policy.
    pub fn load(&self, entity: &CertEntity) -> Result<Certificate, CertificateError> {
        let primary = Self::read_file(&entity.primary_path)?;
        let key_file = match entity.key_path() {
            Some(path) => Some(Self::read_file(&path)?),
            None => None,
        };
        let (certs, key) = match entity.format {
            CertificateFormat::Pem => self.load_pem(entity, &primary, key_file.as_deref())?,
            CertificateFormat::Pkcs12 => self.load_pkcs12(entity, &primary)?,
        };
        let domain = normalize_server_name(&entity.domain);
        let source_hash = Self::source_hash(&primary, key_file.as_deref());
        let chain = Self::build_chain(&domain, certs, &key)?;
        let leaf = chain
            .leaf()
            .ok_or_else(|| CertificateError::Parse(format!("{}: empty chain", domain)))?;
        let summary = CertificateSummary::from_der(leaf.as_ref())?;
        if domain != DEFAULT_DOMAIN && !summary.covers(&domain) {
            warn!(
                "[CERTIFICATE] Certificate for {} does not list the domain (names: {:?})",
                domain, summary.dns_names
            );
        }
        let policy = HandshakePolicy::compile(entity, tls_capabilities())?;
        info!(
            "[CERTIFICATE] Loaded {} certificate for {} ({} intermediate(s), hash {})",
            entity.format,
            domain,
            chain.intermediates().len(),
            source_hash
        );
        Ok(Certificate::new(&domain, entity.format, source_hash, summary, chain, policy))
    }

    /// Leaf plus intermediates from concatenated PEM blocks, key from the key
    /// file when given, otherwise from a key block inside the primary file.
    pub fn load_pem(
        &self,
        entity: &CertEntity,
        primary: &[u8],
        key_file: Option<&[u8]>,
    ) -> Result<(Vec<CertificateDer<'static>>, PrivateKeyDer<'static>), CertificateError> {
        let mut certs = Vec::new();
        let mut embedded_key = None;
        for block in Self::scan_pem_blocks(primary)? {
            match block.item {
                Item::X509Certificate(cert) => certs.push(cert),
                Item::Pkcs1Key(key) if embedded_key.is_none() => embedded_key = Some(PrivateKeyDer::Pkcs1(key)),
                Item::Pkcs8Key(key) if embedded_key.is_none() => embedded_key = Some(PrivateKeyDer::Pkcs8(key)),
                Item::Sec1Key(key) if embedded_key.is_none() => embedded_key = Some(PrivateKeyDer::Sec1(key)),
                _ => debug!(
                    "[CERTIFICATE] {}: skipping PEM block at bytes {:?}",
                    entity.domain, block.range
                ),
            }
        }
        if certs.is_empty() {
            return Err(CertificateError::Parse(format!(
                "{}: no certificate block found",
                entity.primary_path.display()
            )));
        }
        let key = match key_file {
            Some(bytes) => Self::parse_private_key(bytes, &entity.secondary)?,
            None => embedded_key.ok_or_else(|| {
                CertificateError::Parse(format!(
                    "{}: no private key block and no key file configured",
                    entity.primary_path.display()
                ))
            })?,
        };
        Ok((certs, key))
    }

    /// Opens a PKCS12 archive. The leaf is the certificate paired with the
    /// private key; every other certificate is an intermediate.
    pub fn load_pkcs12(
        &self,
        entity: &CertEntity,
        archive: &[u8],
    ) -> Result<(Vec<CertificateDer<'static>>, PrivateKeyDer<'static>), CertificateError> {
        let label = entity.primary_path.display();
        let passphrase = entity.passphrase();
        let pfx = PFX::parse(archive).map_err(|e| CertificateError::Parse(format!("{}: {:?}", label, e)))?;
        if !pfx.verify_mac(passphrase) {
            return Err(CertificateError::Parse(format!(
                "{}: integrity check failed, wrong passphrase?",
                label
            )));
        }
        let bags = pfx.bags(passphrase).map_err(|e| CertificateError::Parse(format!("{}: {:?}", label, e)))?;
        let mut certs: Vec<(Option<Vec<u8>>, Vec<u8>)> = Vec::new();
        let mut key_ids: Vec<Option<Vec<u8>>> = Vec::new();
        for bag in bags {
            let local_key_id = bag.attributes.iter().find_map(|attribute| match attribute {
                PKCS12Attribute::LocalKeyId(id) => Some(id.clone()),
                _ => None,
            });
            match bag.bag {
                SafeBagKind::CertBag(CertBag::X509(der)) => certs.push((local_key_id, der)),
                SafeBagKind::Pkcs8ShroudedKeyBag(_) => key_ids.push(local_key_id),
                _ => debug!("[CERTIFICATE] {}: skipping PKCS12 bag", entity.domain),
            }
        }
        let keys = pfx
            .key_bags(passphrase)
            .map_err(|e| CertificateError::Parse(format!("{}: {:?}", label, e)))?;
        if keys.is_empty() {
            return Err(CertificateError::Parse(format!("{}: no private key entry", label)));
        }
        if keys.len() != key_ids.len() {
            return Err(CertificateError::Parse(format!("{}: unreadable private key entry", label)));
        }
        if certs.is_empty() {
            return Err(CertificateError::Parse(format!("{}: no certificate entry", label)));
        }
        if keys.len() > 1 {
            warn!(
                "[CERTIFICATE] {}: archive holds {} private keys, using the last one; please ship a single keyed entry",
                entity.domain,
                keys.len()
            );
        }
        let chosen_id = key_ids.pop().flatten();
        let key = PrivateKeyDer::Pkcs8(PrivatePkcs8KeyDer::from(keys.into_iter().last().unwrap_or_default()));
        let leaf_index = match &chosen_id {
            Some(id) => certs.iter().rposition(|(cert_id, _)| cert_id.as_ref() == Some(id)),
            None => None,
        };
        let leaf_index = match leaf_index {
            Some(index) => index,
            None => Self::match_leaf_by_key(&entity.domain, &certs, &key)?,
        };
        let leaf = certs.remove(leaf_index);
        let mut chain = Vec::with_capacity(certs.len() + 1);
        chain.push(CertificateDer::from(leaf.1));
        chain.extend(certs.into_iter().map(|(_, der)| CertificateDer::from(der)));
        Ok((chain, key))
    }

    /// Splits PEM text into blocks, in file order, with their byte ranges.
    pub fn scan_pem_blocks(data: &[u8]) -> Result<Vec<PemBlock>, CertificateError> {
        let mut blocks = Vec::new();
        let mut remaining = data;
        loop {
            let offset = data.len() - remaining.len();
            match rustls_pemfile::read_one_from_slice(remaining) {
                Ok(Some((item, rest))) => {
                    let end = data.len() - rest.len();
                    let start = data[offset..end]
                        .windows(b"-----BEGIN".len())
                        .position(|window| window == b"-----BEGIN")
                        .map(|position| offset + position)
                        .unwrap_or(offset);
                    blocks.push(PemBlock { range: start..end, item });
                    remaining = rest;
                }
                Ok(None) => break,
                Err(e) => return Err(CertificateError::Parse(format!("malformed PEM at byte {}: {:?}", offset, e))),
            }
        }
        Ok(blocks)
    }

    pub fn parse_private_key(data: &[u8], label: &str) -> Result<PrivateKeyDer<'static>, CertificateError> {
        rustls_pemfile::private_key(&mut &data[..])
            .map_err(|e| CertificateError::Parse(format!("{}: {}", label, e)))?
            .ok_or_else(|| CertificateError::Parse(format!("{}: no private key found", label)))
    }

    /// Binds the chain to its key. A key that provably belongs to another
    /// certificate is rejected; keys whose public half cannot be derived pass.
    pub fn build_chain(
        domain: &str,
        certs: Vec<CertificateDer<'static>>,
        key: &PrivateKeyDer<'static>,
    ) -> Result<CertificateChain, CertificateError> {
        let signing_key = rustls::crypto::ring::sign::any_supported_type(key)
            .map_err(|e| CertificateError::ChainExport(format!("{}: {}", domain, e)))?;
        let certified_key = CertifiedKey::new(certs, signing_key);
        match certified_key.keys_match() {
            Ok(()) | Err(rustls::Error::InconsistentKeys(InconsistentKeys::Unknown)) => {
                Ok(CertificateChain::new(certified_key))
            }
            Err(e) => Err(CertificateError::KeyMismatch(format!("{}: {}", domain, e))),
        }
    }

    /// Upper-case hex SHA-256 over the primary file, then the key file.
    pub fn source_hash(primary: &[u8], key_file: Option<&[u8]>) -> String {
        let mut hasher = Sha256::new();
        hasher.update(primary);
        if let Some(key) = key_file {
            hasher.update(key);
        }
        hex::encode_upper(hasher.finalize())
    }

    fn match_leaf_by_key(
        domain: &str,
        certs: &[(Option<Vec<u8>>, Vec<u8>)],
        key: &PrivateKeyDer<'static>,
    ) -> Result<usize, CertificateError> {
        if certs.len() == 1 {
            return Ok(0);
        }
        let signing_key = rustls::crypto::ring::sign::any_supported_type(key)
            .map_err(|e| CertificateError::ChainExport(format!("{}: {}", domain, e)))?;
        certs
            .iter()
            .rposition(|(_, der)| {
                CertifiedKey::new(vec![CertificateDer::from(der.clone())], signing_key.clone())
                    .keys_match()
                    .is_ok()
            })
            .ok_or_else(|| CertificateError::KeyMismatch(format!("{}: no certificate in the archive matches its key", domain)))
    }

    fn read_file(path: &Path) -> Result<Vec<u8>, CertificateError> {
        std::fs::read(path).map_err(|e| CertificateError::FileNotFound(format!("{}: {}", path.display(), e)))
    }
}
