use crate::ssl::structs::certificate_chain::CertificateChain;
use rustls::pki_types::CertificateDer;
use rustls::sign::CertifiedKey;
use std::sync::Arc;

impl std::fmt::Debug for CertificateChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CertificateChain")
            .field("certs_count", &self.certified_key.cert.len())
            .field("intermediates", &self.intermediates().len())
            .finish()
    }
}

impl CertificateChain {
    pub fn new(certified_key: CertifiedKey) -> Self {
        Self {
            certified_key: Arc::new(certified_key),
        }
    }

    pub fn certified_key(&self) -> Arc<CertifiedKey> {
        Arc::clone(&self.certified_key)
    }

    pub fn leaf(&self) -> Option<&CertificateDer<'static>> {
        self.certified_key.cert.first()
    }

    pub fn intermediates(&self) -> &[CertificateDer<'static>] {
        self.certified_key.cert.get(1..).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.certified_key.cert.len()
    }

    pub fn is_empty(&self) -> bool {
        self.certified_key.cert.is_empty()
    }
}
