use crate::ssl::structs::leased_certificate_resolver::LeasedCertificateResolver;
use rustls::server::{ClientHello, ResolvesServerCert};
use rustls::sign::CertifiedKey;
use std::sync::Arc;

impl std::fmt::Debug for LeasedCertificateResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LeasedCertificateResolver")
            .field("certs_count", &self.certified_key.cert.len())
            .finish()
    }
}

impl LeasedCertificateResolver {
    pub fn new(certified_key: Arc<CertifiedKey>) -> Self {
        Self { certified_key }
    }
}

impl ResolvesServerCert for LeasedCertificateResolver {
    fn resolve(&self, _client_hello: ClientHello<'_>) -> Option<Arc<CertifiedKey>> {
        Some(Arc::clone(&self.certified_key))
    }
}
