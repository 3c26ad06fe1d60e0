use crate::ssl::structs::certificate::Certificate;
use crate::ssl::structs::certificate_chain::CertificateChain;
use crate::ssl::structs::certificate_lease::CertificateLease;
use std::sync::Arc;

impl std::fmt::Debug for CertificateLease {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CertificateLease")
            .field("domain", &self.certificate.domain())
            .field("source_hash", &self.certificate.source_hash())
            .finish()
    }
}

impl CertificateLease {
    pub fn certificate(&self) -> &Arc<Certificate> {
        &self.certificate
    }

    pub fn chain(&self) -> &Arc<CertificateChain> {
        &self.chain
    }

    pub fn domain(&self) -> &str {
        self.certificate.domain()
    }
}

impl Drop for CertificateLease {
    fn drop(&mut self) {
        self.certificate.return_chain();
    }
}
