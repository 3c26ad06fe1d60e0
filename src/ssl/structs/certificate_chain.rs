use rustls::sign::CertifiedKey;
use std::sync::Arc;

/// Leaf first, then intermediates in source order, bound to the signing key.
pub struct CertificateChain {
    pub(crate) certified_key: Arc<CertifiedKey>,
}
