use rustls::sign::CertifiedKey;
use std::sync::Arc;

/// Serves the one chain leased for a connection.
pub struct LeasedCertificateResolver {
    pub(crate) certified_key: Arc<CertifiedKey>,
}
