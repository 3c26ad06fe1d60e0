use crate::ssl::structs::certificate::Certificate;
use crate::ssl::structs::certificate_chain::CertificateChain;
use std::sync::Arc;

/// An outstanding borrow. Dropping it returns the chain.
pub struct CertificateLease {
    pub(crate) certificate: Arc<Certificate>,
    pub(crate) chain: Arc<CertificateChain>,
}
