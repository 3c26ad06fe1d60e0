use crate::ssl::enums::certificate_format::CertificateFormat;
use crate::ssl::structs::certificate_chain::CertificateChain;
use crate::ssl::structs::certificate_summary::CertificateSummary;
use crate::ssl::structs::handshake_policy::HandshakePolicy;
use arc_swap::{ArcSwap, ArcSwapOption};
use std::sync::atomic::AtomicU64;

/// A loaded certificate chain with its lifecycle.
///
/// `lifecycle` packs the tri-state (top two bits) and the outstanding borrow
/// count (remaining bits) into one word, so every transition is a single
/// atomic operation.
pub struct Certificate {
    pub(crate) domain: String,
    pub(crate) format: CertificateFormat,
    pub(crate) source_hash: String,
    pub(crate) loaded_at: chrono::DateTime<chrono::Utc>,
    pub(crate) summary: CertificateSummary,
    pub(crate) chain: ArcSwapOption<CertificateChain>,
    pub(crate) policy: ArcSwap<HandshakePolicy>,
    pub(crate) lifecycle: AtomicU64,
}
