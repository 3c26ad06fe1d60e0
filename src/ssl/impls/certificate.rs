use crate::ssl::enums::certificate_error::CertificateError;
use crate::ssl::enums::certificate_format::CertificateFormat;
use crate::ssl::enums::certificate_state::CertificateState;
use crate::ssl::ssl::tls_capabilities;
use crate::ssl::structs::cert_entity::CertEntity;
use crate::ssl::structs::certificate::Certificate;
use crate::ssl::structs::certificate_chain::CertificateChain;
use crate::ssl::structs::certificate_lease::CertificateLease;
use crate::ssl::structs::certificate_summary::CertificateSummary;
use crate::ssl::structs::handshake_policy::HandshakePolicy;
use arc_swap::{ArcSwap, ArcSwapOption};
use log::{debug, warn};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

const STATE_SHIFT: u32 = 62;
const COUNT_MASK: u64 = (1 << STATE_SHIFT) - 1;

fn pack(state: CertificateState, count: u64) -> u64 {
    ((state as u64) << STATE_SHIFT) | (count & COUNT_MASK)
}

fn state_of(word: u64) -> CertificateState {
    CertificateState::from_u8((word >> STATE_SHIFT) as u8)
}

impl std::fmt::Debug for Certificate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Certificate")
            .field("domain", &self.domain)
            .field("format", &self.format)
            .field("source_hash", &self.source_hash)
            .field("loaded_at", &self.loaded_at)
            .field("state", &self.state())
            .field("ref_count", &self.ref_count())
            .finish()
    }
}

impl Certificate {
    pub fn new(
        domain: &str,
        format: CertificateFormat,
        source_hash: String,
        summary: CertificateSummary,
        chain: CertificateChain,
        policy: HandshakePolicy,
    ) -> Self {
        Self {
            domain: domain.to_string(),
            format,
            source_hash,
            loaded_at: chrono::Utc::now(),
            summary,
            chain: ArcSwapOption::from_pointee(chain),
            policy: ArcSwap::from_pointee(policy),
            lifecycle: AtomicU64::new(pack(CertificateState::Active, 0)),
        }
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn format(&self) -> CertificateFormat {
        self.format
    }

    pub fn source_hash(&self) -> &str {
        &self.source_hash
    }

    pub fn loaded_at(&self) -> chrono::DateTime<chrono::Utc> {
        self.loaded_at
    }

    pub fn summary(&self) -> &CertificateSummary {
        &self.summary
    }

    pub fn policy(&self) -> Arc<HandshakePolicy> {
        self.policy.load_full()
    }

    pub fn state(&self) -> CertificateState {
        state_of(self.lifecycle.load(Ordering::Acquire))
    }

    pub fn ref_count(&self) -> u64 {
        self.lifecycle.load(Ordering::Acquire) & COUNT_MASK
    }

    /// Current chain without taking a borrow. None once disposed.
    pub fn peek_chain(&self) -> Option<Arc<CertificateChain>> {
        self.chain.load_full()
    }

    /// Takes one borrow. Fails only once the certificate is disposed.
    pub fn borrow_chain(&self) -> Option<Arc<CertificateChain>> {
        let acquired = self.lifecycle.fetch_update(Ordering::AcqRel, Ordering::Acquire, |word| {
            if state_of(word) == CertificateState::Disposed {
                return None;
            }
            Some(word + 1)
        });
        if acquired.is_err() {
            return None;
        }
        match self.chain.load_full() {
            Some(chain) => Some(chain),
            None => {
                self.return_chain();
                None
            }
        }
    }

    /// Gives back one borrow. The last return on a deleted certificate disposes it.
    pub fn return_chain(&self) {
        let released = self.lifecycle.fetch_update(Ordering::AcqRel, Ordering::Acquire, |word| {
            if word & COUNT_MASK == 0 {
                return None;
            }
            Some(word - 1)
        });
        match released {
            Ok(previous) => {
                if previous & COUNT_MASK == 1 && state_of(previous) == CertificateState::MarkedForDeletion {
                    self.dispose();
                }
            }
            Err(_) => {
                warn!("[CERTIFICATE] Unbalanced return ignored for {}", self.domain);
            }
        }
    }

    /// Marks for deletion; disposes right away when nothing is borrowed.
    pub fn delete(&self) {
        let marked = self.lifecycle.fetch_update(Ordering::AcqRel, Ordering::Acquire, |word| {
            if state_of(word) != CertificateState::Active {
                return None;
            }
            Some(pack(CertificateState::MarkedForDeletion, word & COUNT_MASK))
        });
        match marked {
            Ok(previous) => {
                debug!(
                    "[CERTIFICATE] Marked {} ({}) for deletion with {} outstanding borrow(s)",
                    self.domain,
                    self.source_hash,
                    previous & COUNT_MASK
                );
                if previous & COUNT_MASK == 0 {
                    self.dispose();
                }
            }
            Err(_) => {
                if self.ref_count() == 0 {
                    self.dispose();
                }
            }
        }
    }

    /// Releases the chain. Only succeeds on MarkedForDeletion with no borrows,
    /// and only for one caller.
    pub fn dispose(&self) -> bool {
        let won = self
            .lifecycle
            .compare_exchange(
                pack(CertificateState::MarkedForDeletion, 0),
                pack(CertificateState::Disposed, 0),
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_ok();
        if won {
            self.chain.store(None);
            debug!("[CERTIFICATE] Disposed certificate for {} ({})", self.domain, self.source_hash);
        }
        won
    }

    pub fn lease(self: &Arc<Self>) -> Option<CertificateLease> {
        let chain = self.borrow_chain()?;
        Some(CertificateLease {
            certificate: Arc::clone(self),
            chain,
        })
    }

    /// Recompiles the TLS policy for `entity` and swaps it in. Identity and chain are kept.
    pub fn update_policy(&self, entity: &CertEntity) -> Result<(), CertificateError> {
        let policy = HandshakePolicy::compile(entity, tls_capabilities())?;
        self.policy.store(Arc::new(policy));
        Ok(())
    }
}
