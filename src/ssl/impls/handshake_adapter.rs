use crate::ssl::enums::certificate_error::CertificateError;
use crate::ssl::enums::handshake_outcome::HandshakeOutcome;
use crate::ssl::structs::certificate_store::CertificateStore;
use crate::ssl::structs::connection_info::ConnectionInfo;
use crate::ssl::structs::handshake_adapter::HandshakeAdapter;
use crate::ssl::structs::handshake_options::HandshakeOptions;
use log::{debug, error, warn};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

const RESOLVE_ATTEMPTS: usize = 2;

impl std::fmt::Debug for HandshakeAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandshakeAdapter")
            .field("store", &self.store)
            .finish()
    }
}

impl HandshakeAdapter {
    pub fn new(store: Arc<CertificateStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<CertificateStore> {
        &self.store
    }

    /// Runs once per ClientHello. Never panics; every failure becomes an abort.
    pub fn on_client_hello(&self, connection: &ConnectionInfo, server_name: Option<&str>) -> HandshakeOutcome {
        let name = server_name.unwrap_or_default();
        match catch_unwind(AssertUnwindSafe(|| self.prepare(name))) {
            Ok(Ok(options)) => {
                debug!(
                    "[HANDSHAKE] {:?} sni '{}' -> {}",
                    connection.peer_addr, name, options.domain
                );
                HandshakeOutcome::Proceed(options)
            }
            Ok(Err(e)) => {
                warn!("[HANDSHAKE] Aborting {:?} sni '{}': {}", connection.peer_addr, name, e);
                HandshakeOutcome::Abort(e)
            }
            Err(_) => {
                error!("[HANDSHAKE] Panic while preparing {:?} sni '{}'", connection.peer_addr, name);
                HandshakeOutcome::Abort(CertificateError::Resolution(format!(
                    "{}: internal error while preparing handshake",
                    name
                )))
            }
        }
    }

    fn prepare(&self, name: &str) -> Result<HandshakeOptions, CertificateError> {
        for _ in 0..RESOLVE_ATTEMPTS {
            let certificate = self.store.try_resolve(name)?;
            // Disposed between resolve and borrow: the map already holds its replacement.
            let Some(lease) = certificate.lease() else {
                continue;
            };
            let policy = certificate.policy();
            let server_config = policy.server_config(lease.chain().certified_key())?;
            return Ok(HandshakeOptions {
                domain: certificate.domain().to_string(),
                server_config,
                lease,
                policy,
            });
        }
        Err(CertificateError::Resolution(format!("{}: certificate retired during handshake", name)))
    }
}
