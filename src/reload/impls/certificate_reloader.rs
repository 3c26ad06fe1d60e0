use crate::reload::structs::certificate_reloader::CertificateReloader;
use crate::reload::structs::reload_pass::ReloadPass;
use crate::reload::traits::certificate_source::CertificateSource;
use crate::ssl::structs::certificate_store::CertificateStore;
use crate::ssl::structs::reconcile_report::ReconcileReport;
use arc_swap::ArcSwapOption;
use log::{debug, error, info};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, Notify};

impl std::fmt::Debug for CertificateReloader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CertificateReloader")
            .field("source", &self.source.describe())
            .field("debounce", &self.debounce)
            .field("requested", &self.requested.load(Ordering::Relaxed))
            .field("passes", &self.passes())
            .finish()
    }
}

impl CertificateReloader {
    pub fn new(store: Arc<CertificateStore>, source: Arc<dyn CertificateSource>, debounce: Duration) -> Self {
        let (completed, _) = watch::channel(ReloadPass::default());
        Self {
            store,
            source,
            debounce,
            notify: Notify::new(),
            requested: AtomicU64::new(0),
            completed,
            pass_lock: Mutex::new(()),
            last_report: ArcSwapOption::empty(),
        }
    }

    pub fn store(&self) -> Arc<CertificateStore> {
        Arc::clone(&self.store)
    }

    pub fn source(&self) -> Arc<dyn CertificateSource> {
        Arc::clone(&self.source)
    }

    pub fn last_report(&self) -> Option<Arc<ReconcileReport>> {
        self.last_report.load_full()
    }

    /// Receives every finished pass.
    pub fn subscribe(&self) -> watch::Receiver<ReloadPass> {
        self.completed.subscribe()
    }

    pub fn passes(&self) -> u64 {
        self.completed.borrow().passes
    }

    /// Schedules a pass without waiting for it. Triggers that arrive before
    /// the loop wakes up share one pass. Returns the request ticket.
    pub fn trigger(&self) -> u64 {
        let ticket = self.requested.fetch_add(1, Ordering::AcqRel) + 1;
        self.notify.notify_one();
        ticket
    }

    /// Schedules a pass and waits for the first one that started after this
    /// call. Needs [`run`](Self::run) to be active.
    pub async fn request_reload(&self) -> Result<Arc<ReconcileReport>, String> {
        let ticket = self.trigger();
        let mut rx = self.subscribe();
        let pass = rx
            .wait_for(|pass| pass.served >= ticket)
            .await
            .map_err(|_| String::from("reloader stopped"))?;
        pass.result
            .clone()
            .unwrap_or_else(|| Err(String::from("no reload pass has finished")))
    }

    /// Runs one reconcile pass now. Passes never overlap; a caller arriving
    /// while another pass runs waits for it and then runs its own.
    pub fn run_pass(&self) -> Result<Arc<ReconcileReport>, String> {
        let _guard = self.pass_lock.lock();
        let served = self.requested.load(Ordering::Acquire);
        let result = match self.source.snapshot() {
            Ok(snapshot) => {
                let report = Arc::new(self.store.apply_snapshot(&snapshot));
                self.last_report.store(Some(Arc::clone(&report)));
                info!("[RELOAD] Pass finished with status {} from {}", report.status(), self.source.describe());
                Ok(report)
            }
            Err(e) => {
                error!("[RELOAD] Could not read {}, store left untouched: {}", self.source.describe(), e);
                Err(e.to_string())
            }
        };
        self.publish(served, result.clone());
        result
    }

    /// Background loop: wait for a trigger, debounce, run one pass on the
    /// blocking pool. Stops when `rx` changes.
    #[tracing::instrument(level = "debug", skip_all)]
    pub async fn run(self: Arc<Self>, mut rx: watch::Receiver<bool>) {
        info!("[BOOT] Starting certificate reloader for {}", self.source.describe());
        loop {
            tokio::select! {
                _ = self.notify.notified() => {}
                _ = rx.changed() => {
                    info!("[BOOT] Shutting down certificate reloader...");
                    return;
                }
            }
            if !self.debounce.is_zero() {
                tokio::select! {
                    _ = tokio::time::sleep(self.debounce) => {}
                    _ = rx.changed() => {
                        info!("[BOOT] Shutting down certificate reloader...");
                        return;
                    }
                }
            }
            let served = self.requested.load(Ordering::Acquire);
            debug!("[RELOAD] Starting pass for request {}", served);
            let reloader = Arc::clone(&self);
            if let Err(e) = tokio::task::spawn_blocking(move || reloader.run_pass()).await {
                error!("[RELOAD] Pass aborted: {}", e);
                self.publish(served, Err(format!("reload pass aborted: {}", e)));
            }
        }
    }

    fn publish(&self, served: u64, result: Result<Arc<ReconcileReport>, String>) {
        self.completed.send_modify(|pass| {
            pass.served = pass.served.max(served);
            pass.passes += 1;
            pass.result = Some(result);
        });
    }
}
