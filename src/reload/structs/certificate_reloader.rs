use crate::reload::structs::reload_pass::ReloadPass;
use crate::reload::traits::certificate_source::CertificateSource;
use crate::ssl::structs::certificate_store::CertificateStore;
use crate::ssl::structs::reconcile_report::ReconcileReport;
use arc_swap::ArcSwapOption;
use parking_lot::Mutex;
use std::sync::atomic::AtomicU64;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, Notify};

pub struct CertificateReloader {
    pub(crate) store: Arc<CertificateStore>,
    pub(crate) source: Arc<dyn CertificateSource>,
    pub(crate) debounce: Duration,
    pub(crate) notify: Notify,
    pub(crate) requested: AtomicU64,
    pub(crate) completed: watch::Sender<ReloadPass>,
    pub(crate) pass_lock: Mutex<()>,
    pub(crate) last_report: ArcSwapOption<ReconcileReport>,
}
