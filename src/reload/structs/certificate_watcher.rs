use arc_swap::ArcSwap;
use parking_lot::Mutex;
use std::collections::BTreeSet;
use std::ffi::OsString;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Keeps the file-system watcher alive; dropping it stops the notifications.
pub struct CertificateWatcher {
    pub(crate) watcher: Arc<Mutex<notify::RecommendedWatcher>>,
    /// File names that trigger a reload, recomputed after every pass.
    pub(crate) names: Arc<ArcSwap<BTreeSet<OsString>>>,
    pub(crate) directories: Arc<Mutex<BTreeSet<PathBuf>>>,
    pub(crate) refresher: JoinHandle<()>,
}
