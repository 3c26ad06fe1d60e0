use crate::common::structs::custom_error::CustomError;
use crate::reload::structs::certificate_reloader::CertificateReloader;
use crate::reload::structs::certificate_watcher::CertificateWatcher;
use crate::reload::structs::reload_pass::ReloadPass;
use arc_swap::ArcSwap;
use log::{debug, error, info, warn};
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use parking_lot::Mutex;
use std::collections::BTreeSet;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::watch;

impl Drop for CertificateWatcher {
    fn drop(&mut self) {
        self.refresher.abort();
    }
}

impl CertificateWatcher {
    /// Watches the parent directories of the source's files and triggers the
    /// reloader when one of those files is created, changed or removed. The
    /// watched set follows the configuration: it is recomputed after every
    /// successful pass. Must be called from within a tokio runtime.
    pub fn start(reloader: Arc<CertificateReloader>) -> Result<Self, CustomError> {
        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|e| CustomError::new(&format!("file watcher needs a tokio runtime: {}", e)))?;
        let names: Arc<ArcSwap<BTreeSet<OsString>>> = Arc::new(ArcSwap::from_pointee(BTreeSet::new()));

        let trigger = Arc::clone(&reloader);
        let filter = Arc::clone(&names);
        let watcher = notify::recommended_watcher(move |res: Result<notify::Event, notify::Error>| match res {
            Ok(event) => {
                if !matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)) {
                    return;
                }
                let names = filter.load();
                let relevant = event
                    .paths
                    .iter()
                    .any(|path| path.file_name().map(|name| names.contains(name)).unwrap_or(false));
                if relevant {
                    let ticket = trigger.trigger();
                    debug!("[RELOAD] {:?} on {:?}, request {}", event.kind, event.paths, ticket);
                }
            }
            Err(e) => error!("[RELOAD] Certificate watch error: {}", e),
        })
        .map_err(|e| CustomError::new(&format!("failed to create file watcher: {}", e)))?;
        let watcher = Arc::new(Mutex::new(watcher));
        let directories = Arc::new(Mutex::new(BTreeSet::new()));

        let passes = reloader.subscribe();
        let watched = Self::apply_watch_set(&reloader.source().watched_paths(), &watcher, &names, &directories);
        if watched == 0 {
            return Err(CustomError::new("no watchable directory for certificate files"));
        }
        info!("[RELOAD] Watching {} director(y/ies) for certificate changes", watched);

        let refresher = runtime.spawn(Self::refresh_loop(
            reloader,
            passes,
            Arc::clone(&watcher),
            Arc::clone(&names),
            Arc::clone(&directories),
        ));
        Ok(Self {
            watcher,
            names,
            directories,
            refresher,
        })
    }

    pub fn directories(&self) -> Vec<PathBuf> {
        self.directories.lock().iter().cloned().collect()
    }

    pub fn watched_names(&self) -> Vec<OsString> {
        self.names.load().iter().cloned().collect()
    }

    pub fn stop(self) {
        self.refresher.abort();
        let mut watcher = self.watcher.lock();
        for directory in self.directories.lock().iter() {
            let _ = watcher.unwatch(directory);
        }
        info!("[RELOAD] Certificate watcher stopped");
    }

    async fn refresh_loop(
        reloader: Arc<CertificateReloader>,
        mut passes: watch::Receiver<ReloadPass>,
        watcher: Arc<Mutex<RecommendedWatcher>>,
        names: Arc<ArcSwap<BTreeSet<OsString>>>,
        directories: Arc<Mutex<BTreeSet<PathBuf>>>,
    ) {
        while passes.changed().await.is_ok() {
            // A failed pass keeps the last good configuration, and so does the watch set.
            if !matches!(passes.borrow_and_update().result, Some(Ok(_))) {
                continue;
            }
            let source = reloader.source();
            match tokio::task::spawn_blocking(move || source.watched_paths()).await {
                Ok(paths) => {
                    let watched = Self::apply_watch_set(&paths, &watcher, &names, &directories);
                    debug!("[RELOAD] Watch set refreshed: {} file(s) in {} director(y/ies)", paths.len(), watched);
                }
                Err(e) => error!("[RELOAD] Could not refresh the watch set: {}", e),
            }
        }
    }

    /// Replaces the watched names and adds or drops directories to match `paths`.
    /// Returns the number of directories now watched.
    fn apply_watch_set(
        paths: &[PathBuf],
        watcher: &Mutex<RecommendedWatcher>,
        names: &ArcSwap<BTreeSet<OsString>>,
        directories: &Mutex<BTreeSet<PathBuf>>,
    ) -> usize {
        let wanted_names: BTreeSet<OsString> = paths
            .iter()
            .filter_map(|path| path.file_name().map(|name| name.to_os_string()))
            .collect();
        let wanted: BTreeSet<PathBuf> = paths.iter().map(|path| Self::parent_directory(path)).collect();
        names.store(Arc::new(wanted_names));

        let mut watcher = watcher.lock();
        let mut directories = directories.lock();
        let stale: Vec<PathBuf> = directories.difference(&wanted).cloned().collect();
        for directory in stale {
            if let Err(e) = watcher.unwatch(&directory) {
                debug!("[RELOAD] Unwatching {}: {}", directory.display(), e);
            }
            directories.remove(&directory);
            info!("[RELOAD] Stopped watching {}", directory.display());
        }
        let fresh: Vec<PathBuf> = wanted.difference(&*directories).cloned().collect();
        for directory in fresh {
            match watcher.watch(&directory, RecursiveMode::NonRecursive) {
                Ok(()) => {
                    debug!("[RELOAD] Watching {}", directory.display());
                    directories.insert(directory);
                }
                Err(e) => warn!("[RELOAD] Cannot watch {}: {}", directory.display(), e),
            }
        }
        directories.len()
    }

    fn parent_directory(path: &Path) -> PathBuf {
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }
}
