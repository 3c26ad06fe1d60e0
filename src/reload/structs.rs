/// Debounced, single-flight reconcile driver.
pub mod certificate_reloader;

/// File-system watcher feeding the reloader.
pub mod certificate_watcher;

pub mod config_file_source;

pub mod reload_pass;
