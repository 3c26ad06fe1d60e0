pub mod certificate_reloader;
pub mod certificate_watcher;
pub mod config_file_source;
