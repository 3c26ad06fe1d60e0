use std::path::PathBuf;

/// Re-reads the TOML configuration file on every pass.
#[derive(Debug, Clone)]
pub struct ConfigFileSource {
    pub(crate) path: PathBuf,
}
