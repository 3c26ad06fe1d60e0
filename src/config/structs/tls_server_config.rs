use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct TlsServerConfig {
    pub enabled: bool,
    pub bind_address: String,
    pub handshake_timeout: Option<u64>,
    /// Base directory for relative credential paths.
    pub certs_path: Option<String>,
    pub watch: Option<bool>,
    pub reload_debounce_ms: Option<u64>,
}
