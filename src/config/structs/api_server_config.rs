use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ApiServerConfig {
    pub enabled: bool,
    pub bind_address: String,
    pub api_key: Option<String>,
    pub keep_alive: Option<u64>,
    pub request_timeout: Option<u64>,
    pub threads: Option<u64>,
}
