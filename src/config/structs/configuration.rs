use crate::config::structs::api_server_config::ApiServerConfig;
use crate::config::structs::certificate_config::CertificateConfig;
use crate::config::structs::tls_server_config::TlsServerConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Configuration {
    pub log_level: String,
    pub tls_server: TlsServerConfig,
    pub api_server: Option<ApiServerConfig>,
    #[serde(default)]
    pub certificates: BTreeMap<String, CertificateConfig>,
    /// Primary domain to alias host names.
    #[serde(default)]
    pub aliases: BTreeMap<String, Vec<String>>,
}
