//! Shared data context for API request handlers.

use crate::config::structs::api_server_config::ApiServerConfig;
use crate::reload::structs::certificate_reloader::CertificateReloader;
use crate::ssl::structs::certificate_store::CertificateStore;
use std::sync::Arc;

/// Shared application data available to all API request handlers.
///
/// Injected into Actix-web's application data; every field is an `Arc` so the
/// workers share one store and one reloader with the TLS listener.
#[derive(Debug)]
pub struct ApiServiceData {
    pub store: Arc<CertificateStore>,

    /// Reload requests from the API join the same single-flight pipeline as
    /// the file watcher.
    pub reloader: Arc<CertificateReloader>,

    pub api_server_config: Arc<ApiServerConfig>,
}
