use crate::reload::structs::certificate_reloader::CertificateReloader;
use log::info;
use std::sync::Arc;
use tokio::runtime::Runtime;
use tokio::task::JoinHandle;

pub async fn reload_service(
    reloader: Arc<CertificateReloader>,
    rx: tokio::sync::watch::Receiver<bool>,
    tokio_reload: Arc<Runtime>,
) -> JoinHandle<()> {
    info!("[RELOAD] Starting reload loop with a {}ms debounce", reloader.debounce.as_millis());
    tokio_reload.spawn(async move {
        reloader.run(rx).await;
    })
}
