use clap::Parser;
use futures_util::future::try_join_all;
use log::{error, info, warn};
use parking_lot::deadlock;
use sni_cert_store::api::api::api_service;
use sni_cert_store::api::structs::api_service_data::ApiServiceData;
use sni_cert_store::common::common::{cert_gen, mask_secret, setup_logging};
use sni_cert_store::config::structs::configuration::Configuration;
use sni_cert_store::reload::reload::reload_service;
use sni_cert_store::reload::structs::certificate_reloader::CertificateReloader;
use sni_cert_store::reload::structs::certificate_watcher::CertificateWatcher;
use sni_cert_store::reload::structs::config_file_source::ConfigFileSource;
use sni_cert_store::ssl::ssl::{create_certificate_store, create_handshake_adapter, tls_capabilities};
use sni_cert_store::structs::Cli;
use sni_cert_store::tls::tls::tls_service;
use std::mem;
use std::net::SocketAddr;
use std::process::exit;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Builder;
use tokio_shutdown::Shutdown;

#[tracing::instrument(level = "debug")]
fn main() -> std::io::Result<()> {
    let args = Cli::parse();

    let config = match Configuration::load_from_file(&args.config, args.create_config) {
        Ok(config) => Arc::new(config),
        Err(_) => exit(101),
    };

    if let Err(error) = setup_logging(&config) {
        eprintln!("{error}");
        exit(1);
    }

    info!("{} - Version: {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    if args.create_selfsigned {
        match cert_gen(&args.selfsigned_domain, &args.selfsigned_certfile, &args.selfsigned_keyfile) {
            Ok(()) => exit(0),
            Err(error) => {
                error!("{error}");
                exit(1);
            }
        }
    }

    let capabilities = tls_capabilities();
    info!(
        "[BOOT] TLS capabilities: cipher policy {}, {} cipher suite(s), legacy protocols {}, renegotiation {}",
        capabilities.cipher_policy,
        capabilities.cipher_suites.len(),
        capabilities.legacy_protocols,
        capabilities.renegotiation
    );

    let store = create_certificate_store();
    let source = Arc::new(ConfigFileSource::new(&args.config));
    let reloader = Arc::new(CertificateReloader::new(store.clone(), source, config.reload_debounce()));

    info!("[BOOT] Loading certificates...");
    let initial = reloader.run_pass();
    match &initial {
        Ok(report) => info!(
            "[BOOT] Loaded {} certificate(s) and {} alias(es), status {}",
            store.len(),
            store.all_aliases().len(),
            report.status()
        ),
        Err(error) => error!("[BOOT] Initial certificate load failed: {error}"),
    }

    if args.check {
        for (domain, certificate) in store.all_certificates() {
            info!(
                "[CHECK] {} - {} - expires {} - {}",
                domain,
                certificate.format(),
                certificate
                    .summary()
                    .expires_at()
                    .map(|expiry| expiry.to_rfc3339())
                    .unwrap_or_else(|| String::from("unknown")),
                certificate.source_hash()
            );
        }
        match initial {
            Ok(report) if !report.has_failures() => exit(0),
            Ok(report) => {
                for (domain, reason) in &report.failed {
                    error!("[CHECK] {domain}: {reason}");
                }
                exit(1)
            }
            Err(_) => exit(1),
        }
    }

    if store.is_empty() {
        warn!("[BOOT] No certificate loaded, every handshake will be refused until a reload succeeds");
    }

    Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(async {
            let tokio_core = Arc::new(Builder::new_multi_thread().thread_name("core").worker_threads(4).enable_all().build()?);
            let tokio_shutdown = Shutdown::new().map_err(|e| std::io::Error::other(format!("{e:?}")))?;

            let deadlocks_handler = tokio_shutdown.clone();
            tokio_core.spawn(async move {
                info!("[BOOT] Starting thread for deadlocks...");
                let mut interval = tokio::time::interval(Duration::from_secs(30));
                loop {
                    tokio::select! {
                        _ = interval.tick() => {
                            let deadlocks = deadlock::check_deadlock();
                            if !deadlocks.is_empty() {
                                info!("[DEADLOCK] Found {} deadlocks", deadlocks.len());
                                for (i, threads) in deadlocks.iter().enumerate() {
                                    info!("[DEADLOCK] #{i}");
                                    for t in threads {
                                        info!("[DEADLOCK] Thread ID: {:#?}", t.thread_id());
                                        info!("[DEADLOCK] {:#?}", t.backtrace());
                                    }
                                }
                            }
                        }
                        _ = deadlocks_handler.handle() => {
                            info!("[BOOT] Shutting down thread for deadlocks...");
                            return;
                        }
                    }
                }
            });

            let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);

            let reload_future = reload_service(reloader.clone(), shutdown_rx.clone(), tokio_core.clone()).await;

            let watcher = if config.tls_server.watch.unwrap_or(true) {
                match CertificateWatcher::start(reloader.clone()) {
                    Ok(watcher) => Some(watcher),
                    Err(error) => {
                        warn!("[BOOT] Certificate watcher disabled: {error}");
                        None
                    }
                }
            } else {
                None
            };

            let mut api_handles = Vec::new();
            let mut api_futures = Vec::new();

            if let Some(api_server_object) = &config.api_server
                && api_server_object.enabled
            {
                let address: SocketAddr = api_server_object.bind_address.parse().unwrap_or_else(|_| {
                    error!("[API] Invalid bind address {}", api_server_object.bind_address);
                    exit(1);
                });
                info!(
                    "[BOOT] Admin API key {}",
                    mask_secret(api_server_object.api_key.as_deref().unwrap_or_default())
                );
                let data = Arc::new(ApiServiceData {
                    store: store.clone(),
                    reloader: reloader.clone(),
                    api_server_config: Arc::new(api_server_object.clone()),
                });
                let (handle, future) = api_service(address, data).await;
                api_handles.push(handle);
                api_futures.push(future);
            }

            if !api_futures.is_empty() {
                tokio_core.spawn(async move {
                    let _ = try_join_all(api_futures).await;
                });
            }

            let mut tls_tokio_threads = Vec::new();
            let mut tls_futures = Vec::new();

            if config.tls_server.enabled {
                let address: SocketAddr = config.tls_server.bind_address.parse().unwrap_or_else(|_| {
                    error!("[TLS] Invalid bind address {}", config.tls_server.bind_address);
                    exit(1);
                });
                let tokio_tls = Arc::new(Builder::new_multi_thread().thread_name("tls").enable_all().build()?);
                let tls_future = tls_service(
                    address,
                    create_handshake_adapter(store.clone()),
                    config.handshake_timeout(),
                    shutdown_rx.clone(),
                    tokio_tls.clone(),
                )
                .await;
                tls_futures.push(tls_future);
                tls_tokio_threads.push(tokio_tls);
            }

            tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    info!("Shutdown request received, shutting down...");

                    let _ = shutdown_tx.send(true);

                    if let Err(error) = try_join_all(tls_futures).await {
                        error!("Errors happened on shutting down TLS listeners: {error}");
                    }
                    if let Err(error) = reload_future.await {
                        error!("Errors happened on shutting down the reloader: {error}");
                    }
                    if let Some(watcher) = watcher {
                        watcher.stop();
                    }
                    for handle in api_handles {
                        handle.stop(true).await;
                    }

                    tokio_shutdown.handle().await;
                    tokio::time::sleep(Duration::from_secs(1)).await;
                    info!("Server shutting down completed");

                    mem::forget(tokio_core);
                    mem::forget(tls_tokio_threads);
                    Ok(())
                }
            }
        })
}
