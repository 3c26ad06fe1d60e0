mod common;

use sni_cert_store::common::structs::custom_error::CustomError;
use sni_cert_store::reload::structs::certificate_reloader::CertificateReloader;
use sni_cert_store::reload::structs::certificate_watcher::CertificateWatcher;
use sni_cert_store::reload::structs::config_file_source::ConfigFileSource;
use sni_cert_store::reload::traits::certificate_source::CertificateSource;
use sni_cert_store::ssl::ssl::create_certificate_store;
use sni_cert_store::ssl::structs::certificate_snapshot::CertificateSnapshot;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

struct SlowSource {
    inner: ConfigFileSource,
    active: AtomicUsize,
    max_active: AtomicUsize,
    calls: AtomicUsize,
}

impl CertificateSource for SlowSource {
    fn snapshot(&self) -> Result<CertificateSnapshot, CustomError> {
        let active = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_active.fetch_max(active, Ordering::SeqCst);
        self.calls.fetch_add(1, Ordering::SeqCst);
        std::thread::sleep(Duration::from_millis(50));
        let snapshot = self.inner.snapshot();
        self.active.fetch_sub(1, Ordering::SeqCst);
        snapshot
    }

    fn watched_paths(&self) -> Vec<PathBuf> {
        self.inner.watched_paths()
    }

    fn describe(&self) -> String {
        String::from("slow test source")
    }
}

fn write_config(dir: &TempDir, domains: &[&str], aliases: &[(&str, &[&str])]) -> PathBuf {
    for domain in domains {
        common::write_pem_pair(dir.path(), domain, &[domain]);
    }
    let path = dir.path().join("config.toml");
    std::fs::write(&path, common::config_toml(dir.path(), domains, aliases)).unwrap();
    path
}

#[tokio::test]
async fn test_run_pass_applies_config_file() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, &["a.test", "b.test"], &[("a.test", &["www.a.test"])]);
    let store = create_certificate_store();
    let reloader = CertificateReloader::new(store.clone(), Arc::new(ConfigFileSource::new(&path)), Duration::ZERO);

    let report = reloader.run_pass().unwrap();
    assert_eq!(report.added, vec!["a.test".to_string(), "b.test".to_string()]);
    assert_eq!(report.aliases_added, vec!["www.a.test".to_string()]);
    assert_eq!(store.resolve("www.a.test").unwrap().domain(), "a.test");
    assert_eq!(reloader.passes(), 1);
    assert!(reloader.last_report().is_some());
}

#[tokio::test]
async fn test_broken_config_leaves_store_untouched() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, &["a.test"], &[]);
    let store = create_certificate_store();
    let reloader = CertificateReloader::new(store.clone(), Arc::new(ConfigFileSource::new(&path)), Duration::ZERO);
    reloader.run_pass().unwrap();
    let before = store.get_certificate("a.test").unwrap();

    std::fs::write(&path, "log_level = [unterminated").unwrap();
    assert!(reloader.run_pass().is_err());
    assert!(Arc::ptr_eq(&before, &store.get_certificate("a.test").unwrap()));
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn test_concurrent_requests_never_overlap() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, &["a.test"], &[]);
    let source = Arc::new(SlowSource {
        inner: ConfigFileSource::new(&path),
        active: AtomicUsize::new(0),
        max_active: AtomicUsize::new(0),
        calls: AtomicUsize::new(0),
    });
    let store = create_certificate_store();
    let reloader = Arc::new(CertificateReloader::new(store.clone(), source.clone(), Duration::ZERO));
    let (tx, rx) = tokio::sync::watch::channel(false);
    let runner = tokio::spawn(Arc::clone(&reloader).run(rx));

    let mut requests = Vec::new();
    for _ in 0..8 {
        let reloader = Arc::clone(&reloader);
        requests.push(tokio::spawn(async move { reloader.request_reload().await }));
    }
    for request in requests {
        let report = request.await.unwrap().unwrap();
        assert!(!report.has_failures());
    }

    assert_eq!(source.max_active.load(Ordering::SeqCst), 1);
    let calls = source.calls.load(Ordering::SeqCst);
    assert!((1..=8).contains(&calls));
    assert!(store.get_certificate("a.test").is_some());

    tx.send(true).unwrap();
    runner.await.unwrap();
}

#[tokio::test]
async fn test_request_reload_sees_changes_made_before_it() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, &["a.test"], &[]);
    let store = create_certificate_store();
    let reloader = Arc::new(CertificateReloader::new(store.clone(), Arc::new(ConfigFileSource::new(&path)), Duration::ZERO));
    let (tx, rx) = tokio::sync::watch::channel(false);
    let runner = tokio::spawn(Arc::clone(&reloader).run(rx));

    reloader.request_reload().await.unwrap();
    write_config(&dir, &["a.test", "c.test"], &[]);
    let report = reloader.request_reload().await.unwrap();
    assert_eq!(report.added, vec!["c.test".to_string()]);
    assert!(store.get_certificate("c.test").is_some());

    tx.send(true).unwrap();
    runner.await.unwrap();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_watcher_triggers_reload_on_file_change() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, &["watched.test"], &[]);
    let store = create_certificate_store();
    let reloader = Arc::new(CertificateReloader::new(
        store.clone(),
        Arc::new(ConfigFileSource::new(&path)),
        Duration::from_millis(50),
    ));
    reloader.run_pass().unwrap();
    let before = store.get_certificate("watched.test").unwrap().source_hash().to_string();

    let (tx, rx) = tokio::sync::watch::channel(false);
    let runner = tokio::spawn(Arc::clone(&reloader).run(rx));
    let watcher = CertificateWatcher::start(Arc::clone(&reloader)).unwrap();
    assert!(!watcher.directories().is_empty());

    common::write_pem_pair(dir.path(), "watched.test", &["watched.test"]);

    let mut changed = false;
    for _ in 0..100 {
        tokio::time::sleep(Duration::from_millis(100)).await;
        if store.get_certificate("watched.test").unwrap().source_hash() != before {
            changed = true;
            break;
        }
    }
    assert!(changed, "watcher did not reload the rewritten certificate");

    watcher.stop();
    tx.send(true).unwrap();
    runner.await.unwrap();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_watcher_follows_domains_added_later() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, &["first.test"], &[]);
    let store = create_certificate_store();
    let reloader = Arc::new(CertificateReloader::new(
        store.clone(),
        Arc::new(ConfigFileSource::new(&path)),
        Duration::from_millis(50),
    ));
    reloader.run_pass().unwrap();

    let (tx, rx) = tokio::sync::watch::channel(false);
    let runner = tokio::spawn(Arc::clone(&reloader).run(rx));
    let watcher = CertificateWatcher::start(Arc::clone(&reloader)).unwrap();

    let extra = dir.path().join("extra");
    std::fs::create_dir(&extra).unwrap();
    let (cert_path, key_path) = common::write_pem_pair(&extra, "new.test", &["new.test"]);
    let mut config = common::config_toml(dir.path(), &["first.test"], &[]);
    config.push_str(&format!(
        "[certificates.\"new.test\"]\nformat = \"Pem\"\nprimary_path = \"{}\"\nsecondary_path = \"{}\"\n",
        cert_path.display(),
        key_path.display()
    ));
    std::fs::write(&path, config).unwrap();

    let mut followed = false;
    for _ in 0..100 {
        tokio::time::sleep(Duration::from_millis(100)).await;
        if store.get_certificate("new.test").is_some() && watcher.directories().contains(&extra) {
            followed = true;
            break;
        }
    }
    assert!(followed, "new domain directory was not picked up");
    assert!(watcher.watched_names().iter().any(|name| name == "new.test.pem"));
    let before = store.get_certificate("new.test").unwrap().source_hash().to_string();

    common::write_pem_pair(&extra, "new.test", &["new.test"]);

    let mut changed = false;
    for _ in 0..100 {
        tokio::time::sleep(Duration::from_millis(100)).await;
        if store.get_certificate("new.test").unwrap().source_hash() != before {
            changed = true;
            break;
        }
    }
    assert!(changed, "rewritten certificate in the new directory was not reloaded");

    watcher.stop();
    tx.send(true).unwrap();
    runner.await.unwrap();
}
