#[cfg(test)]
mod ssl_tests {
    use crate::ssl::enums::certificate_format::CertificateFormat;
    use crate::ssl::enums::certificate_state::CertificateState;
    use crate::ssl::enums::tls_protocol::TlsProtocol;
    use crate::ssl::ssl::{alpn_wire_name, normalize_server_name};
    use crate::ssl::structs::cert_entity::CertEntity;
    use crate::ssl::structs::certificate::Certificate;
    use crate::ssl::structs::certificate_loader::CertificateLoader;
    use crate::ssl::structs::certificate_store::CertificateStore;
    use crate::ssl::structs::certificate_summary::CertificateSummary;
    use crate::ssl::structs::protocol_set::ProtocolSet;
    use crate::ssl::structs::tls_capabilities::TlsCapabilities;
    use std::path::PathBuf;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn write_pem_pair(dir: &TempDir, stem: &str, names: &[&str]) -> (PathBuf, PathBuf) {
        let key = rcgen::KeyPair::generate().unwrap();
        let cert = rcgen::CertificateParams::new(names.iter().map(|name| name.to_string()).collect::<Vec<_>>())
            .unwrap()
            .self_signed(&key)
            .unwrap();
        let cert_path = dir.path().join(format!("{}.pem", stem));
        let key_path = dir.path().join(format!("{}.key", stem));
        std::fs::write(&cert_path, cert.pem()).unwrap();
        std::fs::write(&key_path, key.serialize_pem()).unwrap();
        (cert_path, key_path)
    }

    fn load_certificate(domain: &str) -> (TempDir, Arc<Certificate>) {
        let dir = TempDir::new().unwrap();
        let (cert_path, key_path) = write_pem_pair(&dir, domain, &[domain]);
        let entity = CertEntity::pem(domain, cert_path, key_path);
        let certificate = CertificateLoader::new().load(&entity).unwrap();
        (dir, Arc::new(certificate))
    }

    #[test]
    fn test_normalize_server_name() {
        assert_eq!(normalize_server_name("Example.COM."), "example.com");
        assert_eq!(normalize_server_name(" www.example.com "), "www.example.com");
        assert_eq!(normalize_server_name(""), "");
    }

    #[test]
    fn test_alpn_wire_names() {
        assert_eq!(alpn_wire_name("Http11"), "http/1.1");
        assert_eq!(alpn_wire_name("Http2"), "h2");
        assert_eq!(alpn_wire_name("Http3"), "h3");
        assert_eq!(alpn_wire_name("spdy/3"), "spdy/3");
    }

    #[test]
    fn test_protocol_set_union() {
        let set: ProtocolSet = [TlsProtocol::Tls12, TlsProtocol::Tls13, TlsProtocol::Tls12].into_iter().collect();
        assert!(set.contains(TlsProtocol::Tls12));
        assert!(set.contains(TlsProtocol::Tls13));
        assert!(!set.contains(TlsProtocol::Tls11));
        assert_eq!(set.len(), 2);
        assert!(ProtocolSet::empty().is_empty());
    }

    #[test]
    fn test_certificate_format_parse() {
        assert_eq!("pem".parse::<CertificateFormat>().unwrap(), CertificateFormat::Pem);
        assert_eq!("Pfx".parse::<CertificateFormat>().unwrap(), CertificateFormat::Pkcs12);
        assert_eq!("PKCS12".parse::<CertificateFormat>().unwrap(), CertificateFormat::Pkcs12);
        assert!("der".parse::<CertificateFormat>().unwrap_err().is_config());
    }

    #[test]
    fn test_cert_entity_debug_redacts_passphrase() {
        let entity = CertEntity::pkcs12("example.com", "example.p12", "hunter2");
        let shown = format!("{:?}", entity);
        assert!(!shown.contains("hunter2"));
        assert!(shown.contains("<redacted>"));
        assert_eq!(entity.passphrase(), "hunter2");
        assert!(entity.key_path().is_none());
    }

    #[test]
    fn test_suite_name_normalization() {
        assert_eq!(TlsCapabilities::normalize_suite_name("TLS_AES_256_GCM_SHA384"), "TLS13_AES_256_GCM_SHA384");
        assert_eq!(
            TlsCapabilities::normalize_suite_name("tls_chacha20_poly1305_sha256"),
            "TLS13_CHACHA20_POLY1305_SHA256"
        );
        assert_eq!(
            TlsCapabilities::normalize_suite_name("TLS_ECDHE_RSA_WITH_AES_128_GCM_SHA256"),
            "TLS_ECDHE_RSA_WITH_AES_128_GCM_SHA256"
        );
    }

    #[test]
    fn test_capabilities_probe() {
        let capabilities = TlsCapabilities::detect();
        assert!(capabilities.cipher_policy);
        assert!(!capabilities.renegotiation);
        assert!(capabilities.supports_suite("TLS_AES_128_GCM_SHA256"));
    }

    #[test]
    fn test_summary_wildcard_cover() {
        let summary = CertificateSummary {
            subject: String::new(),
            issuer: String::new(),
            serial: String::new(),
            not_before: 0,
            not_after: 0,
            dns_names: vec!["*.example.com".to_string(), "example.com".to_string()],
        };
        assert!(summary.covers("example.com"));
        assert!(summary.covers("www.example.com"));
        assert!(!summary.covers("a.b.example.com"));
        assert!(!summary.covers("example.org"));
    }

    #[test]
    fn test_scan_pem_blocks_records_ranges() {
        let dir = TempDir::new().unwrap();
        let (cert_path, key_path) = write_pem_pair(&dir, "blocks", &["blocks.test"]);
        let mut data = b"leading text\n".to_vec();
        data.extend(std::fs::read(&cert_path).unwrap());
        data.extend(std::fs::read(&key_path).unwrap());
        let blocks = CertificateLoader::scan_pem_blocks(&data).unwrap();
        assert_eq!(blocks.len(), 2);
        assert!(data[blocks[0].range.clone()].starts_with(b"-----BEGIN CERTIFICATE-----"));
        assert!(blocks[0].range.end <= blocks[1].range.start);
        assert!(matches!(blocks[0].item, rustls_pemfile::Item::X509Certificate(_)));
    }

    #[test]
    fn test_source_hash_is_upper_hex() {
        let hash = CertificateLoader::source_hash(b"primary", Some(b"key"));
        assert_eq!(hash.len(), 64);
        assert_eq!(hash, hash.to_ascii_uppercase());
        assert_ne!(hash, CertificateLoader::source_hash(b"primary", None));
    }

    #[test]
    fn test_borrow_return_balance() {
        let (_dir, certificate) = load_certificate("lifecycle.test");
        assert_eq!(certificate.state(), CertificateState::Active);
        let first = certificate.borrow_chain().unwrap();
        let second = certificate.borrow_chain().unwrap();
        assert_eq!(certificate.ref_count(), 2);
        certificate.return_chain();
        certificate.return_chain();
        certificate.return_chain();
        assert_eq!(certificate.ref_count(), 0);
        assert_eq!(first.len(), second.len());
    }

    #[test]
    fn test_delete_defers_dispose_until_last_return() {
        let (_dir, certificate) = load_certificate("deferred.test");
        let lease = certificate.lease().unwrap();
        certificate.delete();
        assert_eq!(certificate.state(), CertificateState::MarkedForDeletion);
        assert!(lease.chain().leaf().is_some());
        assert!(certificate.borrow_chain().is_some());
        certificate.return_chain();
        drop(lease);
        assert_eq!(certificate.state(), CertificateState::Disposed);
        assert!(certificate.borrow_chain().is_none());
        assert!(certificate.peek_chain().is_none());
    }

    #[test]
    fn test_dispose_requires_mark_and_zero_count() {
        let (_dir, certificate) = load_certificate("dispose.test");
        assert!(!certificate.dispose());
        let chain = certificate.borrow_chain().unwrap();
        certificate.delete();
        assert!(!certificate.dispose());
        certificate.return_chain();
        assert_eq!(certificate.state(), CertificateState::Disposed);
        assert!(!certificate.dispose());
        assert!(!chain.is_empty());
    }

    #[test]
    fn test_store_resolve_order() {
        let dir = TempDir::new().unwrap();
        let (cert_a, key_a) = write_pem_pair(&dir, "a", &["a.test"]);
        let (cert_d, key_d) = write_pem_pair(&dir, "d", &["localhost"]);
        let store = CertificateStore::new();
        let report = store.reconcile(&[CertEntity::pem("a.test", cert_a, key_a)]);
        assert_eq!(report.added, vec!["a.test".to_string()]);
        assert!(store.resolve("unknown.test").is_none());
        assert!(store.try_resolve("").is_err());

        store.reconcile(&[
            CertEntity::pem("a.test", dir.path().join("a.pem"), dir.path().join("a.key")),
            CertEntity::pem("Default", cert_d, key_d),
        ]);
        assert_eq!(store.resolve("A.TEST.").unwrap().domain(), "a.test");
        assert_eq!(store.resolve("unknown.test").unwrap().domain(), "default");
        assert_eq!(store.resolve("").unwrap().domain(), "default");
        assert_eq!(store.len(), 2);
    }
}
