#[cfg(test)]
mod config_tests {
    mod configuration_tests {
        use crate::config::structs::configuration::Configuration;
        use crate::ssl::ssl::DEFAULT_DOMAIN;
        use std::path::PathBuf;

        #[test]
        fn test_init_round_trips_through_toml() {
            let config = Configuration::init();
            let data = toml::to_string(&config).unwrap();
            let parsed = Configuration::load(data.as_bytes()).unwrap();
            assert_eq!(parsed.tls_server.bind_address, "0.0.0.0:7080");
            assert!(parsed.certificates.contains_key(DEFAULT_DOMAIN));
            assert!(parsed.validate().is_ok());
        }

        #[test]
        fn test_validate_rejects_bad_bind_address() {
            let mut config = Configuration::init();
            config.tls_server.bind_address = String::from("not-an-address");
            assert!(config.validate().is_err());
        }

        #[test]
        fn test_validate_requires_api_key() {
            let mut config = Configuration::init();
            if let Some(api_server) = config.api_server.as_mut() {
                api_server.api_key = Some(String::new());
            }
            assert!(config.validate().is_err());
        }

        #[test]
        fn test_snapshot_keeps_rejected_domains() {
            let data = r#"
                log_level = "info"

                [tls_server]
                enabled = true
                bind_address = "127.0.0.1:7080"
                certs_path = "/etc/certs"

                [certificates."Example.COM"]
                format = "Pem"
                primary_path = "example.pem"
                secondary_path = "example.key"

                [certificates."broken.test"]
                format = "Der"
                primary_path = "broken.der"

                [aliases]
                "example.com" = ["www.example.com"]
            "#;
            let config = Configuration::load(data.as_bytes()).unwrap();
            let snapshot = config.certificate_snapshot();
            assert_eq!(snapshot.entities.len(), 1);
            assert_eq!(snapshot.entities[0].domain, "example.com");
            assert_eq!(snapshot.entities[0].primary_path, PathBuf::from("/etc/certs/example.pem"));
            assert_eq!(snapshot.rejected.len(), 1);
            assert_eq!(snapshot.rejected[0].0, "broken.test");
            assert_eq!(snapshot.aliases["example.com"], vec!["www.example.com".to_string()]);
            assert!(config.watched_paths().contains(&PathBuf::from("/etc/certs/example.key")));
        }

        #[test]
        fn test_durations_have_floors() {
            let mut config = Configuration::init();
            config.tls_server.handshake_timeout = Some(0);
            config.tls_server.reload_debounce_ms = None;
            assert_eq!(config.handshake_timeout().as_secs(), 1);
            assert_eq!(config.reload_debounce().as_millis(), 1000);
        }
    }

    mod certificate_config_tests {
        use crate::config::structs::certificate_config::CertificateConfig;
        use crate::ssl::enums::certificate_format::CertificateFormat;
        use crate::ssl::enums::tls_protocol::TlsProtocol;
        use std::path::{Path, PathBuf};

        fn pem_config() -> CertificateConfig {
            CertificateConfig {
                format: String::from("Pem"),
                primary_path: String::from("site.pem"),
                secondary_path: Some(String::from("site.key")),
                ..Default::default()
            }
        }

        #[test]
        fn test_relative_paths_resolve_against_base() {
            let entity = pem_config().to_entity("site.test", Some(Path::new("/srv/certs"))).unwrap();
            assert_eq!(entity.primary_path, PathBuf::from("/srv/certs/site.pem"));
            assert_eq!(entity.key_path(), Some(PathBuf::from("/srv/certs/site.key")));
            assert_eq!(entity.alpn, vec!["h2".to_string(), "http/1.1".to_string()]);
        }

        #[test]
        fn test_pkcs12_secondary_is_passphrase() {
            let config = CertificateConfig {
                format: String::from("Pfx"),
                primary_path: String::from("/abs/site.p12"),
                secondary_path: Some(String::from("secret")),
                ..Default::default()
            };
            let entity = config.to_entity("site.test", Some(Path::new("/srv"))).unwrap();
            assert_eq!(entity.format, CertificateFormat::Pkcs12);
            assert_eq!(entity.primary_path, PathBuf::from("/abs/site.p12"));
            assert_eq!(entity.passphrase(), "secret");
        }

        #[test]
        fn test_duplicate_protocols_union() {
            let mut config = pem_config();
            config.protocols = Some(vec![String::from("Tls13"), String::from("Tls13"), String::from("Tls12")]);
            let entity = config.to_entity("site.test", None).unwrap();
            assert!(entity.protocols.contains(TlsProtocol::Tls13));
            assert!(entity.protocols.contains(TlsProtocol::Tls12));
            assert_eq!(entity.protocols.len(), 2);
        }

        #[test]
        fn test_rejections() {
            let mut bad_domain = pem_config();
            bad_domain.primary_path = String::from("x.pem");
            assert!(bad_domain.to_entity("bad domain!", None).unwrap_err().is_config());

            let mut bad_cipher = pem_config();
            bad_cipher.cipher_suites = Some(vec![String::from("rc4-md5")]);
            assert!(bad_cipher.to_entity("site.test", None).is_err());

            let mut missing_ca = pem_config();
            missing_ca.client_cert_required = Some(true);
            assert!(missing_ca.to_entity("site.test", None).unwrap_err().is_config());

            let mut bad_protocol = pem_config();
            bad_protocol.protocols = Some(vec![String::from("Tls14")]);
            assert!(bad_protocol.to_entity("site.test", None).is_err());
        }

        #[test]
        fn test_alpn_mapping_passes_unknown_names() {
            let mut config = pem_config();
            config.alpn = Some(vec![String::from("Http3"), String::from("acme-tls/1")]);
            let entity = config.to_entity("*.site.test", None).unwrap();
            assert_eq!(entity.alpn, vec!["h3".to_string(), "acme-tls/1".to_string()]);
            assert_eq!(entity.domain, "*.site.test");
        }
    }
}
