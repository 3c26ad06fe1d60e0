use crate::common::structs::custom_error::CustomError;
use crate::config::enums::configuration_error::ConfigurationError;
use crate::config::structs::api_server_config::ApiServerConfig;
use crate::config::structs::certificate_config::CertificateConfig;
use crate::config::structs::configuration::Configuration;
use crate::config::structs::tls_server_config::TlsServerConfig;
use crate::ssl::ssl::DEFAULT_DOMAIN;
use crate::ssl::structs::certificate_snapshot::CertificateSnapshot;
use log::error;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Write;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::thread::available_parallelism;

impl Configuration {
    pub fn init() -> Configuration {
        let mut certificates = BTreeMap::new();
        certificates.insert(
            DEFAULT_DOMAIN.to_string(),
            CertificateConfig {
                format: String::from("Pem"),
                primary_path: String::from("localhost.pem"),
                secondary_path: Some(String::from("localhost.key")),
                protocols: Some(vec![String::from("Tls12"), String::from("Tls13")]),
                cipher_suites: None,
                alpn: Some(vec![String::from("Http2"), String::from("Http11")]),
                client_cert_required: Some(false),
                client_ca_path: None,
                crl_paths: None,
                revocation_mode: Some(String::from("NoCheck")),
                allow_renegotiation: Some(false),
                allow_session_resumption: Some(true),
                encryption_policy: Some(String::from("RequireEncryption")),
            },
        );
        Configuration {
            log_level: String::from("info"),
            tls_server: TlsServerConfig {
                enabled: true,
                bind_address: String::from("0.0.0.0:7080"),
                handshake_timeout: Some(10),
                certs_path: Some(String::from("certs")),
                watch: Some(true),
                reload_debounce_ms: Some(1000),
            },
            api_server: Some(ApiServerConfig {
                enabled: true,
                bind_address: String::from("127.0.0.1:8081"),
                api_key: Some(String::from("MyApiKey")),
                keep_alive: Some(60),
                request_timeout: Some(30),
                threads: Some(available_parallelism().map(|count| count.get() as u64).unwrap_or(1)),
            }),
            certificates,
            aliases: BTreeMap::new(),
        }
    }

    pub fn load(data: &[u8]) -> Result<Configuration, toml::de::Error> {
        toml::from_str(&String::from_utf8_lossy(data))
    }

    pub fn load_file(path: &str) -> Result<Configuration, ConfigurationError> {
        match std::fs::read(path) {
            Err(e) => Err(ConfigurationError::IOError(e)),
            Ok(data) => match Self::load(data.as_slice()) {
                Ok(cfg) => Ok(cfg),
                Err(e) => Err(ConfigurationError::ParseError(e)),
            },
        }
    }

    pub fn save_file(path: &str, data: String) -> Result<(), ConfigurationError> {
        match File::create(path) {
            Ok(mut file) => match file.write_all(data.as_ref()) {
                Ok(_) => Ok(()),
                Err(e) => Err(ConfigurationError::IOError(e)),
            },
            Err(e) => Err(ConfigurationError::IOError(e)),
        }
    }

    pub fn save_from_config(path: &str, config: &Configuration) -> Result<(), ConfigurationError> {
        let data = toml::to_string(config).map_err(ConfigurationError::SerializeError)?;
        Self::save_file(path, data)
    }

    pub fn load_from_file(path: &str, create: bool) -> Result<Configuration, CustomError> {
        let config = match Configuration::load_file(path) {
            Ok(config) => config,
            Err(error) => {
                eprintln!("No config file found or corrupt.");
                eprintln!("[ERROR] {}", error);

                if !create {
                    eprintln!("You can either create your own {} file, or start this app using '--create-config' as parameter.", path);
                    return Err(CustomError::new(&format!("will not create automatically {} file", path)));
                }
                eprintln!("Creating config file..");

                return match Configuration::save_from_config(path, &Configuration::init()) {
                    Ok(_) => {
                        eprintln!("Please edit {} and restart, exiting now...", path);
                        Err(CustomError::new(&format!("created {} file", path)))
                    }
                    Err(e) => {
                        eprintln!("{} file could not be created, check permissions...", path);
                        eprintln!("{e}");
                        Err(CustomError::new(&format!("could not create {} file", path)))
                    }
                };
            }
        };

        println!("[VALIDATE] Validating configuration...");
        config.validate()?;
        Ok(config)
    }

    /// Checks the process-wide settings. Per-domain certificate tables are
    /// validated on every snapshot instead, so one bad domain never blocks startup.
    pub fn validate(&self) -> Result<(), CustomError> {
        if !matches!(self.log_level.as_str(), "off" | "trace" | "debug" | "info" | "warn" | "error") {
            return Err(CustomError::new(&format!("[VALIDATE CONFIG] Unknown log_level \"{}\"", self.log_level)));
        }
        if self.tls_server.enabled {
            Self::validate_bind_address("tls_server", &self.tls_server.bind_address)?;
        }
        if let Some(api_server) = &self.api_server {
            if api_server.enabled {
                Self::validate_bind_address("api_server", &api_server.bind_address)?;
                if api_server.api_key.as_deref().unwrap_or_default().is_empty() {
                    return Err(CustomError::new("[VALIDATE CONFIG] api_server.api_key must be set"));
                }
            }
        }
        Ok(())
    }

    fn validate_bind_address(name: &str, value: &str) -> Result<(), CustomError> {
        value.parse::<SocketAddr>().map(|_| ()).map_err(|_| {
            CustomError::new(&format!("[VALIDATE CONFIG] Error checking {} [:] bind_address: \"{}\"", name, value))
        })
    }

    pub fn certs_path(&self) -> Option<PathBuf> {
        self.tls_server
            .certs_path
            .as_deref()
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from)
    }

    /// Turns the certificate tables into reconcile input. Invalid tables are
    /// listed as rejected, not dropped.
    pub fn certificate_snapshot(&self) -> CertificateSnapshot {
        let base = self.certs_path();
        let mut snapshot = CertificateSnapshot::default();
        for (domain, certificate) in &self.certificates {
            match certificate.to_entity(domain, base.as_deref()) {
                Ok(entity) => snapshot.entities.push(entity),
                Err(e) => {
                    error!("[CONFIG] Rejected certificate configuration for {}: {}", domain, e);
                    snapshot.rejected.push((domain.clone(), e.to_string()));
                }
            }
        }
        snapshot.aliases = self.aliases.clone();
        snapshot
    }

    /// Files whose changes should trigger a reload: the credential files and
    /// policy files of every configured domain.
    pub fn watched_paths(&self) -> Vec<PathBuf> {
        let snapshot = self.certificate_snapshot();
        let mut paths: Vec<PathBuf> = Vec::new();
        for entity in &snapshot.entities {
            paths.push(entity.primary_path.clone());
            paths.extend(entity.key_path());
            paths.extend(entity.client_ca_path.clone());
            paths.extend(entity.crl_paths.iter().cloned());
        }
        paths.sort();
        paths.dedup();
        paths
    }

    pub fn handshake_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.tls_server.handshake_timeout.unwrap_or(10).max(1))
    }

    pub fn reload_debounce(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.tls_server.reload_debounce_ms.unwrap_or(1000))
    }
}
