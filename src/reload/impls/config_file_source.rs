use crate::common::structs::custom_error::CustomError;
use crate::config::structs::configuration::Configuration;
use crate::reload::structs::config_file_source::ConfigFileSource;
use crate::reload::traits::certificate_source::CertificateSource;
use crate::ssl::structs::certificate_snapshot::CertificateSnapshot;
use log::warn;
use std::path::{Path, PathBuf};

impl ConfigFileSource {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn read_configuration(&self) -> Result<Configuration, CustomError> {
        Configuration::load_file(&self.path.to_string_lossy()).map_err(CustomError::from)
    }
}

impl CertificateSource for ConfigFileSource {
    fn snapshot(&self) -> Result<CertificateSnapshot, CustomError> {
        Ok(self.read_configuration()?.certificate_snapshot())
    }

    fn watched_paths(&self) -> Vec<PathBuf> {
        let mut paths = vec![self.path.clone()];
        match self.read_configuration() {
            Ok(config) => paths.extend(config.watched_paths()),
            Err(e) => warn!("[RELOAD] Watching only {}: {}", self.path.display(), e),
        }
        paths
    }

    fn describe(&self) -> String {
        format!("config file {}", self.path.display())
    }
}
