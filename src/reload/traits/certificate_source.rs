use crate::common::structs::custom_error::CustomError;
use crate::ssl::structs::certificate_snapshot::CertificateSnapshot;
use std::path::PathBuf;

/// Where reconcile passes read their domain list from.
pub trait CertificateSource: Send + Sync {
    /// Reads the current desired state. An error leaves the store untouched.
    fn snapshot(&self) -> Result<CertificateSnapshot, CustomError>;

    /// Files whose changes should schedule a pass.
    fn watched_paths(&self) -> Vec<PathBuf>;

    fn describe(&self) -> String;
}
