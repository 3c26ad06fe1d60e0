use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CertificateError {
    #[error("Invalid certificate configuration: {0}")]
    Config(String),
    #[error("Certificate file not found: {0}")]
    FileNotFound(String),
    #[error("Unsupported certificate format: {0}")]
    UnsupportedFormat(String),
    #[error("Failed to parse certificate: {0}")]
    Parse(String),
    #[error("Private key does not match certificate: {0}")]
    KeyMismatch(String),
    #[error("Failed to build certified key: {0}")]
    ChainExport(String),
    #[error("No certificate available for server name: {0}")]
    Resolution(String),
    #[error("TLS policy not supported: {0}")]
    PolicyUnsupported(String),
}

impl CertificateError {
    /// Errors raised while turning configuration into a `CertEntity`.
    pub fn is_config(&self) -> bool {
        matches!(self, CertificateError::Config(_) | CertificateError::UnsupportedFormat(_))
    }
}
