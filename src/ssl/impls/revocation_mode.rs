use crate::ssl::enums::certificate_error::CertificateError;
use crate::ssl::enums::revocation_mode::RevocationMode;
use std::str::FromStr;

impl FromStr for RevocationMode {
    type Err = CertificateError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "nocheck" | "none" => Ok(RevocationMode::NoCheck),
            "online" => Ok(RevocationMode::Online),
            "offline" => Ok(RevocationMode::Offline),
            _ => Err(CertificateError::Config(format!("unknown revocation mode '{}'", value))),
        }
    }
}
