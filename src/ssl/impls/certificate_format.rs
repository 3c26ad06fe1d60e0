use crate::ssl::enums::certificate_error::CertificateError;
use crate::ssl::enums::certificate_format::CertificateFormat;
use std::str::FromStr;

impl CertificateFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            CertificateFormat::Pem => "Pem",
            CertificateFormat::Pkcs12 => "Pkcs12",
        }
    }
}

impl FromStr for CertificateFormat {
    type Err = CertificateError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pem" => Ok(CertificateFormat::Pem),
            "pkcs12" | "pfx" | "p12" => Ok(CertificateFormat::Pkcs12),
            _ => Err(CertificateError::UnsupportedFormat(value.to_string())),
        }
    }
}

impl std::fmt::Display for CertificateFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
