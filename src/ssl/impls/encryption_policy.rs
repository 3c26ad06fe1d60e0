use crate::ssl::enums::certificate_error::CertificateError;
use crate::ssl::enums::encryption_policy::EncryptionPolicy;
use std::str::FromStr;

impl FromStr for EncryptionPolicy {
    type Err = CertificateError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "requireencryption" => Ok(EncryptionPolicy::RequireEncryption),
            "allownoencryption" => Ok(EncryptionPolicy::AllowNoEncryption),
            "noencryption" => Ok(EncryptionPolicy::NoEncryption),
            _ => Err(CertificateError::Config(format!("unknown encryption policy '{}'", value))),
        }
    }
}
