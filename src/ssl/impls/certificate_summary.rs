use crate::ssl::enums::certificate_error::CertificateError;
use crate::ssl::structs::certificate_summary::CertificateSummary;
use x509_parser::extensions::GeneralName;
use x509_parser::prelude::parse_x509_certificate;

impl CertificateSummary {
    pub fn from_der(der: &[u8]) -> Result<Self, CertificateError> {
        let (_, cert) = parse_x509_certificate(der)
            .map_err(|e| CertificateError::Parse(format!("leaf certificate: {}", e)))?;
        let mut dns_names = Vec::new();
        if let Ok(Some(san)) = cert.subject_alternative_name() {
            for name in san.value.general_names.iter() {
                if let GeneralName::DNSName(dns) = name {
                    dns_names.push(dns.to_ascii_lowercase());
                }
            }
        }
        if dns_names.is_empty() {
            for common_name in cert.subject().iter_common_name() {
                if let Ok(value) = common_name.as_str() {
                    dns_names.push(value.to_ascii_lowercase());
                }
            }
        }
        Ok(Self {
            subject: cert.subject().to_string(),
            issuer: cert.issuer().to_string(),
            serial: cert.raw_serial_as_string(),
            not_before: cert.validity().not_before.timestamp(),
            not_after: cert.validity().not_after.timestamp(),
            dns_names,
        })
    }

    /// True when one of the DNS names matches `domain`, honoring a single
    /// left-most wildcard label.
    pub fn covers(&self, domain: &str) -> bool {
        self.dns_names.iter().any(|name| {
            if name == domain {
                return true;
            }
            match name.strip_prefix("*.") {
                Some(suffix) => domain
                    .split_once('.')
                    .map(|(label, rest)| !label.is_empty() && rest == suffix)
                    .unwrap_or(false),
                None => false,
            }
        })
    }

    pub fn expires_at(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        chrono::DateTime::from_timestamp(self.not_after, 0)
    }

    pub fn is_expired(&self) -> bool {
        self.not_after < chrono::Utc::now().timestamp()
    }
}
