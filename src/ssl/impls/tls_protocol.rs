use crate::ssl::enums::certificate_error::CertificateError;
use crate::ssl::enums::tls_protocol::TlsProtocol;
use rustls::SupportedProtocolVersion;
use std::str::FromStr;

impl TlsProtocol {
    pub const ALL: [TlsProtocol; 6] = [
        TlsProtocol::Ssl2,
        TlsProtocol::Ssl3,
        TlsProtocol::Tls10,
        TlsProtocol::Tls11,
        TlsProtocol::Tls12,
        TlsProtocol::Tls13,
    ];

    pub(crate) fn bit(&self) -> u8 {
        1 << (*self as u8)
    }

    /// The rustls version backing this protocol, if the stack speaks it at all.
    pub fn rustls_version(&self) -> Option<&'static SupportedProtocolVersion> {
        match self {
            TlsProtocol::Tls12 => Some(&rustls::version::TLS12),
            TlsProtocol::Tls13 => Some(&rustls::version::TLS13),
            _ => None,
        }
    }
}

impl FromStr for TlsProtocol {
    type Err = CertificateError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "ssl2" => Ok(TlsProtocol::Ssl2),
            "ssl3" => Ok(TlsProtocol::Ssl3),
            "tls" | "tls10" | "tls1.0" => Ok(TlsProtocol::Tls10),
            "tls11" | "tls1.1" => Ok(TlsProtocol::Tls11),
            "tls12" | "tls1.2" => Ok(TlsProtocol::Tls12),
            "tls13" | "tls1.3" => Ok(TlsProtocol::Tls13),
            _ => Err(CertificateError::Config(format!("unknown TLS protocol '{}'", value))),
        }
    }
}

impl std::fmt::Display for TlsProtocol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TlsProtocol::Ssl2 => "Ssl2",
            TlsProtocol::Ssl3 => "Ssl3",
            TlsProtocol::Tls10 => "Tls10",
            TlsProtocol::Tls11 => "Tls11",
            TlsProtocol::Tls12 => "Tls12",
            TlsProtocol::Tls13 => "Tls13",
        };
        f.write_str(name)
    }
}
