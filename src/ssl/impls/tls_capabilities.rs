use crate::ssl::structs::tls_capabilities::TlsCapabilities;
use log::debug;
use rustls::SupportedCipherSuite;

impl TlsCapabilities {
    pub fn detect() -> Self {
        let provider = rustls::crypto::ring::default_provider();
        let cipher_suites: Vec<String> = provider.cipher_suites.iter().map(Self::suite_name).collect();
        let capabilities = Self {
            cipher_policy: !cipher_suites.is_empty(),
            legacy_protocols: false,
            renegotiation: false,
            online_revocation: false,
            null_encryption: false,
            cipher_suites,
        };
        debug!("[CERTIFICATE] TLS capabilities: {:?}", capabilities);
        capabilities
    }

    pub fn suite_name(suite: &SupportedCipherSuite) -> String {
        format!("{:?}", suite.suite())
    }

    /// Canonical rustls spelling of a configured suite name.
    pub fn normalize_suite_name(name: &str) -> String {
        let upper = name.trim().to_ascii_uppercase().replace('-', "_");
        for prefix in ["TLS_AES_", "TLS_CHACHA20_"] {
            if let Some(rest) = upper.strip_prefix(prefix) {
                return format!("TLS13_{}{}", &prefix[4..], rest);
            }
        }
        upper
    }

    pub fn supports_suite(&self, name: &str) -> bool {
        let wanted = Self::normalize_suite_name(name);
        self.cipher_suites.iter().any(|suite| *suite == wanted)
    }
}
