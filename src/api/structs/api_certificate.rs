use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct CertificateStatusItem {
    pub domain: String,
    pub format: String,
    pub source_hash: String,
    pub subject: String,
    pub issuer: String,
    pub serial: String,
    pub dns_names: Vec<String>,
    pub not_after: Option<String>,
    pub expired: bool,
    pub loaded_at: String,
    pub state: String,
    pub ref_count: u64,
    pub protocols: Vec<String>,
    pub cipher_suites: Vec<String>,
    pub client_auth: bool,
    pub warnings: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct CertificateAliasItem {
    pub alias: String,
    pub domain: String,
}

#[derive(Debug, Serialize)]
pub struct CertificateFailureItem {
    pub domain: String,
    pub error: String,
}
