use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CertificateFormat {
    Pem,
    #[serde(alias = "Pfx")]
    Pkcs12,
}
