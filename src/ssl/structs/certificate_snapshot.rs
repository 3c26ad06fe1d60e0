use crate::ssl::structs::cert_entity::CertEntity;
use std::collections::BTreeMap;

/// Everything one configuration read produced.
#[derive(Debug, Clone, Default)]
pub struct CertificateSnapshot {
    pub entities: Vec<CertEntity>,
    /// Domains whose configuration was rejected; their loaded state is kept.
    pub rejected: Vec<(String, String)>,
    pub aliases: BTreeMap<String, Vec<String>>,
}
