use crate::ssl::structs::cert_entity::CertEntity;
use crate::ssl::structs::certificate_snapshot::CertificateSnapshot;
use std::collections::BTreeMap;

impl CertificateSnapshot {
    pub fn new(entities: Vec<CertEntity>) -> Self {
        Self {
            entities,
            rejected: Vec::new(),
            aliases: BTreeMap::new(),
        }
    }

    pub fn with_aliases(mut self, primary: &str, aliases: &[&str]) -> Self {
        self.aliases
            .entry(primary.to_string())
            .or_default()
            .extend(aliases.iter().map(|alias| alias.to_string()));
        self
    }
}
