use crate::ssl::enums::certificate_error::CertificateError;
use crate::ssl::ssl::{normalize_server_name, DEFAULT_DOMAIN};
use crate::ssl::structs::alias_entry::AliasEntry;
use crate::ssl::structs::cert_entity::CertEntity;
use crate::ssl::structs::certificate::Certificate;
use crate::ssl::structs::certificate_loader::CertificateLoader;
use crate::ssl::structs::certificate_snapshot::CertificateSnapshot;
use crate::ssl::structs::certificate_store::CertificateStore;
use crate::ssl::structs::reconcile_report::ReconcileReport;
use log::{debug, error, info, warn};
use parking_lot::Mutex;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::hash::BuildHasherDefault;
use std::sync::Arc;

impl std::fmt::Debug for CertificateStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CertificateStore")
            .field("certificates_count", &self.certificates.len())
            .field("aliases_count", &self.aliases.len())
            .finish()
    }
}

impl Default for CertificateStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CertificateStore {
    pub fn new() -> Self {
        Self {
            certificates: dashmap::DashMap::with_hasher(BuildHasherDefault::default()),
            aliases: dashmap::DashMap::with_hasher(BuildHasherDefault::default()),
            reconcile_lock: Mutex::new(()),
        }
    }

    pub fn reconcile(&self, entities: &[CertEntity]) -> ReconcileReport {
        self.reconcile_retaining(entities, &[])
    }

    /// Reconciles `entities` into the map. Domains listed in `retained` keep
    /// whatever they have loaded even though no entity names them.
    pub fn reconcile_retaining(&self, entities: &[CertEntity], retained: &[String]) -> ReconcileReport {
        let _guard = self.reconcile_lock.lock();
        self.reconcile_locked(entities, retained)
    }

    pub fn reconcile_aliases(&self, groups: &BTreeMap<String, Vec<String>>) -> (Vec<String>, Vec<String>) {
        let _guard = self.reconcile_lock.lock();
        self.reconcile_aliases_locked(groups)
    }

    /// One full pass: entities (keeping rejected domains) then aliases.
    pub fn apply_snapshot(&self, snapshot: &CertificateSnapshot) -> ReconcileReport {
        let _guard = self.reconcile_lock.lock();
        let retained: Vec<String> = snapshot.rejected.iter().map(|(domain, _)| domain.clone()).collect();
        let mut report = self.reconcile_locked(&snapshot.entities, &retained);
        for (domain, reason) in &snapshot.rejected {
            report.failed.push((normalize_server_name(domain), reason.clone()));
        }
        let (added, removed) = self.reconcile_aliases_locked(&snapshot.aliases);
        report.aliases_added.extend(added);
        report.aliases_removed.extend(removed);
        info!(
            "[RECONCILE] added {} updated {} policy {} unchanged {} removed {} failed {} aliases +{} -{}",
            report.added.len(),
            report.updated.len(),
            report.policy_updated.len(),
            report.unchanged.len(),
            report.removed.len(),
            report.failed.len(),
            report.aliases_added.len(),
            report.aliases_removed.len()
        );
        report
    }

    pub fn resolve(&self, server_name: &str) -> Option<Arc<Certificate>> {
        let name = normalize_server_name(server_name);
        if !name.is_empty() {
            if let Some(certificate) = self.certificates.get(&name) {
                return Some(Arc::clone(certificate.value()));
            }
            if let Some(alias) = self.aliases.get(&name) {
                return Some(Arc::clone(&alias.value().certificate));
            }
        }
        self.certificates.get(DEFAULT_DOMAIN).map(|certificate| Arc::clone(certificate.value()))
    }

    pub fn try_resolve(&self, server_name: &str) -> Result<Arc<Certificate>, CertificateError> {
        self.resolve(server_name).ok_or_else(|| {
            let shown = if server_name.is_empty() { "<none>" } else { server_name };
            CertificateError::Resolution(shown.to_string())
        })
    }

    pub fn get_certificate(&self, domain: &str) -> Option<Arc<Certificate>> {
        self.certificates
            .get(&normalize_server_name(domain))
            .map(|certificate| Arc::clone(certificate.value()))
    }

    pub fn alias_target(&self, alias: &str) -> Option<String> {
        self.aliases
            .get(&normalize_server_name(alias))
            .map(|entry| entry.value().primary.clone())
    }

    pub fn all_certificates(&self) -> Vec<(String, Arc<Certificate>)> {
        let mut certificates: Vec<_> = self
            .certificates
            .iter()
            .map(|entry| (entry.key().clone(), Arc::clone(entry.value())))
            .collect();
        certificates.sort_by(|a, b| a.0.cmp(&b.0));
        certificates
    }

    /// Alias to primary domain pairs, sorted by alias.
    pub fn all_aliases(&self) -> Vec<(String, String)> {
        let mut aliases: Vec<_> = self
            .aliases
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().primary.clone()))
            .collect();
        aliases.sort();
        aliases
    }

    pub fn len(&self) -> usize {
        self.certificates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.certificates.is_empty()
    }

    fn reconcile_locked(&self, entities: &[CertEntity], retained: &[String]) -> ReconcileReport {
        let loader = CertificateLoader::new();
        let mut report = ReconcileReport::default();
        let retained: HashSet<String> = retained.iter().map(|domain| normalize_server_name(domain)).collect();
        let mut seen: HashSet<String> = HashSet::new();
        let mut superseded: Vec<Arc<Certificate>> = Vec::new();

        for entity in entities {
            let domain = normalize_server_name(&entity.domain);
            if !seen.insert(domain.clone()) {
                warn!("[RECONCILE] Duplicate domain {} ignored, first entry wins", domain);
                report.failed.push((domain, "duplicate domain".to_string()));
                continue;
            }
            let loaded = match loader.load(entity) {
                Ok(certificate) => certificate,
                Err(e) => {
                    error!("[RECONCILE] Keeping previous state for {}: {}", domain, e);
                    report.failed.push((domain, e.to_string()));
                    continue;
                }
            };
            let current = self.certificates.get(&domain).map(|entry| Arc::clone(entry.value()));
            match current {
                None => {
                    self.certificates.insert(domain.clone(), Arc::new(loaded));
                    info!("[RECONCILE] Added {}", domain);
                    report.added.push(domain);
                }
                Some(current) if current.source_hash() == loaded.source_hash() => {
                    let policy = current.policy();
                    if policy.entity() != entity || policy.material_hash() != loaded.policy().material_hash() {
                        match current.update_policy(entity) {
                            Ok(()) => {
                                info!("[RECONCILE] Updated policy for {}", domain);
                                report.policy_updated.push(domain);
                            }
                            Err(e) => {
                                error!("[RECONCILE] Keeping previous policy for {}: {}", domain, e);
                                report.failed.push((domain, e.to_string()));
                            }
                        }
                    } else {
                        debug!("[RECONCILE] {} unchanged", domain);
                        report.unchanged.push(domain);
                    }
                    loaded.delete();
                }
                Some(current) => {
                    self.certificates.insert(domain.clone(), Arc::new(loaded));
                    info!("[RECONCILE] Replaced {} ({} -> new hash)", domain, current.source_hash());
                    superseded.push(current);
                    report.updated.push(domain);
                }
            }
        }

        let stale: Vec<String> = self
            .certificates
            .iter()
            .filter(|entry| !seen.contains(entry.key()) && !retained.contains(entry.key()))
            .map(|entry| entry.key().clone())
            .collect();
        for domain in stale {
            if let Some((_, certificate)) = self.certificates.remove(&domain) {
                info!("[RECONCILE] Removed {}", domain);
                superseded.push(certificate);
                report.removed.push(domain);
            }
        }
        for domain in &retained {
            if !seen.contains(domain) && self.certificates.contains_key(domain) {
                report.retained.push(domain.clone());
            }
        }

        report.aliases_removed.extend(self.repoint_aliases());

        for certificate in superseded {
            certificate.delete();
        }
        report
    }

    /// Points every alias at the object now mapped under its primary; drops
    /// aliases whose primary is gone.
    fn repoint_aliases(&self) -> Vec<String> {
        let entries: Vec<(String, String)> = self
            .aliases
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().primary.clone()))
            .collect();
        let mut removed = Vec::new();
        for (alias, primary) in entries {
            match self.certificates.get(&primary).map(|entry| Arc::clone(entry.value())) {
                Some(current) => {
                    if let Some(mut entry) = self.aliases.get_mut(&alias) {
                        if !Arc::ptr_eq(&entry.certificate, &current) {
                            entry.certificate = current;
                        }
                    }
                }
                None => {
                    if self.aliases.remove(&alias).is_some() {
                        info!("[RECONCILE] Dropped alias {} (primary {} removed)", alias, primary);
                        removed.push(alias);
                    }
                }
            }
        }
        removed
    }

    fn reconcile_aliases_locked(&self, groups: &BTreeMap<String, Vec<String>>) -> (Vec<String>, Vec<String>) {
        let mut declared: HashMap<String, String> = HashMap::new();
        let mut added = Vec::new();
        for (primary, aliases) in groups {
            let primary = normalize_server_name(primary);
            let certificate = match self.certificates.get(&primary).map(|entry| Arc::clone(entry.value())) {
                Some(certificate) => certificate,
                None => {
                    warn!("[RECONCILE] Aliases declared for unknown domain {}", primary);
                    continue;
                }
            };
            for alias in aliases {
                let alias = normalize_server_name(alias);
                if alias.is_empty() || alias == primary {
                    continue;
                }
                if self.certificates.contains_key(&alias) {
                    warn!("[RECONCILE] Alias {} collides with a configured domain, skipped", alias);
                    continue;
                }
                if let Some(owner) = declared.get(&alias) {
                    if owner != &primary {
                        warn!("[RECONCILE] Alias {} already claimed by {}, skipped for {}", alias, owner, primary);
                    }
                    continue;
                }
                declared.insert(alias.clone(), primary.clone());
                let previous = self.aliases.insert(
                    alias.clone(),
                    AliasEntry {
                        primary: primary.clone(),
                        certificate: Arc::clone(&certificate),
                    },
                );
                if previous.map(|entry| entry.primary != primary).unwrap_or(true) {
                    debug!("[RECONCILE] Alias {} -> {}", alias, primary);
                    added.push(alias);
                }
            }
        }

        let stale: Vec<String> = self
            .aliases
            .iter()
            .filter(|entry| {
                declared.get(entry.key()) != Some(&entry.value().primary)
                    || entry.value().certificate.domain() != entry.value().primary
            })
            .map(|entry| entry.key().clone())
            .collect();
        let mut removed = Vec::new();
        for alias in stale {
            if self.aliases.remove(&alias).is_some() {
                debug!("[RECONCILE] Alias {} removed", alias);
                removed.push(alias);
            }
        }
        (added, removed)
    }
}
