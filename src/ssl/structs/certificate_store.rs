use crate::ssl::structs::alias_entry::AliasEntry;
use crate::ssl::structs::certificate::Certificate;
use crate::ssl::types::ahash_dash_map::AHashDashMap;
use parking_lot::Mutex;
use std::sync::Arc;

pub struct CertificateStore {
    pub(crate) certificates: AHashDashMap<String, Arc<Certificate>>,
    pub(crate) aliases: AHashDashMap<String, AliasEntry>,
    pub(crate) reconcile_lock: Mutex<()>,
}
