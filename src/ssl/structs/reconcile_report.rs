use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconcileReport {
    pub added: Vec<String>,
    pub updated: Vec<String>,
    pub policy_updated: Vec<String>,
    pub unchanged: Vec<String>,
    pub removed: Vec<String>,
    pub retained: Vec<String>,
    pub failed: Vec<(String, String)>,
    pub aliases_added: Vec<String>,
    pub aliases_removed: Vec<String>,
}
