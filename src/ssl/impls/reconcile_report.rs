use crate::ssl::structs::reconcile_report::ReconcileReport;

impl ReconcileReport {
    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }

    pub fn has_changes(&self) -> bool {
        !(self.added.is_empty()
            && self.updated.is_empty()
            && self.policy_updated.is_empty()
            && self.removed.is_empty()
            && self.aliases_added.is_empty()
            && self.aliases_removed.is_empty())
    }

    /// `ok`, `partial` or `failed`, as reported by the admin API.
    pub fn status(&self) -> &'static str {
        let succeeded = self.added.len() + self.updated.len() + self.policy_updated.len() + self.unchanged.len();
        match (self.has_failures(), succeeded) {
            (false, _) => "ok",
            (true, 0) => "failed",
            (true, _) => "partial",
        }
    }
}
