use crate::ssl::structs::reconcile_report::ReconcileReport;
use std::sync::Arc;

/// Outcome of the latest finished pass, published to waiting requesters.
#[derive(Debug, Clone, Default)]
pub struct ReloadPass {
    /// Highest request ticket this pass covered.
    pub served: u64,
    pub passes: u64,
    pub result: Option<Result<Arc<ReconcileReport>, String>>,
}
