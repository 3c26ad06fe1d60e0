use crate::ssl::structs::certificate::Certificate;
use std::sync::Arc;

#[derive(Clone)]
pub struct AliasEntry {
    pub primary: String,
    pub certificate: Arc<Certificate>,
}
