use crate::ssl::enums::certificate_state::CertificateState;

impl CertificateState {
    pub(crate) fn from_u8(value: u8) -> CertificateState {
        match value {
            0 => CertificateState::Active,
            1 => CertificateState::MarkedForDeletion,
            _ => CertificateState::Disposed,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CertificateState::Active => "active",
            CertificateState::MarkedForDeletion => "marked_for_deletion",
            CertificateState::Disposed => "disposed",
        }
    }
}

impl std::fmt::Display for CertificateState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
