use serde::Serialize;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum CertificateState {
    Active = 0,
    MarkedForDeletion = 1,
    Disposed = 2,
}
