use crate::ssl::structs::certificate_lease::CertificateLease;
use crate::ssl::structs::connection_info::ConnectionInfo;
use tokio_rustls::server::TlsStream;

/// An established TLS connection. Owns the certificate lease, so the borrow
/// is returned when the connection is dropped, whatever the reason.
pub struct TlsConnection<IO> {
    pub(crate) stream: TlsStream<IO>,
    pub(crate) lease: CertificateLease,
    pub(crate) info: ConnectionInfo,
}
