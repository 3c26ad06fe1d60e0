use crate::ssl::enums::certificate_error::CertificateError;
use crate::ssl::structs::handshake_options::HandshakeOptions;

#[derive(Debug)]
pub enum HandshakeOutcome {
    Proceed(HandshakeOptions),
    Abort(CertificateError),
}
