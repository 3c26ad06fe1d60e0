use crate::ssl::structs::handshake_adapter::HandshakeAdapter;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

pub struct TlsServer {
    pub(crate) listener: TcpListener,
    pub(crate) adapter: Arc<HandshakeAdapter>,
    pub(crate) handshake_timeout: Duration,
}
