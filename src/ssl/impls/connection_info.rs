use crate::ssl::structs::connection_info::ConnectionInfo;
use std::net::SocketAddr;

impl ConnectionInfo {
    pub fn new(peer_addr: Option<SocketAddr>, local_addr: Option<SocketAddr>) -> Self {
        Self { peer_addr, local_addr }
    }

    pub fn from_stream(stream: &tokio::net::TcpStream) -> Self {
        Self {
            peer_addr: stream.peer_addr().ok(),
            local_addr: stream.local_addr().ok(),
        }
    }
}
