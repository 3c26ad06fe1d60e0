use crate::ssl::structs::connection_info::ConnectionInfo;
use crate::ssl::structs::handshake_adapter::HandshakeAdapter;
use crate::tls::structs::tls_connection::TlsConnection;
use crate::tls::structs::tls_server::TlsServer;
use crate::tls::tls::accept_tls_connection;
use log::{debug, error, info};
use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::{TcpListener, TcpStream};

impl TlsServer {
    pub async fn new(addr: SocketAddr, adapter: Arc<HandshakeAdapter>, handshake_timeout: Duration) -> io::Result<TlsServer> {
        let listener = TcpListener::bind(addr).await?;
        Ok(TlsServer {
            listener,
            adapter,
            handshake_timeout,
        })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accepts until `rx` changes. Each connection gets its own task: the
    /// handshake (bounded by the timeout), then `handler`.
    #[tracing::instrument(level = "debug", skip(self, rx, handler))]
    pub async fn start<H, F>(&self, mut rx: tokio::sync::watch::Receiver<bool>, handler: H)
    where
        H: Fn(TlsConnection<TcpStream>) -> F + Clone + Send + Sync + 'static,
        F: Future<Output = io::Result<()>> + Send + 'static,
    {
        let local = self.listener.local_addr().ok();
        loop {
            tokio::select! {
                _ = rx.changed() => {
                    info!("[TLS] Stopping TLS server {:?}...", local);
                    break;
                }
                accepted = self.listener.accept() => {
                    match accepted {
                        Ok((stream, peer)) => {
                            let adapter = Arc::clone(&self.adapter);
                            let timeout = self.handshake_timeout;
                            let handler = handler.clone();
                            tokio::spawn(async move {
                                let info = ConnectionInfo::from_stream(&stream);
                                let connection = match tokio::time::timeout(timeout, accept_tls_connection(stream, info, &adapter)).await {
                                    Ok(Ok(connection)) => connection,
                                    Ok(Err(e)) => {
                                        debug!("[TLS] Handshake with {} failed: {}", peer, e);
                                        return;
                                    }
                                    Err(_) => {
                                        debug!("[TLS] Handshake with {} timed out", peer);
                                        return;
                                    }
                                };
                                if let Err(e) = handler(connection).await {
                                    debug!("[TLS] Connection {} closed with error: {}", peer, e);
                                }
                            });
                        }
                        Err(e) => {
                            error!("[TLS] Accept failed: {}", e);
                        }
                    }
                }
            }
        }
    }
}
