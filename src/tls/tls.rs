use crate::ssl::enums::handshake_outcome::HandshakeOutcome;
use crate::ssl::structs::connection_info::ConnectionInfo;
use crate::ssl::structs::handshake_adapter::HandshakeAdapter;
use crate::tls::structs::tls_connection::TlsConnection;
use crate::tls::structs::tls_server::TlsServer;
use log::{error, info};
use std::io;
use std::net::SocketAddr;
use std::process::exit;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::runtime::Runtime;
use tokio::task::JoinHandle;

/// Reads the ClientHello, lets the adapter pick certificate and policy, then
/// finishes the handshake. An abort drops the stream without a response.
pub async fn accept_tls_connection<IO>(
    stream: IO,
    info: ConnectionInfo,
    adapter: &HandshakeAdapter,
) -> io::Result<TlsConnection<IO>>
where
    IO: AsyncRead + AsyncWrite + Unpin,
{
    let start = tokio_rustls::LazyConfigAcceptor::new(rustls::server::Acceptor::default(), stream).await?;
    let server_name = start.client_hello().server_name().map(|name| name.to_string());
    match adapter.on_client_hello(&info, server_name.as_deref()) {
        HandshakeOutcome::Abort(e) => Err(io::Error::new(io::ErrorKind::ConnectionAborted, e)),
        HandshakeOutcome::Proceed(options) => {
            let (server_config, lease) = options.into_parts();
            let stream = start.into_stream(server_config).await?;
            Ok(TlsConnection { stream, lease, info })
        }
    }
}

/// Writes back whatever the peer sends until it closes.
pub async fn echo_connection(mut connection: TlsConnection<TcpStream>) -> io::Result<()> {
    let mut buffer = vec![0u8; 16 * 1024];
    loop {
        let read = connection.read(&mut buffer).await?;
        if read == 0 {
            break;
        }
        connection.write_all(&buffer[..read]).await?;
        connection.flush().await?;
    }
    connection.shutdown().await
}

pub async fn tls_service(
    addr: SocketAddr,
    adapter: Arc<HandshakeAdapter>,
    handshake_timeout: Duration,
    rx: tokio::sync::watch::Receiver<bool>,
    tokio_tls: Arc<Runtime>,
) -> JoinHandle<()> {
    let tls_server = TlsServer::new(addr, adapter, handshake_timeout).await.unwrap_or_else(|e| {
        error!("Could not listen to the TLS port: {e}");
        exit(1);
    });
    info!("[TLS] Starting a server listener on {addr} with a {}s handshake timeout", handshake_timeout.as_secs());
    tokio_tls.spawn(async move {
        tls_server.start(rx, echo_connection).await;
    })
}
