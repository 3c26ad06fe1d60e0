mod common;

use rustls::client::danger::{HandshakeSignatureValid, ServerCertVerified, ServerCertVerifier};
use rustls::crypto::CryptoProvider;
use rustls::pki_types::{CertificateDer, ServerName, UnixTime};
use rustls::{DigitallySignedStruct, HandshakeKind, SignatureScheme};
use sni_cert_store::ssl::enums::handshake_outcome::HandshakeOutcome;
use sni_cert_store::ssl::ssl::{create_certificate_store, create_handshake_adapter};
use sni_cert_store::ssl::structs::cert_entity::CertEntity;
use sni_cert_store::ssl::structs::connection_info::ConnectionInfo;
use sni_cert_store::tls::structs::tls_server::TlsServer;
use sni_cert_store::tls::tls::{accept_tls_connection, echo_connection};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio_rustls::TlsConnector;

#[derive(Debug)]
struct AcceptAnyServerCert(Arc<CryptoProvider>);

impl ServerCertVerifier for AcceptAnyServerCert {
    fn verify_server_cert(
        &self,
        _end_entity: &CertificateDer<'_>,
        _intermediates: &[CertificateDer<'_>],
        _server_name: &ServerName<'_>,
        _ocsp_response: &[u8],
        _now: UnixTime,
    ) -> Result<ServerCertVerified, rustls::Error> {
        Ok(ServerCertVerified::assertion())
    }

    fn verify_tls12_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, rustls::Error> {
        rustls::crypto::verify_tls12_signature(message, cert, dss, &self.0.signature_verification_algorithms)
    }

    fn verify_tls13_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, rustls::Error> {
        rustls::crypto::verify_tls13_signature(message, cert, dss, &self.0.signature_verification_algorithms)
    }

    fn supported_verify_schemes(&self) -> Vec<SignatureScheme> {
        self.0.signature_verification_algorithms.supported_schemes()
    }
}

fn connector(alpn: &[&[u8]]) -> TlsConnector {
    let provider = Arc::new(rustls::crypto::ring::default_provider());
    let mut config = rustls::ClientConfig::builder_with_provider(provider.clone())
        .with_safe_default_protocol_versions()
        .unwrap()
        .dangerous()
        .with_custom_certificate_verifier(Arc::new(AcceptAnyServerCert(provider)))
        .with_no_client_auth();
    config.alpn_protocols = alpn.iter().map(|protocol| protocol.to_vec()).collect();
    TlsConnector::from(Arc::new(config))
}

fn server_name(name: &str) -> ServerName<'static> {
    ServerName::try_from(name.to_string()).unwrap()
}

#[tokio::test]
async fn test_handshake_negotiates_alpn_and_holds_lease() {
    let dir = TempDir::new().unwrap();
    let entity = common::pem_entity(&dir, "site.test").with_alpn(&["h2"]);
    let store = create_certificate_store();
    store.reconcile(&[entity]);
    let adapter = create_handshake_adapter(store.clone());
    let certificate = store.get_certificate("site.test").unwrap();

    let (client_io, server_io) = tokio::io::duplex(64 * 1024);
    let client = connector(&[b"http/1.1", b"h2"]);
    let (server, client) = tokio::join!(
        accept_tls_connection(server_io, ConnectionInfo::new(None, None), &adapter),
        client.connect(server_name("site.test"), client_io)
    );
    let mut server = server.unwrap();
    let mut client = client.unwrap();

    assert_eq!(server.domain(), "site.test");
    assert_eq!(server.server_name(), Some("site.test"));
    assert_eq!(server.alpn_protocol(), Some(&b"h2"[..]));
    assert_eq!(client.get_ref().1.alpn_protocol(), Some(&b"h2"[..]));
    assert_eq!(certificate.ref_count(), 1);

    client.write_all(b"ping").await.unwrap();
    client.flush().await.unwrap();
    let mut buffer = [0u8; 4];
    server.read_exact(&mut buffer).await.unwrap();
    assert_eq!(&buffer, b"ping");

    drop(server);
    drop(client);
    assert_eq!(certificate.ref_count(), 0);
}

#[tokio::test]
async fn test_unknown_name_without_default_aborts() {
    let dir = TempDir::new().unwrap();
    let store = create_certificate_store();
    store.reconcile(&[common::pem_entity(&dir, "known.test")]);
    let adapter = create_handshake_adapter(store);

    let (client_io, server_io) = tokio::io::duplex(64 * 1024);
    let client = connector(&[]);
    let (server, client) = tokio::join!(
        accept_tls_connection(server_io, ConnectionInfo::new(None, None), &adapter),
        client.connect(server_name("unknown.test"), client_io)
    );
    assert_eq!(server.unwrap_err().kind(), std::io::ErrorKind::ConnectionAborted);
    assert!(client.is_err());
}

#[tokio::test]
async fn test_adapter_falls_back_to_default() {
    let dir = TempDir::new().unwrap();
    let (cert_path, key_path) = common::write_pem_pair(dir.path(), "fallback", &["localhost"]);
    let store = create_certificate_store();
    store.reconcile(&[CertEntity::pem("default", cert_path, key_path)]);
    let adapter = create_handshake_adapter(store.clone());
    let info = ConnectionInfo::new(None, None);

    for name in [None, Some("anything.test")] {
        match adapter.on_client_hello(&info, name) {
            HandshakeOutcome::Proceed(options) => {
                assert_eq!(options.domain, "default");
                assert_eq!(store.get_certificate("default").unwrap().ref_count(), 1);
            }
            HandshakeOutcome::Abort(e) => panic!("unexpected abort: {e}"),
        }
        assert_eq!(store.get_certificate("default").unwrap().ref_count(), 0);
    }
}

#[tokio::test]
async fn test_tls_server_selects_certificate_by_name() {
    let dir = TempDir::new().unwrap();
    let store = create_certificate_store();
    store.reconcile(&[common::pem_entity(&dir, "one.test"), common::pem_entity(&dir, "two.test")]);
    let expected = store.get_certificate("two.test").unwrap().peek_chain().unwrap();

    let server = TlsServer::new("127.0.0.1:0".parse().unwrap(), create_handshake_adapter(store), Duration::from_secs(5))
        .await
        .unwrap();
    let address = server.local_addr().unwrap();
    let (tx, rx) = tokio::sync::watch::channel(false);
    let task = tokio::spawn(async move {
        server.start(rx, echo_connection).await;
    });

    let stream = tokio::net::TcpStream::connect(address).await.unwrap();
    let mut client = connector(&[]).connect(server_name("two.test"), stream).await.unwrap();
    let presented = client.get_ref().1.peer_certificates().unwrap()[0].clone();
    assert_eq!(presented.as_ref(), expected.leaf().unwrap().as_ref());

    client.write_all(b"echo").await.unwrap();
    let mut buffer = [0u8; 4];
    client.read_exact(&mut buffer).await.unwrap();
    assert_eq!(&buffer, b"echo");

    tx.send(true).unwrap();
    task.await.unwrap();
}

#[tokio::test]
async fn test_second_handshake_resumes_session() {
    let dir = TempDir::new().unwrap();
    let store = create_certificate_store();
    store.reconcile(&[common::pem_entity(&dir, "resume.test")]);
    let adapter = create_handshake_adapter(store);
    let client = connector(&[]);

    let mut kinds = Vec::new();
    for _ in 0..2 {
        let (client_io, server_io) = tokio::io::duplex(64 * 1024);
        let (server, stream) = tokio::join!(
            accept_tls_connection(server_io, ConnectionInfo::new(None, None), &adapter),
            client.connect(server_name("resume.test"), client_io)
        );
        let mut server = server.unwrap();
        let mut stream = stream.unwrap();
        kinds.push(stream.get_ref().1.handshake_kind());

        server.write_all(b"pong").await.unwrap();
        server.flush().await.unwrap();
        let mut buffer = [0u8; 4];
        stream.read_exact(&mut buffer).await.unwrap();
        assert_eq!(&buffer, b"pong");
    }
    assert_eq!(kinds, vec![Some(HandshakeKind::Full), Some(HandshakeKind::Resumed)]);
}
