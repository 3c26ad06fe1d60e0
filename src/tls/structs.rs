/// Established TLS connection holding its certificate lease.
pub mod tls_connection;

/// TCP accept loop with SNI-driven handshakes.
pub mod tls_server;
