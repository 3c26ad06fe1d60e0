//! TLS transport.
//!
//! A tokio TCP listener that reads each ClientHello lazily, asks the
//! [`HandshakeAdapter`](crate::ssl::structs::handshake_adapter::HandshakeAdapter)
//! for the certificate and policy matching its server name, and completes the
//! handshake with that per-domain configuration.

/// Data structures.
pub mod structs;

/// Implementation blocks.
pub mod impls;

/// Handshake entry point and service bootstrap.
#[allow(clippy::module_inception)]
pub mod tls;
