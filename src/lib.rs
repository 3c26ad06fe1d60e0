//! # SNI Certificate Store
//!
//! A multi-tenant TLS server certificate store. Certificates for many domains
//! are loaded from PEM or PKCS12 files, kept in a concurrent registry with
//! aliases, and selected per connection from the ClientHello server name.
//!
//! ## Features
//!
//! - **Formats**: PEM chains (with separate or embedded keys) and PKCS12 archives
//! - **Selection**: exact domain, then alias, then the `default` entry
//! - **Per-domain policy**: protocol versions, cipher suites, ALPN and client certificates
//! - **Hot reload**: file watcher and admin API drive reconcile passes; replaced
//!   certificates are released only after their last connection finishes
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use sni_cert_store::config::structs::configuration::Configuration;
//! use sni_cert_store::ssl::ssl::{create_certificate_store, create_handshake_adapter};
//!
//! let config = Configuration::load_from_file("config.toml", false)?;
//! let store = create_certificate_store();
//! store.apply_snapshot(&config.certificate_snapshot());
//! let adapter = create_handshake_adapter(store.clone());
//! ```
//!
//! ## Modules
//!
//! - [`api`] - admin endpoints for reload and status
//! - [`common`] - logging setup, shared error type and helpers
//! - [`config`] - configuration management and TOML parsing
//! - [`reload`] - certificate sources, reloader and file watcher
//! - [`ssl`] - loader, refcounted certificates, store and handshake adapter
//! - [`structs`] - CLI argument parsing
//! - [`tls`] - tokio TLS listener using the store

/// Admin REST API.
pub mod api;

/// Common utilities and shared functionality.
///
/// Logging setup, the binary-level error type and self-signed certificate
/// generation.
pub mod common;

/// Configuration management module.
pub mod config;

/// Reload pipeline.
///
/// Turns file changes and API requests into single-flight reconcile passes.
pub mod reload;

/// Certificate loading, storage and per-connection selection.
pub mod ssl;

/// CLI argument parsing.
pub mod structs;

/// TLS transport built on tokio-rustls.
pub mod tls;
