//! SNI certificate store.
//!
//! Loads server certificates from PEM or PKCS12 sources, keeps them in a
//! concurrent domain registry with aliases, and picks one per TLS connection
//! from the ClientHello server name.
//!
//! # Lifecycle
//!
//! Every [`Certificate`](structs::certificate::Certificate) counts its
//! outstanding borrows. A reload that replaces or removes a domain marks the
//! old object for deletion; the chain is released once the last connection
//! that borrowed it has finished.
//!
//! # Resolution order
//!
//! 1. exact domain
//! 2. alias
//! 3. the `default` entry
//!
//! # Example
//!
//! ```rust,ignore
//! use sni_cert_store::ssl::ssl::{create_certificate_store, create_handshake_adapter};
//! use sni_cert_store::ssl::structs::cert_entity::CertEntity;
//!
//! let store = create_certificate_store();
//! store.reconcile(&[CertEntity::pem("example.com", "example.pem", "example.key")]);
//! let adapter = create_handshake_adapter(store.clone());
//! ```

/// Error and configuration enums.
pub mod enums;

/// Data structures.
pub mod structs;

/// Implementation blocks.
pub mod impls;

/// Type aliases.
pub mod types;

/// Store construction and name helpers.
#[allow(clippy::module_inception)]
pub mod ssl;

#[cfg(test)]
mod tests;
