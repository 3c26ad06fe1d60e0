pub mod alias_entry;

/// Domain configuration consumed by reconcile passes.
pub mod cert_entity;

/// Refcounted certificate with deferred disposal.
pub mod certificate;

pub mod certificate_chain;

/// RAII borrow of a certificate chain.
pub mod certificate_lease;

/// PEM and PKCS12 loader.
pub mod certificate_loader;

pub mod certificate_snapshot;

/// Concurrent domain and alias registry.
pub mod certificate_store;

pub mod certificate_summary;

pub mod connection_info;

/// Per-connection ClientHello handler.
pub mod handshake_adapter;

pub mod handshake_options;

/// Compiled per-domain TLS policy.
pub mod handshake_policy;

pub mod leased_certificate_resolver;

pub mod pem_block;

pub mod protocol_set;

pub mod reconcile_report;

/// One-time probe of TLS stack features.
pub mod tls_capabilities;
