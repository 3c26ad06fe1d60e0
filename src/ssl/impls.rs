pub mod cert_entity;
pub mod certificate;
pub mod certificate_chain;
pub mod certificate_format;
pub mod certificate_lease;
pub mod certificate_loader;
pub mod certificate_snapshot;
pub mod certificate_state;
pub mod certificate_store;
pub mod certificate_summary;
pub mod connection_info;
pub mod encryption_policy;
pub mod handshake_adapter;
pub mod handshake_options;
pub mod handshake_policy;
pub mod leased_certificate_resolver;
pub mod protocol_set;
pub mod reconcile_report;
pub mod revocation_mode;
pub mod tls_capabilities;
pub mod tls_protocol;
