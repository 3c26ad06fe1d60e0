//! Configuration data structures.
//!
//! Each struct corresponds to a section in the TOML configuration file.

/// Admin API server configuration.
pub mod api_server_config;

/// Per-domain certificate configuration.
pub mod certificate_config;

/// Root configuration structure containing all settings.
pub mod configuration;

/// TLS listener and reload settings.
pub mod tls_server_config;
