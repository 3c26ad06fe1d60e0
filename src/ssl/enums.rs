/// Certificate loading and resolution errors.
pub mod certificate_error;

/// Credential container formats.
pub mod certificate_format;

/// Certificate lifecycle states.
pub mod certificate_state;

pub mod encryption_policy;

/// Result of a ClientHello callback.
pub mod handshake_outcome;

pub mod revocation_mode;

/// TLS protocol versions as named in configuration.
pub mod tls_protocol;
