//! Configuration management.
//!
//! Loads the TOML configuration file: log level, the TLS listener, the admin
//! API and one `[certificates.<domain>]` table per served domain plus an
//! `[aliases]` table.
//!
//! # Example
//!
//! ```rust,ignore
//! use sni_cert_store::config::structs::configuration::Configuration;
//!
//! let config = Configuration::load_from_file("config.toml", false)?;
//! let snapshot = config.certificate_snapshot();
//! ```

/// Configuration enumerations.
pub mod enums;

/// Configuration data structures.
pub mod structs;

/// Implementation blocks for configuration loading/saving.
pub mod impls;

#[cfg(test)]
mod tests;
