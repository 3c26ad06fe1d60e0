//! Admin API for the certificate store.
//!
//! # Endpoints
//!
//! - `POST /api/certificate/reload` - run (or join) a reconcile pass and
//!   return its report
//! - `GET /api/certificate/status` - loaded certificates, their policy and
//!   the alias table
//!
//! # Authentication
//!
//! All endpoints require the configured API key as a query parameter:
//! `?token=<api_key>`

/// Data structures for API service context.
pub mod structs;

/// Server bootstrap, routes and token check.
#[allow(clippy::module_inception)]
pub mod api;

/// Certificate reload and status endpoints.
pub mod api_certificate;
