//! Data structures for the admin API.

/// Query parameter for API token authentication.
pub mod query_token;

/// Shared data context for API request handlers.
pub mod api_service_data;

/// Certificate status and reload payloads.
pub mod api_certificate;
