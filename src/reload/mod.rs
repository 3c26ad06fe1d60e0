//! Reload pipeline.
//!
//! A [`CertificateSource`](traits::certificate_source::CertificateSource)
//! produces the desired domain list, the
//! [`CertificateReloader`](structs::certificate_reloader::CertificateReloader)
//! turns requests into debounced, non-overlapping reconcile passes, and the
//! [`CertificateWatcher`](structs::certificate_watcher::CertificateWatcher)
//! requests a pass whenever a watched file changes.

pub mod structs;

pub mod impls;

pub mod traits;

/// Background service bootstrap.
#[allow(clippy::module_inception)]
pub mod reload;
