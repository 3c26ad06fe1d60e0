/// Source of certificate snapshots.
pub mod certificate_source;
