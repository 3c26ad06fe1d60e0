/// DashMap keyed with the ahash hasher.
pub mod ahash_dash_map;
