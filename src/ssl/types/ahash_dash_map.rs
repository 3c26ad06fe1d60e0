use ahash::AHasher;
use dashmap::DashMap;
use std::hash::BuildHasherDefault;

pub type AHashDashMap<K, V> = DashMap<K, V, BuildHasherDefault<AHasher>>;
