// Cache module for project metadata.
// Key-value stores holding timestamped GitHub responses, and the entry format written to them.

#![allow(dead_code, unused_imports)]

pub mod entry;
pub mod paths;
pub mod store;

pub use entry::{CacheEntry, EntryState, FRESHNESS_MS, cache_key};
pub use paths::cache_dir;
pub use store::{FileStore, KeyValueStore, MemoryStore};
