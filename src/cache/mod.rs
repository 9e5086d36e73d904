//! Cache Module
//!
//! Response caching for the read endpoints: a key-value store boundary
//! with an in-memory implementation, a typed JSON client on top, and the
//! cache-aside policy the entity services drive.

mod client;
mod entry;
mod policy;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use client::{CacheClient, CacheError};
pub use entry::CacheEntry;
pub use policy::EntityCache;
pub use store::{KeyValueStore, MemoryStore, StoreError};

// == Public Constants ==
/// Maximum allowed value size in bytes
pub const MAX_VALUE_SIZE: usize = 1024 * 1024; // 1 MB
