//! In-memory response cache
//!
//! A single entry per key with a fixed expiry, plus the fetch-or-cache
//! wrapper every resource goes through.

pub mod fetch;
pub mod store;

// Re-export main types
pub use fetch::{Fetched, fetch_and_cache};
pub use store::{CacheEntry, CachedPayload, Expiry, ResponseCache, ctime};
