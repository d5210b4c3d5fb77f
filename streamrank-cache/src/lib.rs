//! Key-value result cache for streamrank.
//!
//! Enriched results are cached as opaque JSON bytes under
//! `"<region>:<platform>:<category>"` and `"<region>:fetchall"` keys with a
//! fixed time-to-live. [`MemoryCache`] keeps entries in process,
//! [`DiskCache`] persists them under the user cache directory.

pub mod disk;
pub mod error;
pub mod memory;
pub mod store;

pub use disk::{DiskCache, cache_dir};
pub use error::CacheError;
pub use memory::MemoryCache;
pub use store::{CACHE_TTL, CacheStore, fetch_all_key, source_key};
