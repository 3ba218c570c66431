//! In-memory caching for remote resources.
//!
//! This module provides:
//! - A TTL store that purges expired entries lazily on read
//! - The `Resource` trait implemented by every cacheable response envelope
//! - Stable cache keys derived from the resource name and request URL

mod key;
mod store;
mod traits;

pub use key::cache_key;
pub use store::{CachedEntry, TtlCache};
pub use traits::{CacheResult, CacheSource, Resource};
