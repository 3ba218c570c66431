//! Core traits and types for the caching system.

use serde::de::DeserializeOwned;

use crate::http::FetchError;

/// Trait for response envelopes that can be fetched and cached.
///
/// Implementors name themselves for cache keys and log lines, and may reject
/// a payload that decoded fine but reports a failure of its own.
pub trait Resource: Clone + Send + Sync + DeserializeOwned + 'static {
  /// Resource name used in cache keys and logs (e.g., "testimonials")
  fn resource_name() -> &'static str;

  /// Application-level check run on every decoded 2xx payload.
  fn check(&self) -> Result<(), FetchError> {
    Ok(())
  }
}

/// Result from a fetch, including data and metadata about the source.
#[derive(Debug, Clone)]
pub struct CacheResult<T> {
  /// The actual data
  pub data: T,
  /// Where the data came from
  pub source: CacheSource,
  /// Network attempts spent producing this result (0 for a cache hit)
  pub attempts: u32,
}

impl<T> CacheResult<T> {
  /// Create a new cache result from fresh network data.
  pub fn from_network(data: T, attempts: u32) -> Self {
    Self {
      data,
      source: CacheSource::Network,
      attempts,
    }
  }

  /// Create a new cache result from cached data.
  pub fn from_cache(data: T) -> Self {
    Self {
      data,
      source: CacheSource::Cache,
      attempts: 0,
    }
  }

  pub fn map<U>(self, f: impl FnOnce(T) -> U) -> CacheResult<U> {
    CacheResult {
      data: f(self.data),
      source: self.source,
      attempts: self.attempts,
    }
  }
}

/// Indicates where fetched data came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheSource {
  /// Fresh data from network
  Network,
  /// Data from cache, still within its TTL
  Cache,
}
