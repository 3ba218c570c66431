//! TTL store backing the fetch clients.

use std::collections::HashMap;
use std::time::Duration;
use tokio::time::Instant;

/// A single cached value.
#[derive(Debug, Clone)]
pub struct CachedEntry<V> {
  /// The cached value
  pub data: V,
  /// When the value was stored
  pub stored_at: Instant,
  /// How long the value stays fresh
  pub ttl: Duration,
}

impl<V> CachedEntry<V> {
  /// An entry is fresh while strictly less than `ttl` has elapsed.
  pub fn is_fresh(&self, now: Instant) -> bool {
    now.saturating_duration_since(self.stored_at) < self.ttl
  }
}

/// Key-value store where every entry carries its own time-to-live.
///
/// There is no size bound and no eviction beyond expiry: expired entries are
/// removed the next time they are looked up.
#[derive(Debug)]
pub struct TtlCache<V> {
  entries: HashMap<String, CachedEntry<V>>,
}

impl<V> Default for TtlCache<V> {
  fn default() -> Self {
    Self::new()
  }
}

impl<V> TtlCache<V> {
  pub fn new() -> Self {
    Self {
      entries: HashMap::new(),
    }
  }

  /// Store a value, replacing any existing entry for the key.
  pub fn set(&mut self, key: impl Into<String>, data: V, ttl: Duration) {
    self.entries.insert(
      key.into(),
      CachedEntry {
        data,
        stored_at: Instant::now(),
        ttl,
      },
    );
  }

  /// Get a fresh value. An expired entry is deleted and reported as absent.
  pub fn get(&mut self, key: &str) -> Option<&V> {
    let fresh = self.entries.get(key)?.is_fresh(Instant::now());
    if !fresh {
      self.entries.remove(key);
      return None;
    }
    self.entries.get(key).map(|entry| &entry.data)
  }

  /// Drop every entry.
  pub fn clear(&mut self) {
    self.entries.clear();
  }

  /// Number of stored entries, expired ones included until they are read.
  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }
}
