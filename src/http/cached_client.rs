//! Cached, retrying fetch of a single remote resource.

use std::time::Duration;
use tracing::{debug, info};
use url::Url;

use crate::cache::{cache_key, CacheResult, Resource, TtlCache};

use super::client::JsonClient;
use super::retry::RetryPolicy;
use super::FetchError;

/// Fetches one resource from one URL with transparent caching and retries.
///
/// Each instance owns its cache, so two clients never share entries or retry
/// counters.
#[derive(Debug)]
pub struct CachedClient<R> {
  inner: JsonClient,
  url: Url,
  retry: RetryPolicy,
  cache: TtlCache<R>,
  cache_ttl: Duration,
}

impl<R: Resource> CachedClient<R> {
  pub fn new(inner: JsonClient, url: Url, retry: RetryPolicy, cache_ttl: Duration) -> Self {
    Self {
      inner,
      url,
      retry,
      cache: TtlCache::new(),
      cache_ttl,
    }
  }

  pub fn url(&self) -> &Url {
    &self.url
  }

  /// Fetch with a cache-first strategy.
  ///
  /// 1. Fresh cache entry: return it without touching the network
  /// 2. Otherwise fetch with retries; the first success is cached and returned
  /// 3. Once the retry budget is spent the last error is returned
  pub async fn fetch(&mut self) -> Result<CacheResult<R>, FetchError> {
    let key = cache_key(R::resource_name(), &self.url);

    if let Some(cached) = self.cache.get(&key) {
      debug!(resource = R::resource_name(), "serving cached response");
      return Ok(CacheResult::from_cache(cached.clone()));
    }

    debug!(resource = R::resource_name(), url = %self.url, "cache miss, fetching");

    let inner = &self.inner;
    let url = &self.url;
    let (payload, attempts) = self
      .retry
      .run(R::resource_name(), move |attempt| {
        debug!(resource = R::resource_name(), attempt, "sending request");
        inner.get::<R>(url)
      })
      .await?;

    self.cache.set(key, payload.clone(), self.cache_ttl);
    info!(resource = R::resource_name(), attempts, "fetched from network");

    Ok(CacheResult::from_network(payload, attempts))
  }

  /// Drop the cached response and fetch again.
  pub async fn refetch(&mut self) -> Result<CacheResult<R>, FetchError> {
    self.cache.clear();
    self.fetch().await
  }
}
