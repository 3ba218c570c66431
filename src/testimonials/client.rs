use color_eyre::Result;
use tracing::info;

use crate::cache::CacheResult;
use crate::config::Config;
use crate::http::{CachedClient, FetchError, JsonClient};

use super::api_types::ApiTestimonialsResponse;
use super::normalize::normalize;
use super::types::Testimonial;

/// Testimonials client: cached, retried fetch plus normalization.
#[derive(Debug)]
pub struct TestimonialsClient {
  inner: CachedClient<ApiTestimonialsResponse>,
}

impl TestimonialsClient {
  pub fn new(config: &Config, http: JsonClient) -> Result<Self> {
    let url = config.testimonials.url()?;
    Ok(Self {
      inner: CachedClient::new(http, url, config.http.retry_policy(), config.http.cache_ttl()),
    })
  }

  /// Fetch and normalize testimonials.
  pub async fn testimonials(&mut self) -> Result<Vec<Testimonial>, FetchError> {
    let result = self.inner.fetch().await?;
    Self::finish(result)
  }

  /// Bypass the cache and fetch again.
  pub async fn refetch(&mut self) -> Result<Vec<Testimonial>, FetchError> {
    let result = self.inner.refetch().await?;
    Self::finish(result)
  }

  fn finish(result: CacheResult<ApiTestimonialsResponse>) -> Result<Vec<Testimonial>, FetchError> {
    let raw_count = result.data.data.len();
    let testimonials = normalize(&result.data.data)?;
    info!(
      raw = raw_count,
      kept = testimonials.len(),
      source = ?result.source,
      "testimonials ready"
    );
    Ok(testimonials)
  }
}
