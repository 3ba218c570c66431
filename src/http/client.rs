use color_eyre::{eyre::eyre, Result};
use reqwest::header::ACCEPT;
use url::Url;

use super::FetchError;
use crate::cache::Resource;

/// Thin JSON-over-HTTP client: one GET, one decode, one application check.
#[derive(Clone, Debug)]
pub struct JsonClient {
  client: reqwest::Client,
}

impl JsonClient {
  pub fn new() -> Result<Self> {
    let client = reqwest::Client::builder()
      .user_agent(concat!("showcase/", env!("CARGO_PKG_VERSION")))
      .build()
      .map_err(|e| eyre!("Failed to build HTTP client: {}", e))?;
    Ok(Self { client })
  }

  /// Perform a single GET against `url` and decode the body as `R`.
  pub async fn get<R: Resource>(&self, url: &Url) -> Result<R, FetchError> {
    let response = self
      .client
      .get(url.clone())
      .header(ACCEPT, "application/json")
      .send()
      .await?;

    let status = response.status();
    if !status.is_success() {
      return Err(FetchError::Status {
        status: status.as_u16(),
        reason: status.canonical_reason().unwrap_or_default().to_string(),
      });
    }

    let body = response.bytes().await?;
    let payload: R = serde_json::from_slice(&body).map_err(|e| FetchError::Decode(e.to_string()))?;
    payload.check()?;

    Ok(payload)
  }
}
