use sha2::{Digest, Sha256};
use url::Url;

/// Cache key for a resource fetched from `url`.
///
/// The resource name keeps keys readable in logs; the SHA256 of the full URL
/// (query string included) keeps two different queries for the same resource
/// from sharing an entry.
pub fn cache_key(resource: &str, url: &Url) -> String {
  let mut hasher = Sha256::new();
  hasher.update(url.as_str().as_bytes());
  format!("{}:{}", resource, hex::encode(hasher.finalize()))
}
