use color_eyre::{eyre::eyre, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::warn;
use url::Url;

use crate::http::RetryPolicy;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
  pub http: HttpConfig,
  pub testimonials: TestimonialsConfig,
  pub content: ContentConfig,
}

/// Upper bound on `http.max_retries`.
pub const MAX_RETRIES: u32 = 10;

/// Timeout, retry and cache settings shared by both clients.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
  /// Per-attempt timeout
  pub timeout_ms: u64,
  /// Total attempts per fetch
  pub max_retries: u32,
  /// Backoff unit; failed attempt `n` waits `2^n * backoff_base_ms`
  pub backoff_base_ms: u64,
  /// How long a successful response is served from cache
  pub cache_ttl_ms: u64,
}

impl Default for HttpConfig {
  fn default() -> Self {
    Self {
      timeout_ms: 10_000,
      max_retries: 3,
      backoff_base_ms: 1_000,
      cache_ttl_ms: 300_000,
    }
  }
}

impl HttpConfig {
  pub fn retry_policy(&self) -> RetryPolicy {
    RetryPolicy {
      max_attempts: self.max_retries,
      timeout: Duration::from_millis(self.timeout_ms),
      backoff_base: Duration::from_millis(self.backoff_base_ms),
    }
  }

  pub fn cache_ttl(&self) -> Duration {
    Duration::from_millis(self.cache_ttl_ms)
  }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TestimonialsConfig {
  pub base_url: String,
  pub endpoint: String,
}

impl Default for TestimonialsConfig {
  fn default() -> Self {
    Self {
      base_url: "https://backend-portfolio-production-d539.up.railway.app/api".to_string(),
      endpoint: "valoraciones/portfolio".to_string(),
    }
  }
}

impl TestimonialsConfig {
  /// `{base_url}/{endpoint}`, tolerant of slashes on either side of the join.
  pub fn url(&self) -> Result<Url> {
    let joined = format!(
      "{}/{}",
      self.base_url.trim_end_matches('/'),
      self.endpoint.trim_start_matches('/')
    );
    Url::parse(&joined).map_err(|e| eyre!("Invalid testimonials URL '{}': {}", joined, e))
  }
}

/// Headless content backend holding the project documents.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
  pub project_id: String,
  pub dataset: String,
  pub api_version: String,
  /// Which document perspective to read (e.g., "drafts", "published")
  pub perspective: String,
  /// Query selecting project documents
  pub query: String,
  /// Image CDN root; project id and dataset are appended
  pub image_cdn_url: String,
  /// Shown when a project has no usable main image
  pub placeholder_image: String,
  /// Overrides the API host derived from `project_id` (useful for mirrors and tests)
  pub api_url: Option<String>,
}

impl Default for ContentConfig {
  fn default() -> Self {
    Self {
      project_id: "kysyrox3".to_string(),
      dataset: "production".to_string(),
      api_version: "2025-09-29".to_string(),
      perspective: "drafts".to_string(),
      query: r#"*[_type == "project"]"#.to_string(),
      image_cdn_url: "https://cdn.sanity.io/images".to_string(),
      placeholder_image: "/placeholder-project.jpg".to_string(),
      api_url: None,
    }
  }
}

impl ContentConfig {
  /// Full query URL including the encoded query and perspective.
  pub fn query_url(&self) -> Result<Url> {
    let host = self
      .api_url
      .clone()
      .unwrap_or_else(|| format!("https://{}.api.sanity.io", self.project_id));
    let base = format!(
      "{}/v{}/data/query/{}",
      host.trim_end_matches('/'),
      self.api_version,
      self.dataset
    );

    let mut url =
      Url::parse(&base).map_err(|e| eyre!("Invalid content API URL '{}': {}", base, e))?;
    url
      .query_pairs_mut()
      .append_pair("query", &self.query)
      .append_pair("perspective", &self.perspective);
    Ok(url)
  }
}

impl Config {
  /// Load configuration from file, then apply environment overrides.
  ///
  /// Search order:
  /// 1. Explicit path if provided (must exist)
  /// 2. ./showcase.yaml (current directory)
  /// 3. $XDG_CONFIG_HOME/showcase/config.yaml
  ///
  /// Without any file the built-in defaults are used.
  pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
    let path = if let Some(p) = explicit_path {
      if p.exists() {
        Some(p.to_path_buf())
      } else {
        return Err(eyre!("Config file not found: {}", p.display()));
      }
    } else {
      Self::find_config_file()
    };

    let mut config = match path {
      Some(p) => Self::load_from_path(&p)?,
      None => Self::default(),
    };
    config.apply_env(|name| std::env::var(name).ok());
    config.validate()?;

    Ok(config)
  }

  fn find_config_file() -> Option<PathBuf> {
    // Check current directory
    let local = PathBuf::from("showcase.yaml");
    if local.exists() {
      return Some(local);
    }

    // Check XDG config directory
    if let Some(config_dir) = dirs::config_dir() {
      let xdg_path = config_dir.join("showcase").join("config.yaml");
      if xdg_path.exists() {
        return Some(xdg_path);
      }
    }

    None
  }

  fn load_from_path(path: &Path) -> Result<Self> {
    let contents = std::fs::read_to_string(path)
      .map_err(|e| eyre!("Failed to read config file {}: {}", path.display(), e))?;

    Self::from_yaml(&contents)
      .map_err(|e| eyre!("Failed to parse config file {}: {}", path.display(), e))
  }

  pub fn from_yaml(contents: &str) -> Result<Self> {
    // An empty document deserializes to unit, not to a struct with defaults
    if contents.trim().is_empty() {
      return Ok(Self::default());
    }
    Ok(serde_yaml::from_str(contents)?)
  }

  /// Override settings from environment variables.
  ///
  /// - SHOWCASE_API_BASE_URL, SHOWCASE_TESTIMONIALS_ENDPOINT
  /// - SHOWCASE_API_TIMEOUT, SHOWCASE_API_RETRIES, SHOWCASE_CACHE_DURATION (milliseconds / count)
  /// - SHOWCASE_CONTENT_PROJECT_ID, SHOWCASE_CONTENT_DATASET
  ///
  /// Numbers that fail to parse are ignored and the previous value stays.
  pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
    let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

    if let Some(v) = var("SHOWCASE_API_BASE_URL") {
      self.testimonials.base_url = v;
    }
    if let Some(v) = var("SHOWCASE_TESTIMONIALS_ENDPOINT") {
      self.testimonials.endpoint = v;
    }
    if let Some(v) = var("SHOWCASE_CONTENT_PROJECT_ID") {
      self.content.project_id = v;
    }
    if let Some(v) = var("SHOWCASE_CONTENT_DATASET") {
      self.content.dataset = v;
    }

    override_number(var("SHOWCASE_API_TIMEOUT"), "SHOWCASE_API_TIMEOUT", &mut self.http.timeout_ms);
    override_number(var("SHOWCASE_API_RETRIES"), "SHOWCASE_API_RETRIES", &mut self.http.max_retries);
    override_number(
      var("SHOWCASE_CACHE_DURATION"),
      "SHOWCASE_CACHE_DURATION",
      &mut self.http.cache_ttl_ms,
    );
  }

  /// Check that both backends resolve to usable URLs and the retry settings
  /// are in range: `timeout_ms` above zero, `max_retries` at most
  /// [`MAX_RETRIES`] (0 still means one attempt).
  pub fn validate(&self) -> Result<()> {
    if self.http.timeout_ms == 0 {
      return Err(eyre!("http.timeout_ms must be greater than 0"));
    }
    if self.http.max_retries > MAX_RETRIES {
      return Err(eyre!(
        "http.max_retries must be at most {}, got {}",
        MAX_RETRIES,
        self.http.max_retries
      ));
    }
    self.testimonials.url()?;
    self.content.query_url()?;
    Ok(())
  }
}

fn override_number<T: std::str::FromStr>(value: Option<String>, name: &str, target: &mut T) {
  let Some(raw) = value else {
    return;
  };
  match raw.trim().parse() {
    Ok(parsed) => *target = parsed,
    Err(_) => warn!(variable = name, value = %raw, "ignoring non-numeric override"),
  }
}
