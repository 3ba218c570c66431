use color_eyre::Result;
use tracing::info;

use crate::cache::CacheResult;
use crate::config::Config;
use crate::http::{CachedClient, FetchError, JsonClient};

use super::api_types::ApiQueryResponse;
use super::image::ImageUrlBuilder;
use super::types::Project;

/// Content backend client: cached, retried project query plus normalization.
#[derive(Debug)]
pub struct ContentClient {
  inner: CachedClient<ApiQueryResponse>,
  images: ImageUrlBuilder,
  placeholder_image: String,
}

impl ContentClient {
  pub fn new(config: &Config, http: JsonClient) -> Result<Self> {
    let url = config.content.query_url()?;
    Ok(Self {
      inner: CachedClient::new(http, url, config.http.retry_policy(), config.http.cache_ttl()),
      images: ImageUrlBuilder::new(&config.content),
      placeholder_image: config.content.placeholder_image.clone(),
    })
  }

  /// All projects in backend order.
  pub async fn projects(&mut self) -> Result<Vec<Project>, FetchError> {
    let result = self.inner.fetch().await?;
    Ok(self.finish(result))
  }

  /// Bypass the cache and fetch again.
  pub async fn refetch(&mut self) -> Result<Vec<Project>, FetchError> {
    let result = self.inner.refetch().await?;
    Ok(self.finish(result))
  }

  /// Project with the given backend id, if any.
  pub async fn project_by_id(&mut self, id: &str) -> Result<Option<Project>, FetchError> {
    Ok(self.projects().await?.into_iter().find(|p| p.id == id))
  }

  /// Projects whose category label matches `category`, ignoring case.
  pub async fn projects_in(&mut self, category: &str) -> Result<Vec<Project>, FetchError> {
    let wanted = category.trim().to_lowercase();
    Ok(
      self
        .projects()
        .await?
        .into_iter()
        .filter(|p| p.category.to_lowercase() == wanted)
        .collect(),
    )
  }

  /// Distinct category labels in first-seen order.
  pub async fn categories(&mut self) -> Result<Vec<String>, FetchError> {
    Ok(distinct_categories(&self.projects().await?))
  }

  /// Projects and their distinct categories from one fetch.
  ///
  /// A failed fetch fails both, without a second round of retries.
  pub async fn projects_with_categories(
    &mut self,
  ) -> Result<(Vec<Project>, Vec<String>), FetchError> {
    let projects = self.projects().await?;
    let categories = distinct_categories(&projects);
    Ok((projects, categories))
  }

  fn finish(&self, result: CacheResult<ApiQueryResponse>) -> Vec<Project> {
    let source = result.source;
    let projects: Vec<Project> = result
      .data
      .result
      .into_iter()
      .enumerate()
      .map(|(index, doc)| doc.into_project(index, &self.images, &self.placeholder_image))
      .collect();
    info!(count = projects.len(), source = ?source, "projects ready");
    projects
  }
}

pub fn distinct_categories(projects: &[Project]) -> Vec<String> {
  let mut seen = Vec::new();
  for project in projects {
    if !seen.contains(&project.category) {
      seen.push(project.category.clone());
    }
  }
  seen
}
