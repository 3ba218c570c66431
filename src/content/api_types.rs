//! Serde-deserializable types matching content backend documents.
//!
//! Nearly every field is optional on the wire; `ApiProject::into_project` is
//! the single place where missing values are replaced with defaults.

use chrono::Datelike;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::cache::Resource;

use super::category::{self, MISSING_CATEGORY};
use super::image::{ImageParams, ImageUrlBuilder};
use super::types::{Layout, ProcessStep, Project};

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiAssetRef {
  #[serde(rename = "_ref")]
  pub reference: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiImage {
  pub asset: Option<ApiAssetRef>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiProcessStep {
  pub title: Option<String>,
  pub description: Option<String>,
}

/// A project document.
///
/// Documents are hand-edited in the studio, so apart from `_id` a field of the
/// wrong type is read as missing instead of failing the whole query.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiProject {
  #[serde(rename = "_id")]
  pub id: String,
  #[serde(default, deserialize_with = "lenient")]
  pub title: Option<String>,
  #[serde(default, deserialize_with = "lenient")]
  pub category: Option<String>,
  #[serde(default, deserialize_with = "lenient_text")]
  pub year: Option<String>,
  #[serde(default, deserialize_with = "lenient")]
  pub client: Option<String>,
  #[serde(default, deserialize_with = "lenient")]
  pub description: Option<String>,
  #[serde(default, deserialize_with = "lenient")]
  pub challenge: Option<String>,
  #[serde(default, deserialize_with = "lenient")]
  pub solution: Option<String>,
  #[serde(default, deserialize_with = "lenient")]
  pub main_image: Option<ApiImage>,
  #[serde(default, deserialize_with = "lenient")]
  pub gallery: Option<Vec<ApiImage>>,
  #[serde(default, deserialize_with = "lenient")]
  pub services: Option<Vec<String>>,
  #[serde(default, deserialize_with = "lenient")]
  pub tools: Option<Vec<String>>,
  #[serde(default, deserialize_with = "lenient")]
  pub results: Option<Vec<String>>,
  #[serde(default, deserialize_with = "lenient")]
  pub process: Option<Vec<ApiProcessStep>>,
  #[serde(default, deserialize_with = "lenient")]
  pub layout: Option<String>,
  #[serde(default, deserialize_with = "lenient")]
  pub tags: Option<Vec<String>>,
  #[serde(default, deserialize_with = "lenient")]
  pub duration: Option<String>,
  #[serde(default, deserialize_with = "lenient")]
  pub team: Option<Vec<String>>,
  #[serde(default, deserialize_with = "lenient")]
  pub status: Option<String>,
  #[serde(default, deserialize_with = "lenient")]
  pub visibility: Option<String>,
  #[serde(default, deserialize_with = "lenient")]
  pub featured: Option<bool>,
  #[serde(default, deserialize_with = "lenient")]
  pub live_url: Option<String>,
  #[serde(default, deserialize_with = "lenient")]
  pub github_url: Option<String>,
  #[serde(default, deserialize_with = "lenient")]
  pub behance_url: Option<String>,
  #[serde(default, deserialize_with = "lenient")]
  pub figma_url: Option<String>,
}

/// `None` when the value does not have the expected shape.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
  D: serde::Deserializer<'de>,
  T: DeserializeOwned,
{
  let value = serde_json::Value::deserialize(deserializer)?;
  Ok(T::deserialize(value).ok())
}

/// Like `lenient`, but numbers are kept as their decimal text.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
  D: serde::Deserializer<'de>,
{
  Ok(match serde_json::Value::deserialize(deserializer)? {
    serde_json::Value::String(s) => Some(s),
    serde_json::Value::Number(n) => Some(n.to_string()),
    _ => None,
  })
}

/// Query endpoint envelope; a missing `result` means no documents.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiQueryResponse {
  #[serde(default)]
  pub result: Vec<ApiProject>,
  pub ms: Option<u64>,
}

impl Resource for ApiQueryResponse {
  fn resource_name() -> &'static str {
    "projects"
  }
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_TITLE: &str = "Untitled Project";
pub const DEFAULT_CLIENT: &str = "Confidential Client";
pub const DEFAULT_DESCRIPTION: &str = "Description not available";
pub const DEFAULT_CHALLENGE: &str = "Challenge to be defined";
pub const DEFAULT_SOLUTION: &str = "Solution to be defined";
pub const DEFAULT_SERVICES: &[&str] = &["Web Development"];
pub const DEFAULT_TOOLS: &[&str] = &["React", "TypeScript"];
pub const DEFAULT_RESULTS: &[&str] = &["Project completed successfully"];
pub const DEFAULT_DURATION: &str = "3 months";
pub const DEFAULT_TEAM: &[&str] = &["Frontend Developer"];
pub const DEFAULT_STATUS: &str = "completed";
pub const DEFAULT_VISIBILITY: &str = "public";
pub const DEFAULT_STEP_DESCRIPTION: &str = "Process description";
pub const DEFAULT_PROCESS: &[(&str, &str)] = &[
  ("Analysis", "Initial project analysis"),
  ("Design", "Solution design"),
  ("Development", "Solution implementation"),
];

// ============================================================================
// Conversions to domain types
// ============================================================================

impl ApiProject {
  /// Map onto a fully-defaulted `Project`.
  ///
  /// `index` is the document's position in the fetched list and picks the
  /// layout when the document has none. `placeholder_image` stands in for a
  /// missing or unusable main image.
  pub fn into_project(
    self,
    index: usize,
    images: &ImageUrlBuilder,
    placeholder_image: &str,
  ) -> Project {
    let category = category::classify(
      non_empty(self.category.as_deref()).unwrap_or(MISSING_CATEGORY),
    )
    .to_string();

    let main_image = self.main_image.as_ref();
    let image = main_image
      .and_then(|img| images.url(img, &ImageParams::HERO))
      .unwrap_or_else(|| placeholder_image.to_string());
    let image_srcset = main_image.and_then(|img| images.srcset(img));
    let image_placeholder = main_image.and_then(|img| images.placeholder(img));

    let gallery = self
      .gallery
      .unwrap_or_default()
      .iter()
      .filter_map(|img| images.url(img, &ImageParams::GALLERY))
      .collect::<Vec<_>>();
    let gallery = if gallery.is_empty() {
      vec![image.clone()]
    } else {
      gallery
    };

    let process = match self.process.filter(|steps| !steps.is_empty()) {
      Some(steps) => steps
        .into_iter()
        .enumerate()
        .map(|(i, step)| ProcessStep {
          title: text_or(step.title, &format!("Step {}", i + 1)),
          description: text_or(step.description, DEFAULT_STEP_DESCRIPTION),
        })
        .collect(),
      None => DEFAULT_PROCESS
        .iter()
        .map(|(title, description)| ProcessStep {
          title: title.to_string(),
          description: description.to_string(),
        })
        .collect(),
    };

    let layout = self
      .layout
      .as_deref()
      .and_then(Layout::from_hint)
      .unwrap_or_else(|| Layout::for_index(index));

    let tags = list_or(self.tags, &[category.as_str()]);

    Project {
      id: self.id,
      title: text_or(self.title, DEFAULT_TITLE),
      year: text_or(self.year, &chrono::Utc::now().year().to_string()),
      client: text_or(self.client, DEFAULT_CLIENT),
      description: text_or(self.description, DEFAULT_DESCRIPTION),
      challenge: text_or(self.challenge, DEFAULT_CHALLENGE),
      solution: text_or(self.solution, DEFAULT_SOLUTION),
      image,
      image_srcset,
      image_placeholder,
      gallery,
      services: list_or(self.services, DEFAULT_SERVICES),
      tools: list_or(self.tools, DEFAULT_TOOLS),
      results: list_or(self.results, DEFAULT_RESULTS),
      process,
      layout,
      tags,
      category,
      duration: text_or(self.duration, DEFAULT_DURATION),
      team: list_or(self.team, DEFAULT_TEAM),
      status: text_or(self.status, DEFAULT_STATUS),
      visibility: text_or(self.visibility, DEFAULT_VISIBILITY),
      featured: self.featured.unwrap_or(false),
      live_url: non_empty_owned(self.live_url),
      github_url: non_empty_owned(self.github_url),
      behance_url: non_empty_owned(self.behance_url),
      figma_url: non_empty_owned(self.figma_url),
    }
  }
}

// ============================================================================
// Helpers
// ============================================================================

fn non_empty(value: Option<&str>) -> Option<&str> {
  value.filter(|v| !v.trim().is_empty())
}

fn non_empty_owned(value: Option<String>) -> Option<String> {
  value.filter(|v| !v.trim().is_empty())
}

/// The value itself, or `default` when missing or blank.
fn text_or(value: Option<String>, default: &str) -> String {
  non_empty_owned(value).unwrap_or_else(|| default.to_string())
}

/// The list itself, or `default` when missing or empty. Blank entries are dropped first.
fn list_or(value: Option<Vec<String>>, default: &[&str]) -> Vec<String> {
  let list: Vec<String> = value
    .unwrap_or_default()
    .into_iter()
    .filter(|item| !item.trim().is_empty())
    .collect();
  if list.is_empty() {
    default.iter().map(|s| s.to_string()).collect()
  } else {
    list
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::ContentConfig;

  const PLACEHOLDER: &str = "/placeholder-project.jpg";

  fn images() -> ImageUrlBuilder {
    ImageUrlBuilder::new(&ContentConfig::default())
  }

  fn bare(id: &str) -> ApiProject {
    ApiProject {
      id: id.to_string(),
      ..Default::default()
    }
  }

  #[test]
  fn test_bare_document_is_fully_defaulted() {
    let p = bare("p1").into_project(2, &images(), PLACEHOLDER);

    assert_eq!(p.id, "p1");
    assert_eq!(p.title, DEFAULT_TITLE);
    assert_eq!(p.category, category::UI_UX);
    assert_eq!(p.year, chrono::Utc::now().year().to_string());
    assert_eq!(p.client, DEFAULT_CLIENT);
    assert_eq!(p.description, DEFAULT_DESCRIPTION);
    assert_eq!(p.challenge, DEFAULT_CHALLENGE);
    assert_eq!(p.solution, DEFAULT_SOLUTION);
    assert_eq!(p.image, PLACEHOLDER);
    assert_eq!(p.image_srcset, None);
    assert_eq!(p.gallery, vec![PLACEHOLDER.to_string()]);
    assert_eq!(p.services, vec!["Web Development"]);
    assert_eq!(p.tools, vec!["React", "TypeScript"]);
    assert_eq!(p.results, vec!["Project completed successfully"]);
    assert_eq!(p.process.len(), 3);
    assert_eq!(p.process[0].title, "Analysis");
    assert_eq!(p.layout, Layout::Tall);
    assert_eq!(p.tags, vec![category::UI_UX]);
    assert_eq!(p.duration, DEFAULT_DURATION);
    assert_eq!(p.team, vec!["Frontend Developer"]);
    assert_eq!(p.status, DEFAULT_STATUS);
    assert_eq!(p.visibility, DEFAULT_VISIBILITY);
    assert!(!p.featured);
    assert_eq!(p.live_url, None);
  }

  #[test]
  fn test_layout_cycles_by_position() {
    let layouts: Vec<Layout> = (0..8)
      .map(|i| bare("p").into_project(i, &images(), PLACEHOLDER).layout)
      .collect();
    assert_eq!(
      layouts,
      vec![
        Layout::Wide,
        Layout::Square,
        Layout::Tall,
        Layout::Square,
        Layout::Wide,
        Layout::Tall,
        Layout::Wide,
        Layout::Square,
      ]
    );
  }

  #[test]
  fn test_layout_hint_wins_and_unknown_hint_is_ignored() {
    let mut doc = bare("p");
    doc.layout = Some("tall".into());
    assert_eq!(doc.into_project(0, &images(), PLACEHOLDER).layout, Layout::Tall);

    let mut doc = bare("p");
    doc.layout = Some("panorama".into());
    assert_eq!(doc.into_project(0, &images(), PLACEHOLDER).layout, Layout::Wide);
  }

  #[test]
  fn test_populated_document_keeps_values() {
    let doc: ApiProject = serde_json::from_str(
      r#"{
        "_id": "abc",
        "_type": "project",
        "title": "Checkout Redesign",
        "category": "full-stack",
        "year": "2023",
        "mainImage": {"_type": "image", "asset": {"_ref": "image-a1b2-800x600-png", "_type": "reference"}},
        "gallery": [
          {"asset": {"_ref": "image-c3d4-1200x800-jpg"}},
          {"asset": {"_ref": "not-an-image"}}
        ],
        "services": ["API design"],
        "tools": [],
        "process": [{"_key": "k1", "title": "", "description": "Interviews"}],
        "tags": ["payments"],
        "featured": true,
        "liveUrl": "https://shop.example.com",
        "githubUrl": ""
      }"#,
    )
    .unwrap();

    let p = doc.into_project(0, &images(), PLACEHOLDER);

    assert_eq!(p.title, "Checkout Redesign");
    assert_eq!(p.category, category::FULL_STACK);
    assert_eq!(p.year, "2023");
    assert!(p.image.contains("/a1b2-800x600.png?w=1920"));
    assert!(p.image_srcset.as_deref().unwrap().contains("400w"));
    assert!(p.image_placeholder.is_some());
    assert_eq!(p.gallery.len(), 1);
    assert!(p.gallery[0].contains("/c3d4-1200x800.jpg?w=1200"));
    assert_eq!(p.services, vec!["API design"]);
    // Empty list behaves like a missing one
    assert_eq!(p.tools, vec!["React", "TypeScript"]);
    assert_eq!(p.process[0].title, "Step 1");
    assert_eq!(p.process[0].description, "Interviews");
    assert_eq!(p.tags, vec!["payments"]);
    assert!(p.featured);
    assert_eq!(p.live_url.as_deref(), Some("https://shop.example.com"));
    assert_eq!(p.github_url, None);
  }

  #[test]
  fn test_unknown_category_falls_back() {
    let mut doc = bare("p");
    doc.category = Some("Game Dev".into());
    let p = doc.into_project(0, &images(), PLACEHOLDER);
    assert_eq!(p.category, category::FALLBACK_LABEL);
  }

  #[test]
  fn test_envelope_without_result_is_empty() {
    let resp: ApiQueryResponse = serde_json::from_str(r#"{"query": "*", "ms": 3}"#).unwrap();
    assert!(resp.result.is_empty());
    assert!(resp.check().is_ok());
  }

  #[test]
  fn test_mistyped_fields_fall_back_instead_of_failing_the_batch() {
    let resp: ApiQueryResponse = serde_json::from_str(
      r#"{"result": [
        {"_id": "a", "title": "Clean"},
        {"_id": "b", "year": 2024, "featured": "yes", "tools": "Rust", "title": 7, "mainImage": "x"}
      ]}"#,
    )
    .unwrap();
    assert_eq!(resp.result.len(), 2);

    let doc = resp.result[1].clone();
    assert_eq!(doc.year.as_deref(), Some("2024"));
    assert_eq!(doc.featured, None);
    assert_eq!(doc.tools, None);

    let p = doc.into_project(1, &images(), PLACEHOLDER);
    assert_eq!(p.year, "2024");
    assert!(!p.featured);
    assert_eq!(p.title, DEFAULT_TITLE);
    assert_eq!(p.tools, vec!["React", "TypeScript"]);
    assert_eq!(p.image, PLACEHOLDER);
  }

  #[test]
  fn test_null_fields_read_as_missing() {
    let doc: ApiProject =
      serde_json::from_str(r#"{"_id": "n", "year": null, "client": null}"#).unwrap();
    assert_eq!(doc.year, None);
    assert_eq!(doc.client, None);
  }
}
