use serde::Serialize;

/// Grid cell shape for a project card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
  Wide,
  Tall,
  Square,
}

impl Layout {
  /// Cycle used for projects without a layout of their own.
  pub const PATTERN: [Layout; 6] = [
    Layout::Wide,
    Layout::Square,
    Layout::Tall,
    Layout::Square,
    Layout::Wide,
    Layout::Tall,
  ];

  /// Layout for the project at `index` in the fetched list.
  pub fn for_index(index: usize) -> Self {
    Self::PATTERN[index % Self::PATTERN.len()]
  }

  /// Parse a backend layout hint; unknown values are treated as no hint.
  pub fn from_hint(hint: &str) -> Option<Self> {
    match hint.trim().to_lowercase().as_str() {
      "wide" => Some(Layout::Wide),
      "tall" => Some(Layout::Tall),
      "square" => Some(Layout::Square),
      _ => None,
    }
  }
}

/// One step of the work process shown on a project page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessStep {
  pub title: String,
  pub description: String,
}

/// Fully-defaulted project
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Project {
  pub id: String,
  pub title: String,
  pub category: String,
  pub year: String,
  pub client: String,
  pub description: String,
  pub challenge: String,
  pub solution: String,
  pub image: String,
  /// Responsive `srcset` for the main image
  #[serde(skip_serializing_if = "Option::is_none")]
  pub image_srcset: Option<String>,
  /// Tiny blurred variant of the main image
  #[serde(skip_serializing_if = "Option::is_none")]
  pub image_placeholder: Option<String>,
  pub gallery: Vec<String>,
  pub services: Vec<String>,
  pub tools: Vec<String>,
  pub results: Vec<String>,
  pub process: Vec<ProcessStep>,
  pub layout: Layout,
  pub tags: Vec<String>,
  pub duration: String,
  pub team: Vec<String>,
  pub status: String,
  pub visibility: String,
  pub featured: bool,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub live_url: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub github_url: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub behance_url: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub figma_url: Option<String>,
}
