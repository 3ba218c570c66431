//! Classification of free-text backend categories into display labels.

pub const UI_UX: &str = "UI UX";
pub const FRONTEND: &str = "Frontend";
pub const BACKEND: &str = "Backend";
pub const FULL_STACK: &str = "FullStack";
pub const APP: &str = "App";

/// Assumed when a document has no category at all.
pub const MISSING_CATEGORY: &str = "ui-ux-design";

/// Label for categories not in the table.
pub const FALLBACK_LABEL: &str = FRONTEND;

const CATEGORY_TABLE: &[(&str, &str)] = &[
  ("ui-ux-design", UI_UX),
  ("ui-ux", UI_UX),
  ("ux-ui", UI_UX),
  ("web-development", FRONTEND),
  ("frontend", FRONTEND),
  ("react", FRONTEND),
  ("backend", BACKEND),
  ("node", BACKEND),
  ("nodejs", BACKEND),
  ("fullstack", FULL_STACK),
  ("full-stack", FULL_STACK),
  ("app", APP),
  ("mobile", APP),
  ("mobile-app", APP),
];

/// Map a backend category slug to its label, case- and whitespace-insensitive.
pub fn classify(raw: &str) -> &'static str {
  let normalized = raw.trim().to_lowercase();
  CATEGORY_TABLE
    .iter()
    .find(|(slug, _)| *slug == normalized)
    .map(|(_, label)| *label)
    .unwrap_or(FALLBACK_LABEL)
}
