use serde::Serialize;

/// Display-ready testimonial
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Testimonial {
  pub id: String,
  pub name: String,
  pub position: String,
  pub comment: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub linkedin: Option<String>,
  pub initials: String,
  pub avatar_color: String,
}
