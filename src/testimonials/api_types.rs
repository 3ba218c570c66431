//! Serde-deserializable types matching the testimonials endpoint.

use serde::Deserialize;

use crate::cache::Resource;
use crate::http::FetchError;

/// Literal the backend uses for "field intentionally left blank".
pub const SENTINEL: &str = "-";

/// One testimonial exactly as the backend sends it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiTestimonial {
  #[serde(rename = "nombre_completo", default)]
  pub full_name: Option<String>,
  #[serde(default)]
  pub area: Option<String>,
  #[serde(rename = "linkedin", default)]
  pub linkedin_url: Option<String>,
  #[serde(rename = "comentario", default)]
  pub comment: Option<String>,
}

/// `{ status, data, message? }` envelope.
///
/// Anything but `"success"` in `status` is a failure, whatever the HTTP code.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiTestimonialsResponse {
  pub status: String,
  #[serde(default)]
  pub data: Vec<ApiTestimonial>,
  pub message: Option<String>,
}

impl Resource for ApiTestimonialsResponse {
  fn resource_name() -> &'static str {
    "testimonials"
  }

  fn check(&self) -> Result<(), FetchError> {
    if self.status == "success" {
      return Ok(());
    }
    Err(FetchError::Application(
      self
        .message
        .clone()
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| "API returned error status".to_string()),
    ))
  }
}
