//! Filtering and mapping of raw testimonials into display models.

use crate::http::FetchError;

use super::api_types::{ApiTestimonial, SENTINEL};
use super::types::Testimonial;

/// Avatar background classes, assigned in order.
pub const AVATAR_PALETTE: [&str; 20] = [
  "bg-blue-600",
  "bg-green-600",
  "bg-purple-600",
  "bg-pink-600",
  "bg-indigo-600",
  "bg-yellow-500",
  "bg-red-600",
  "bg-teal-600",
  "bg-orange-500",
  "bg-cyan-600",
  "bg-emerald-600",
  "bg-violet-600",
  "bg-fuchsia-600",
  "bg-rose-600",
  "bg-sky-600",
  "bg-lime-600",
  "bg-amber-500",
  "bg-blue-500",
  "bg-green-500",
  "bg-purple-500",
];

/// Position shown when the backend has none.
pub const DEFAULT_POSITION: &str = "Collaborator";

/// Names containing this marker are seed/test rows, never real testimonials.
const TEST_DATA_MARKER: &str = "prueba";

/// Normalize a batch, keeping the original relative order.
///
/// An empty result is an error: a batch where nothing survives filtering is
/// not the same thing as a backend with no testimonials.
pub fn normalize(records: &[ApiTestimonial]) -> Result<Vec<Testimonial>, FetchError> {
  let testimonials: Vec<Testimonial> = records
    .iter()
    .filter_map(Valid::from_api)
    .enumerate()
    .map(|(index, valid)| valid.into_testimonial(index))
    .collect();

  if testimonials.is_empty() {
    return Err(FetchError::NoValidRecords("testimonials"));
  }
  Ok(testimonials)
}

/// A record that passed filtering, fields still raw.
struct Valid<'a> {
  raw_name: &'a str,
  name: &'a str,
  comment: &'a str,
  area: Option<&'a str>,
  linkedin: Option<&'a str>,
}

impl<'a> Valid<'a> {
  fn from_api(record: &'a ApiTestimonial) -> Option<Self> {
    let raw_name = record.full_name.as_deref()?;
    let name = raw_name.trim();
    let comment = record.comment.as_deref()?.trim();

    if name.is_empty() || comment.is_empty() || is_test_data(name) {
      return None;
    }

    Some(Self {
      raw_name,
      name,
      comment,
      area: present(record.area.as_deref()),
      linkedin: present(record.linkedin_url.as_deref()),
    })
  }

  fn into_testimonial(self, index: usize) -> Testimonial {
    Testimonial {
      id: format!("testimonial-{}", index + 1),
      name: self.name.to_string(),
      position: self
        .area
        .map(|a| a.trim().to_string())
        .unwrap_or_else(|| DEFAULT_POSITION.to_string()),
      comment: self.comment.to_string(),
      linkedin: self.linkedin.map(String::from),
      initials: initials(self.raw_name),
      avatar_color: avatar_color(self.raw_name, index).to_string(),
    }
  }
}

/// Drop missing, empty and sentinel values.
fn present(value: Option<&str>) -> Option<&str> {
  value.filter(|v| !v.is_empty() && *v != SENTINEL)
}

fn is_test_data(name: &str) -> bool {
  name.to_lowercase().contains(TEST_DATA_MARKER)
}

/// First letter of the first two words, uppercased.
pub fn initials(name: &str) -> String {
  name
    .split_whitespace()
    .filter_map(|word| word.chars().next())
    .flat_map(char::to_uppercase)
    .take(2)
    .collect()
}

/// Palette colour for the testimonial at `index`.
///
/// Inside the palette every position gets its own colour. Past the end the
/// colour is a hash of the name, stable across reloads but free to repeat a
/// colour already in use.
pub fn avatar_color(name: &str, index: usize) -> &'static str {
  if index < AVATAR_PALETTE.len() {
    return AVATAR_PALETTE[index];
  }
  AVATAR_PALETTE[name_hash(name) as usize % AVATAR_PALETTE.len()]
}

/// Sum of the UTF-16 code units of `name`.
fn name_hash(name: &str) -> u64 {
  name.encode_utf16().map(u64::from).sum()
}

#[cfg(test)]
mod tests {
  use super::*;

  fn raw(name: &str, area: &str, linkedin: &str, comment: &str) -> ApiTestimonial {
    ApiTestimonial {
      full_name: Some(name.to_string()),
      area: Some(area.to_string()),
      linkedin_url: Some(linkedin.to_string()),
      comment: Some(comment.to_string()),
    }
  }

  #[test]
  fn test_filters_invalid_and_test_rows_in_order() {
    let batch = vec![
      raw("Laura Gómez", "Product", "-", "Excellent work"),
      raw("Pedro Soto", "QA", "-", "   "),
      raw("Usuario PRUEBA", "QA", "-", "testing"),
      raw("Marta Díaz", "-", "https://linkedin.com/in/marta", "Very reliable"),
    ];

    let out = normalize(&batch).unwrap();

    assert_eq!(out.len(), 2);
    assert_eq!(out[0].name, "Laura Gómez");
    assert_eq!(out[0].id, "testimonial-1");
    assert_eq!(out[1].name, "Marta Díaz");
    assert_eq!(out[1].id, "testimonial-2");
  }

  #[test]
  fn test_missing_name_or_comment_is_dropped() {
    let batch = vec![
      ApiTestimonial {
        full_name: None,
        comment: Some("orphan comment".into()),
        ..Default::default()
      },
      ApiTestimonial {
        full_name: Some("No Comment".into()),
        comment: None,
        ..Default::default()
      },
      raw("Kept Person", "-", "-", "ok"),
    ];

    let out = normalize(&batch).unwrap();
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].name, "Kept Person");
  }

  #[test]
  fn test_sentinel_fields() {
    let out = normalize(&[
      raw("Ana Ruiz", "-", "-", "Great"),
      raw("Luis Mora", "  Tech Lead ", "https://linkedin.com/in/luis", "Solid"),
    ])
    .unwrap();

    assert_eq!(out[0].position, DEFAULT_POSITION);
    assert_eq!(out[0].linkedin, None);
    assert_eq!(out[1].position, "Tech Lead");
    assert_eq!(
      out[1].linkedin.as_deref(),
      Some("https://linkedin.com/in/luis")
    );
  }

  #[test]
  fn test_name_and_comment_are_trimmed() {
    let out = normalize(&[raw("  Ana Ruiz ", "-", "-", "\tGreat\n")]).unwrap();
    assert_eq!(out[0].name, "Ana Ruiz");
    assert_eq!(out[0].comment, "Great");
    assert_eq!(out[0].initials, "AR");
  }

  #[test]
  fn test_all_filtered_is_error() {
    let err = normalize(&[raw("prueba", "-", "-", "x"), raw("Ana", "-", "-", "")]).unwrap_err();
    assert_eq!(err, FetchError::NoValidRecords("testimonials"));

    assert!(normalize(&[]).is_err());
  }

  #[test]
  fn test_initials() {
    assert_eq!(initials("ana maría ruiz"), "AM");
    assert_eq!(initials("Cher"), "C");
    assert_eq!(initials("  double   space "), "DS");
    assert_eq!(initials(""), "");
  }

  #[test]
  fn test_colors_follow_palette_then_hash() {
    let batch: Vec<ApiTestimonial> = (0..22)
      .map(|i| raw(&format!("Person {}", i), "-", "-", "ok"))
      .collect();

    let out = normalize(&batch).unwrap();

    for (i, t) in out.iter().take(AVATAR_PALETTE.len()).enumerate() {
      assert_eq!(t.avatar_color, AVATAR_PALETTE[i]);
    }
    let name = &out[21].name;
    let expected = AVATAR_PALETTE[name_hash(name) as usize % AVATAR_PALETTE.len()];
    assert_eq!(out[21].avatar_color, expected);
  }

  #[test]
  fn test_color_is_deterministic() {
    let batch = vec![raw("Ana Ruiz", "-", "-", "Great")];
    let first = normalize(&batch).unwrap();
    let second = normalize(&batch).unwrap();
    assert_eq!(first[0].avatar_color, second[0].avatar_color);

    assert_eq!(avatar_color("Ana Ruiz", 40), avatar_color("Ana Ruiz", 99));
  }

  #[test]
  fn test_hash_fallback_can_repeat_colors() {
    // "ab" and "ba" have the same code-unit sum
    assert_eq!(avatar_color("ab", 25), avatar_color("ba", 30));
  }
}
