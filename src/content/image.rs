//! CDN URLs for image assets referenced by project documents.
//!
//! Asset references look like `image-<hex id>-<width>x<height>-<ext>` and map
//! to `{cdn}/{project}/{dataset}/<hex id>-<width>x<height>.<ext>` plus
//! optional transformation parameters.

use crate::config::ContentConfig;

use super::api_types::ApiImage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
  Jpg,
  Png,
  Webp,
  Auto,
}

impl ImageFormat {
  fn as_str(self) -> &'static str {
    match self {
      ImageFormat::Jpg => "jpg",
      ImageFormat::Png => "png",
      ImageFormat::Webp => "webp",
      ImageFormat::Auto => "auto",
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fit {
  Clip,
  Crop,
  Fill,
  FillMax,
  Max,
  Scale,
  Min,
}

impl Fit {
  fn as_str(self) -> &'static str {
    match self {
      Fit::Clip => "clip",
      Fit::Crop => "crop",
      Fit::Fill => "fill",
      Fit::FillMax => "fillmax",
      Fit::Max => "max",
      Fit::Scale => "scale",
      Fit::Min => "min",
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CropAnchor {
  Top,
  Bottom,
  Left,
  Right,
  Center,
  FocalPoint,
}

impl CropAnchor {
  fn as_str(self) -> &'static str {
    match self {
      CropAnchor::Top => "top",
      CropAnchor::Bottom => "bottom",
      CropAnchor::Left => "left",
      CropAnchor::Right => "right",
      CropAnchor::Center => "center",
      CropAnchor::FocalPoint => "focalpoint",
    }
  }
}

/// Transformation parameters; `None` fields are left out of the URL.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImageParams {
  pub width: Option<u32>,
  pub height: Option<u32>,
  /// Clamped to 1..=100
  pub quality: Option<u32>,
  pub format: Option<ImageFormat>,
  pub fit: Option<Fit>,
  pub crop: Option<CropAnchor>,
  /// Clamped to 0..=2000
  pub blur: Option<u32>,
  /// Clamped to 0..=100
  pub sharpen: Option<u32>,
}

const fn preset(width: u32, height: u32, quality: u32) -> ImageParams {
  ImageParams {
    width: Some(width),
    height: Some(height),
    quality: Some(quality),
    format: Some(ImageFormat::Webp),
    fit: Some(Fit::Crop),
    crop: None,
    blur: None,
    sharpen: None,
  }
}

impl ImageParams {
  pub const HERO: ImageParams = preset(1920, 1080, 90);
  pub const CARD: ImageParams = preset(800, 600, 85);
  pub const THUMBNAIL: ImageParams = preset(400, 300, 80);
  pub const GALLERY: ImageParams = preset(1200, 800, 85);
  pub const AVATAR: ImageParams = ImageParams {
    crop: Some(CropAnchor::Center),
    ..preset(200, 200, 85)
  };

  fn query(&self) -> Vec<String> {
    let mut q = Vec::new();
    if let Some(w) = self.width.filter(|w| *w > 0) {
      q.push(format!("w={}", w));
    }
    if let Some(h) = self.height.filter(|h| *h > 0) {
      q.push(format!("h={}", h));
    }
    if let Some(quality) = self.quality.filter(|v| *v > 0) {
      q.push(format!("q={}", quality.clamp(1, 100)));
    }
    if let Some(format) = self.format {
      q.push(format!("fm={}", format.as_str()));
    }
    if let Some(fit) = self.fit {
      q.push(format!("fit={}", fit.as_str()));
    }
    if let Some(crop) = self.crop {
      q.push(format!("crop={}", crop.as_str()));
    }
    if let Some(blur) = self.blur.filter(|v| *v > 0) {
      q.push(format!("blur={}", blur.min(2000)));
    }
    if let Some(sharpen) = self.sharpen.filter(|v| *v > 0) {
      q.push(format!("sharp={}", sharpen.min(100)));
    }
    q
  }
}

/// Widths used for responsive `srcset` attributes.
pub const RESPONSIVE_WIDTHS: [u32; 4] = [400, 800, 1200, 1600];

/// Parsed asset reference.
#[derive(Debug, Clone, PartialEq, Eq)]
struct AssetRef<'a> {
  id: &'a str,
  dimensions: &'a str,
  extension: &'a str,
}

impl<'a> AssetRef<'a> {
  fn parse(reference: &'a str) -> Option<Self> {
    let rest = reference.strip_prefix("image-")?;
    let mut parts = rest.splitn(3, '-');
    let (id, dimensions, extension) = (parts.next()?, parts.next()?, parts.next()?);

    let valid_id = !id.is_empty() && id.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f'));
    let valid_dims = dimensions
      .split_once('x')
      .map(|(w, h)| is_digits(w) && is_digits(h))
      .unwrap_or(false);
    let valid_ext = !extension.is_empty() && extension.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');

    (valid_id && valid_dims && valid_ext).then_some(Self {
      id,
      dimensions,
      extension,
    })
  }
}

fn is_digits(s: &str) -> bool {
  !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

/// Builds image URLs for one project/dataset.
#[derive(Debug, Clone)]
pub struct ImageUrlBuilder {
  base: String,
}

impl ImageUrlBuilder {
  pub fn new(config: &ContentConfig) -> Self {
    Self {
      base: format!(
        "{}/{}/{}",
        config.image_cdn_url.trim_end_matches('/'),
        config.project_id,
        config.dataset
      ),
    }
  }

  /// URL for an asset reference, `None` when the reference is malformed.
  pub fn url_for_ref(&self, reference: &str, params: &ImageParams) -> Option<String> {
    let Some(asset) = AssetRef::parse(reference) else {
      tracing::warn!(reference, "invalid image reference");
      return None;
    };

    let mut url = format!(
      "{}/{}-{}.{}",
      self.base, asset.id, asset.dimensions, asset.extension
    );
    let query = params.query();
    if !query.is_empty() {
      url.push('?');
      url.push_str(&query.join("&"));
    }
    Some(url)
  }

  pub fn url(&self, image: &ApiImage, params: &ImageParams) -> Option<String> {
    let reference = image.asset.as_ref()?.reference.as_deref()?;
    self.url_for_ref(reference, params)
  }

  /// `srcset` value with one webp crop per responsive width.
  pub fn srcset(&self, image: &ApiImage) -> Option<String> {
    let entries: Vec<String> = RESPONSIVE_WIDTHS
      .iter()
      .map(|&width| {
        let params = ImageParams {
          width: Some(width),
          quality: Some(85),
          format: Some(ImageFormat::Webp),
          fit: Some(Fit::Crop),
          ..ImageParams::default()
        };
        self
          .url(image, &params)
          .map(|url| format!("{} {}w", url, width))
      })
      .collect::<Option<_>>()?;
    Some(entries.join(", "))
  }

  /// Tiny blurred variant used while the real image loads.
  pub fn placeholder(&self, image: &ApiImage) -> Option<String> {
    let params = ImageParams {
      width: Some(20),
      height: Some(20),
      blur: Some(50),
      quality: Some(20),
      format: Some(ImageFormat::Webp),
      ..ImageParams::default()
    };
    self.url(image, &params)
  }
}
