//! Image attached to an article.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::schema::{self, Entity, Violation};

/// An image referenced by an article.
///
/// The URL is optional but must be well-formed when present; dimensions
/// are in pixels. The ID is stable enough to be used as a key in a
/// storage system.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Image {
    /// Unique identifier of the image.
    #[serde(default)]
    pub id: String,

    /// Source URL of the image.
    #[serde(default)]
    pub url: String,

    /// Alternative text.
    #[serde(default)]
    pub alt: String,

    /// Caption shown alongside the image.
    #[serde(default)]
    pub caption: String,

    /// Width in pixels.
    #[serde(default)]
    pub width: u32,

    /// Height in pixels.
    #[serde(default)]
    pub height: u32,
}

impl Image {
    /// Create a new image with a generated ID.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            url: url.into(),
            ..Self::default()
        }
    }
}

impl Entity for Image {
    const KIND: &'static str = "image";

    fn id(&self) -> &str {
        &self.id
    }

    fn ensure_id(&mut self) {
        if self.id.is_empty() {
            self.id = Uuid::new_v4().to_string();
        }
    }

    fn trim(&mut self) {
        self.id = schema::trim_to_max(&self.id, 36);
        self.url = schema::trim_to_max(&self.url, 4096);
        self.alt = schema::trim_to_max(&self.alt, 255);
        self.caption = schema::trim_to_max(&self.caption, 500);
    }

    fn violations(&self) -> Vec<Violation> {
        let mut out = Vec::new();
        schema::required("image.id", &self.id, &mut out);
        schema::max_len("image.id", &self.id, 36, &mut out);
        schema::valid_url("image.url", &self.url, &mut out);
        schema::max_len("image.url", &self.url, 4096, &mut out);
        schema::max_len("image.alt", &self.alt, 255, &mut out);
        schema::max_len("image.caption", &self.caption, 500, &mut out);
        out
    }

    fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_generates_id() {
        let image = Image::new("https://example.com/a.jpg");
        assert!(!image.id.is_empty());
        assert!(Uuid::parse_str(&image.id).is_ok());
    }

    #[test]
    fn test_normalize_trims_fields() {
        let mut image = Image::new("  https://example.com/a.jpg  ");
        image.alt = "  An illustration  ".to_string();
        image.normalize();

        assert_eq!(image.url, "https://example.com/a.jpg");
        assert_eq!(image.alt, "An illustration");
    }

    #[test]
    fn test_normalize_generates_missing_id() {
        let mut image = Image {
            url: "https://example.com/a.jpg".to_string(),
            ..Image::default()
        };
        image.normalize();
        assert!(!image.id.is_empty());
    }

    #[test]
    fn test_normalize_clears_invalid_entity() {
        let mut image = Image::new("invalid-url");
        image.normalize();
        assert_eq!(image, Image::default());
    }

    #[test]
    fn test_empty_url_is_valid() {
        let image = Image::new("");
        assert!(image.is_valid());
    }
}
