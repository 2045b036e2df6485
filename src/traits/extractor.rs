//! Extractor trait for pluggable content sources.
//!
//! The merge in [`pipeline::merge`](crate::pipeline::merge) consumes two
//! independent implementations against the same markup: a readability-style
//! source for body content and a distiller-style source for page metadata.
//! Extractors are pure in-memory transforms: no fetching, no blocking I/O.
//! A failing source is never fatal to the merge.

use chrono::{DateTime, Utc};
use url::Url;

use crate::error::ExtractorError;

/// Field set produced by one extraction source.
///
/// Every field is optional; `None` means "no data from this source". Which
/// fields a source is expected to fill depends on its role in the merge:
/// content sources supply text, markup and language, metadata sources
/// supply category, site name and images.
#[derive(Debug, Clone, Default)]
pub struct Extracted {
    /// Page or article title.
    pub title: Option<String>,

    /// Short description or excerpt.
    pub excerpt: Option<String>,

    /// Plain text content.
    pub text: Option<String>,

    /// Cleaned body markup.
    pub markup: Option<String>,

    /// Detected content language.
    pub language: Option<String>,

    /// Publication timestamp, when the source found one.
    pub published: Option<DateTime<Utc>>,

    /// Author byline.
    pub author: Option<String>,

    /// Editorial category or section.
    pub category: Option<String>,

    /// Publisher or site name.
    pub site_name: Option<String>,

    /// Images found in the page, URLs possibly still relative.
    pub images: Vec<ExtractedImage>,
}

impl Extracted {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the excerpt.
    pub fn with_excerpt(mut self, excerpt: impl Into<String>) -> Self {
        self.excerpt = Some(excerpt.into());
        self
    }

    /// Set the plain text content.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Set the body markup.
    pub fn with_markup(mut self, markup: impl Into<String>) -> Self {
        self.markup = Some(markup.into());
        self
    }

    /// Set the language.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Set the publication timestamp.
    pub fn with_published(mut self, published: DateTime<Utc>) -> Self {
        self.published = Some(published);
        self
    }

    /// Set the author byline.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Set the category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Set the site name.
    pub fn with_site_name(mut self, site_name: impl Into<String>) -> Self {
        self.site_name = Some(site_name.into());
        self
    }

    /// Add an image.
    pub fn with_image(mut self, url: impl Into<String>, width: u32, height: u32) -> Self {
        self.images.push(ExtractedImage {
            url: url.into(),
            width,
            height,
        });
        self
    }
}

/// An image reference as reported by an extraction source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedImage {
    /// Image URL, relative or absolute.
    pub url: String,

    /// Width in pixels, zero when unknown.
    pub width: u32,

    /// Height in pixels, zero when unknown.
    pub height: u32,
}

/// A single extraction source.
///
/// Implementations wrap concrete engines (readability ports, DOM
/// distillers, site-specific scrapers). Errors are treated as "no data
/// from this source" by the merge, never as pipeline failures.
pub trait Extractor {
    /// Extract whatever this source understands from the markup.
    fn extract(&self, html: &str, base: &Url) -> Result<Extracted, ExtractorError>;

    /// Source name for diagnostics.
    fn name(&self) -> &str {
        "unknown"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracted_builder() {
        let found = Extracted::new()
            .with_title("Title")
            .with_text("Body")
            .with_language("en")
            .with_image("/img/a.jpg", 800, 600);

        assert_eq!(found.title.as_deref(), Some("Title"));
        assert_eq!(found.text.as_deref(), Some("Body"));
        assert_eq!(found.language.as_deref(), Some("en"));
        assert_eq!(found.images.len(), 1);
        assert_eq!(found.images[0].url, "/img/a.jpg");
        assert!(found.category.is_none());
    }
}
