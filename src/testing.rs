//! Test fixtures and mock sources.
//!
//! Kept in the library proper so integration tests and downstream crates
//! can reuse the same known-valid entities instead of rebuilding them.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use url::Url;
use uuid::Uuid;

use crate::error::ExtractorError;
use crate::traits::extractor::{Extracted, Extractor};
use crate::types::article::Article;
use crate::types::image::Image;
use crate::types::quote::Quote;
use crate::types::social::Social;
use crate::types::video::Video;

/// An extraction source with a canned response.
#[derive(Debug, Clone, Default)]
pub struct MockExtractor {
    name: &'static str,
    response: Option<Extracted>,
}

impl MockExtractor {
    pub fn new(name: &'static str) -> Self {
        MockExtractor {
            name,
            response: None,
        }
    }

    /// Return this extraction for every call.
    pub fn returning(mut self, extracted: Extracted) -> Self {
        self.response = Some(extracted);
        self
    }

    /// Fail every call with [`ExtractorError::NoContent`].
    pub fn failing(mut self) -> Self {
        self.response = None;
        self
    }
}

impl Extractor for MockExtractor {
    fn extract(&self, _html: &str, _base: &Url) -> Result<Extracted, ExtractorError> {
        match &self.response {
            Some(extracted) => Ok(extracted.clone()),
            None => Err(ExtractorError::NoContent),
        }
    }

    fn name(&self) -> &str {
        self.name
    }
}

fn fixed_published() -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339("2024-05-28T10:00:00+00:00")
        .ok()
        .map(|time| time.with_timezone(&Utc))
}

/// A fully-populated article that passes every schema rule and is stable
/// under normalization.
pub fn valid_article() -> Article {
    Article {
        id: Uuid::new_v4().to_string(),
        genre: "Article".to_string(),
        category: "General".to_string(),
        author: "Jane Smith".to_string(),
        title: "Top Places in Phuket".to_string(),
        summary: "A short tour of the island's best-known spots.".to_string(),
        markup: "<p>Phuket is a buzzing island destination.</p>".to_string(),
        text: "Phuket is a buzzing island destination.".to_string(),
        source_url: "https://news.example.com/story/phuket".to_string(),
        source_name: "Example News".to_string(),
        language: "en".to_string(),
        published: fixed_published(),
        modified: None,
        images: Default::default(),
        videos: Default::default(),
        quotes: Default::default(),
        socials: Default::default(),
        tags: Default::default(),
    }
}

pub fn valid_image() -> Image {
    Image {
        alt: "Patong beach at sunset".to_string(),
        caption: "Patong beach".to_string(),
        width: 1280,
        height: 720,
        ..Image::new(format!("https://cdn.example.com/images/{}.jpg", Uuid::new_v4()))
    }
}

/// An image that fails its schema (the URL is present but malformed).
pub fn invalid_image() -> Image {
    Image::new("not a url")
}

pub fn valid_video() -> Video {
    Video {
        title: "Island overview".to_string(),
        embed: "<iframe src=\"https://videos.example.com/embed/v1\"></iframe>".to_string(),
        ..Video::new("https://videos.example.com/v1.mp4")
    }
}

pub fn valid_quote() -> Quote {
    Quote {
        author: "Jane Smith".to_string(),
        platform: "Twitter".to_string(),
        ..Quote::new("The island never sleeps.")
    }
}

pub fn valid_social() -> Social {
    Social::new("Twitter", "https://twitter.com/janesmith")
}

/// `n` distinct image URLs under the given domain.
pub fn image_urls(domain: &str, n: usize) -> Vec<String> {
    (0..n)
        .map(|_| format!("https://{domain}/images/{}.jpg", Uuid::new_v4()))
        .collect()
}

/// A remap table of `n` entries from `old.com` URLs to `new.com` URLs.
pub fn remap_table(n: usize) -> HashMap<String, String> {
    image_urls("old.com", n)
        .into_iter()
        .map(|source| {
            let stored = format!("https://new.com/stored/{}.jpg", Uuid::new_v4());
            (source, stored)
        })
        .collect()
}

/// Attach one valid image per URL to the article.
pub fn with_images(article: &mut Article, urls: Vec<String>) {
    article.images.add(urls.into_iter().map(Image::new));
}
