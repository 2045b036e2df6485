//! The Article aggregate root.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::collection::Collection;
use crate::error::{ArticleError, Result};
use crate::schema::{self, Entity, Violation};
use crate::types::tags::Tags;
use crate::types::{Images, Quotes, Socials, Videos};

/// A news article with its owned media, quotes, tags and social links.
///
/// This is the canonical aggregate the pipeline produces: scalar content
/// fields plus one validated collection per child entity kind. An article
/// is built either empty ([`Article::new`]), from untrusted input (the Map
/// form in [`codec`](crate::codec)), or by merging extraction sources
/// ([`from_html`](crate::pipeline::merge::from_html)).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Article {
    /// Unique identifier, UUID-shaped.
    #[serde(default)]
    pub id: String,

    /// Genre of the article, e.g. news, opinion, review.
    #[serde(default)]
    pub genre: String,

    /// Editorial category or section.
    #[serde(default)]
    pub category: String,

    /// Author byline.
    #[serde(default)]
    pub author: String,

    /// Title of the article.
    #[serde(default)]
    pub title: String,

    /// Short description of the article.
    #[serde(default)]
    pub summary: String,

    /// Raw HTML or Markdown content.
    #[serde(default)]
    pub markup: String,

    /// Plain text content.
    #[serde(default)]
    pub text: String,

    /// URL the article was taken from.
    #[serde(default)]
    pub source_url: String,

    /// Name of the publishing resource, e.g. Washington Post.
    #[serde(default)]
    pub source_name: String,

    /// Content language; defaults to "en" during normalization.
    #[serde(default)]
    pub language: String,

    /// Publication timestamp; required after normalization.
    #[serde(default)]
    pub published: Option<DateTime<Utc>>,

    /// Last modification timestamp.
    #[serde(default)]
    pub modified: Option<DateTime<Utc>>,

    #[serde(default)]
    pub images: Images,

    #[serde(default)]
    pub videos: Videos,

    #[serde(default)]
    pub quotes: Quotes,

    #[serde(default)]
    pub socials: Socials,

    #[serde(default)]
    pub tags: Tags,
}

impl Article {
    /// Create an empty article with a generated ID and empty children.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            ..Self::default()
        }
    }

    /// Normalize the article and cascade into every child collection.
    ///
    /// Four fixed phases, none branching backward:
    ///
    /// 1. every bounded string is trimmed, then truncated to its character
    ///    bound;
    /// 2. fallback defaults fill fields that are still empty (language
    ///    "en", category "General", genre "Article", published now) —
    ///    a present value is never overwritten;
    /// 3. the schema runs: a violation on a required field aborts with
    ///    [`ArticleError::Validation`], leaving the article partially
    ///    mutated; violations on optional fields clear just those fields
    ///    after emitting a diagnostic;
    /// 4. child collections normalize unconditionally.
    pub fn normalize(&mut self) -> Result<()> {
        Entity::trim(self);

        if self.language.is_empty() {
            self.language = "en".to_string();
        }
        if self.category.is_empty() {
            self.category = "General".to_string();
        }
        if self.genre.is_empty() {
            self.genre = "Article".to_string();
        }
        if self.published.is_none() {
            self.published = Some(Utc::now());
        }

        let violations = self.violations();
        if violations.iter().any(Violation::is_fatal) {
            return Err(ArticleError::Validation(violations.into()));
        }
        for violation in &violations {
            tracing::debug!(field = violation.field, rule = %violation.rule, "validation error");
            self.clear_field(violation.field);
        }

        self.images.normalize();
        self.videos.normalize();
        self.quotes.normalize();
        self.socials.normalize();

        Ok(())
    }

    /// Reset a single field to its empty value.
    fn clear_field(&mut self, field: &'static str) {
        match field {
            "article.id" => self.id.clear(),
            "article.title" => self.title.clear(),
            "article.summary" => self.summary.clear(),
            "article.markup" => self.markup.clear(),
            "article.text" => self.text.clear(),
            "article.genre" => self.genre.clear(),
            "article.category" => self.category.clear(),
            "article.author" => self.author.clear(),
            "article.source_url" => self.source_url.clear(),
            "article.source_name" => self.source_name.clear(),
            "article.language" => self.language.clear(),
            "article.published" => self.published = None,
            "article.modified" => self.modified = None,
            _ => {}
        }
    }
}

impl Entity for Article {
    const KIND: &'static str = "article";

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
        self.genre = schema::trim_to_max(&self.genre, 500);
        self.category = schema::trim_to_max(&self.category, 255);
        self.author = schema::trim_to_max(&self.author, 255);
        self.title = schema::trim_to_max(&self.title, 255);
        self.summary = schema::trim_to_max(&self.summary, 500);
        self.markup = schema::trim_to_max(&self.markup, 65000);
        self.text = schema::trim_to_max(&self.text, 65000);
        self.source_url = schema::trim_to_max(&self.source_url, 4096);
        self.source_name = schema::trim_to_max(&self.source_name, 255);
        self.language = schema::trim_to_max(&self.language, 255);
    }

    fn violations(&self) -> Vec<Violation> {
        let mut out = Vec::new();
        schema::required("article.id", &self.id, &mut out);
        schema::valid_uuid("article.id", &self.id, &mut out);
        schema::max_len("article.id", &self.id, 36, &mut out);
        schema::required("article.title", &self.title, &mut out);
        schema::max_len("article.title", &self.title, 255, &mut out);
        schema::max_len("article.summary", &self.summary, 500, &mut out);
        schema::required("article.markup", &self.markup, &mut out);
        schema::max_len("article.markup", &self.markup, 65000, &mut out);
        schema::required("article.text", &self.text, &mut out);
        schema::max_len("article.text", &self.text, 65000, &mut out);
        schema::max_len("article.genre", &self.genre, 500, &mut out);
        schema::max_len("article.category", &self.category, 255, &mut out);
        schema::max_len("article.author", &self.author, 255, &mut out);
        schema::valid_url("article.source_url", &self.source_url, &mut out);
        schema::max_len("article.source_url", &self.source_url, 4096, &mut out);
        schema::max_len("article.source_name", &self.source_name, 255, &mut out);
        schema::max_len("article.language", &self.language, 255, &mut out);
        schema::required_some("article.published", &self.published, &mut out);
        out
    }

    fn clear(&mut self) {
        *self = Self::default();
    }

    /// Collection-level normalization swallows the fatal case: an article
    /// that cannot be normalized stays invalid and is dropped by the
    /// owning collection's retain pass.
    fn normalize(&mut self) {
        if let Err(error) = Article::normalize(self) {
            tracing::debug!(%error, "article failed normalization");
        }
    }
}

/// Aggregate accessors over a collection of articles.
impl Collection<Article> {
    /// All images across the collection, flattened in article order.
    pub fn images(&self) -> Images {
        let mut all = Images::new();
        for article in self {
            all.add(article.images.iter().cloned());
        }
        all
    }

    /// All videos across the collection, flattened in article order.
    pub fn videos(&self) -> Videos {
        let mut all = Videos::new();
        for article in self {
            all.add(article.videos.iter().cloned());
        }
        all
    }

    /// All quotes across the collection, flattened in article order.
    pub fn quotes(&self) -> Quotes {
        let mut all = Quotes::new();
        for article in self {
            all.add(article.quotes.iter().cloned());
        }
        all
    }

    /// All social profiles across the collection, flattened in article order.
    pub fn socials(&self) -> Socials {
        let mut all = Socials::new();
        for article in self {
            all.add(article.socials.iter().cloned());
        }
        all
    }

    /// Union of tags across the collection, first occurrence wins.
    pub fn tags(&self) -> Tags {
        let mut all = Tags::default();
        for article in self {
            all.add(article.tags.iter());
        }
        all
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::valid_article;
    use crate::types::image::Image;
    use crate::types::quote::Quote;

    #[test]
    fn test_new_has_generated_id_and_empty_children() {
        let article = Article::new();
        assert!(Uuid::parse_str(&article.id).is_ok());
        assert!(article.images.is_empty());
        assert!(article.tags.is_empty());
        assert!(article.published.is_none());
    }

    #[test]
    fn test_normalize_requires_core_content() {
        // Title, markup and text are required; published is defaulted, so
        // it never fails on its own.
        let mut article = Article::new();
        let result = article.normalize();
        assert!(matches!(result, Err(ArticleError::Validation(_))));
    }

    #[test]
    fn test_normalize_applies_defaults_only_when_empty() {
        let mut article = valid_article();
        article.language.clear();
        article.category.clear();
        article.genre.clear();
        article.published = None;

        article.normalize().unwrap();

        assert_eq!(article.language, "en");
        assert_eq!(article.category, "General");
        assert_eq!(article.genre, "Article");
        assert!(article.published.is_some());

        let mut preset = valid_article();
        preset.language = "ru".to_string();
        preset.category = "Travel".to_string();
        preset.normalize().unwrap();
        assert_eq!(preset.language, "ru");
        assert_eq!(preset.category, "Travel");
    }

    #[test]
    fn test_normalize_clears_only_violating_optional_fields() {
        let mut article = valid_article();
        article.id = "invalid-uuid".to_string();
        article.source_url = "invalid-url".to_string();
        let summary = article.summary.clone();

        article.normalize().unwrap();

        assert_eq!(article.id, "");
        assert_eq!(article.source_url, "");
        assert_eq!(article.summary, summary);
        assert!(!article.title.is_empty());
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let mut article = valid_article();
        article.normalize().unwrap();
        let once = article.clone();
        article.normalize().unwrap();
        assert_eq!(article, once);
    }

    #[test]
    fn test_normalize_cascades_into_children() {
        let mut article = valid_article();
        article.images.add([Image::new("https://example.com/a.jpg")]);
        let id = article.images.ids()[0].to_string();
        article.images.get_mut(&id).unwrap().url = "invalid-url".to_string();

        article.normalize().unwrap();
        assert!(article.images.is_empty());
    }

    #[test]
    fn test_normalize_truncates_over_long_optional_fields() {
        let mut article = valid_article();
        article.summary = "s".repeat(600);
        article.normalize().unwrap();
        assert_eq!(article.summary.chars().count(), 500);
    }

    #[test]
    fn test_articles_aggregate_accessors() {
        let mut first = valid_article();
        first.images.add([Image::new("https://example.com/1.jpg")]);
        first.tags.add(["travel"]);

        let mut second = valid_article();
        second.images.add([Image::new("https://example.com/2.jpg")]);
        second.quotes.add([Quote::new("quoted")]);
        second.tags.add(["travel", "thailand"]);

        let articles = Collection::with_items(vec![first, second]);
        assert_eq!(articles.images().len(), 2);
        assert_eq!(articles.quotes().len(), 1);
        assert_eq!(articles.tags().to_vec(), vec!["travel", "thailand"]);
    }

    #[test]
    fn test_json_deserialization() {
        let js = r#"{
            "id": "123e4567-e89b-12d3-a456-426614174000",
            "title": "The Rise of AI",
            "summary": "By John Doe",
            "markup": "<p>Artificial Intelligence is transforming the world.</p>",
            "text": "Artificial Intelligence is transforming the world.",
            "genre": "An overview of how AI is changing industries.",
            "published": "2024-05-27T10:00:00Z",
            "modified": "2024-05-28T12:00:00Z",
            "images": [{"id": "img-001", "url": "https://example.com/image1.jpg", "alt": "AI Illustration", "width": 800, "height": 600}],
            "videos": [{"id": "vid-001", "url": "https://example.com/video1.mp4", "embed": "<iframe src='https://example.com/video1.mp4'></iframe>"}],
            "quotes": [{"id": "quote-001", "text": "AI is the future.", "author": "Jane Smith", "source_url": "https://twitter.com/janesmith/status/123", "platform": "Twitter"}],
            "tags": ["AI", "Technology", "Future"],
            "source_url": "https://example.com",
            "language": "en",
            "category": "Technology",
            "source_name": "Tech News",
            "socials": [{"id": "sp-001", "platform": "Twitter", "url": "https://twitter.com/johndoe"}]
        }"#;

        let article: Article = serde_json::from_str(js).unwrap();
        assert_eq!(article.id, "123e4567-e89b-12d3-a456-426614174000");
        assert_eq!(article.title, "The Rise of AI");
        assert_eq!(
            article.published.unwrap().to_rfc3339(),
            "2024-05-27T10:00:00+00:00"
        );
        assert_eq!(article.images.len(), 1);
        assert_eq!(article.videos.len(), 1);
        assert_eq!(article.quotes.len(), 1);
        assert_eq!(article.socials.len(), 1);
        assert_eq!(article.tags.len(), 3);
    }
}
