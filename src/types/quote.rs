//! Quote cited by an article.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::schema::{self, Entity, Violation};

/// A quotation, usually lifted from social media or another publication.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Quote {
    /// Unique identifier of the quote.
    #[serde(default)]
    pub id: String,

    /// Text of the quote.
    #[serde(default)]
    pub text: String,

    /// Person the quote is attributed to.
    #[serde(default)]
    pub author: String,

    /// URL of the original statement.
    #[serde(default)]
    pub source_url: String,

    /// Platform the quote was taken from (e.g. Twitter).
    #[serde(default)]
    pub platform: String,
}

impl Quote {
    /// Create a new quote with a generated ID.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text: text.into(),
            ..Self::default()
        }
    }
}

impl Entity for Quote {
    const KIND: &'static str = "quote";

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
        self.text = schema::trim_to_max(&self.text, 65000);
        self.author = schema::trim_to_max(&self.author, 255);
        self.source_url = schema::trim_to_max(&self.source_url, 4096);
        self.platform = schema::trim_to_max(&self.platform, 255);
    }

    fn violations(&self) -> Vec<Violation> {
        let mut out = Vec::new();
        schema::required("quote.id", &self.id, &mut out);
        schema::max_len("quote.id", &self.id, 36, &mut out);
        schema::required("quote.text", &self.text, &mut out);
        schema::max_len("quote.text", &self.text, 65000, &mut out);
        schema::max_len("quote.author", &self.author, 255, &mut out);
        schema::valid_url("quote.source_url", &self.source_url, &mut out);
        schema::max_len("quote.source_url", &self.source_url, 4096, &mut out);
        schema::max_len("quote.platform", &self.platform, 255, &mut out);
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
    fn test_text_is_required() {
        let quote = Quote::new("");
        assert!(!quote.is_valid());

        let quote = Quote::new("AI is the future of technology.");
        assert!(quote.is_valid());
    }

    #[test]
    fn test_normalize_clears_on_bad_source_url() {
        let mut quote = Quote::new("Some statement");
        quote.source_url = "invalid-url".to_string();
        quote.normalize();
        assert_eq!(quote, Quote::default());
    }

    #[test]
    fn test_empty_source_url_is_valid() {
        let quote = Quote::new("Some statement");
        assert!(quote.is_valid());
    }
}
