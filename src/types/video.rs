//! Video attached to an article.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::schema::{self, Entity, Violation};

/// A video referenced by an article.
///
/// The URL is required; the embed code is kept verbatim for players that
/// need it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Video {
    /// Unique identifier of the video.
    #[serde(default)]
    pub id: String,

    /// Source URL of the video.
    #[serde(default)]
    pub url: String,

    /// Title of the video.
    #[serde(default)]
    pub title: String,

    /// Embed markup for the video.
    #[serde(default)]
    pub embed: String,
}

impl Video {
    /// Create a new video with a generated ID.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            url: url.into(),
            ..Self::default()
        }
    }
}

impl Entity for Video {
    const KIND: &'static str = "video";

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
        self.title = schema::trim_to_max(&self.title, 500);
        self.embed = schema::trim_to_max(&self.embed, 65000);
    }

    fn violations(&self) -> Vec<Violation> {
        let mut out = Vec::new();
        schema::required("video.id", &self.id, &mut out);
        schema::max_len("video.id", &self.id, 36, &mut out);
        schema::required("video.url", &self.url, &mut out);
        schema::valid_url("video.url", &self.url, &mut out);
        schema::max_len("video.url", &self.url, 4096, &mut out);
        schema::max_len("video.title", &self.title, 500, &mut out);
        schema::max_len("video.embed", &self.embed, 65000, &mut out);
        out
    }

    fn clear(&mut self) {
        *self = Self::default();
    }
}
