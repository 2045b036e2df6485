//! Social media profile of an article's author.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::schema::{self, Entity, Violation};

/// A social media profile link.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Social {
    /// Unique identifier of the profile link.
    #[serde(default)]
    pub id: String,

    /// Platform of the profile (e.g. Twitter, Facebook).
    #[serde(default)]
    pub platform: String,

    /// URL of the profile.
    #[serde(default)]
    pub url: String,
}

impl Social {
    /// Create a new profile link with a generated ID.
    pub fn new(platform: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            platform: platform.into(),
            url: url.into(),
        }
    }
}

impl Entity for Social {
    const KIND: &'static str = "social";

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
        self.platform = schema::trim_to_max(&self.platform, 255);
        self.url = schema::trim_to_max(&self.url, 4096);
    }

    fn violations(&self) -> Vec<Violation> {
        let mut out = Vec::new();
        schema::required("social.id", &self.id, &mut out);
        schema::max_len("social.id", &self.id, 36, &mut out);
        schema::max_len("social.platform", &self.platform, 255, &mut out);
        schema::required("social.url", &self.url, &mut out);
        schema::valid_url("social.url", &self.url, &mut out);
        schema::max_len("social.url", &self.url, 4096, &mut out);
        out
    }

    fn clear(&mut self) {
        *self = Self::default();
    }
}
