//! Ordered set of article tags.

use std::fmt;

use indexmap::IndexSet;
use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

const TAG_MAX_LEN: usize = 255;

/// Insertion-ordered tag set.
///
/// Tags are trimmed on insert; blanks, over-long values and duplicates are
/// silently dropped.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Tags {
    tags: IndexSet<String>,
}

impl Tags {
    /// Create a tag set from the given values.
    pub fn new(tags: impl IntoIterator<Item = impl Into<String>>) -> Self {
        let mut set = Self::default();
        set.add(tags);
        set
    }

    /// Create a tag set from a comma-separated string.
    pub fn from_str(value: &str) -> Self {
        Self::new(value.split(','))
    }

    /// Add tags, skipping blanks, over-long values and duplicates.
    pub fn add(&mut self, tags: impl IntoIterator<Item = impl Into<String>>) -> &mut Self {
        for tag in tags {
            let tag = tag.into().trim().to_string();
            if !tag.is_empty() && tag.chars().count() <= TAG_MAX_LEN {
                self.tags.insert(tag);
            }
        }
        self
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// Remove a tag, preserving the order of the rest.
    pub fn remove(&mut self, tag: &str) -> &mut Self {
        self.tags.shift_remove(tag);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.tags.iter().cloned().collect()
    }
}

impl fmt::Display for Tags {
    /// Comma-separated list of tags.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_vec().join(","))
    }
}

impl Serialize for Tags {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.tags.iter())
    }
}

impl<'de> Deserialize<'de> for Tags {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let values = Vec::<String>::deserialize(deserializer)?;
        Ok(Tags::new(values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blanks_and_duplicates_dropped() {
        let tags = Tags::new(["travel", "  ", "travel", "Phuket", ""]);
        assert_eq!(tags.len(), 2);
        assert!(tags.contains("travel"));
        assert!(tags.contains("Phuket"));
    }

    #[test]
    fn test_over_long_tags_dropped() {
        let long = "x".repeat(256);
        let tags = Tags::new([long.as_str(), "ok"]);
        assert_eq!(tags.to_vec(), vec!["ok"]);
    }

    #[test]
    fn test_from_comma_separated_string() {
        let tags = Tags::from_str("AI, Technology , Future");
        assert_eq!(tags.to_vec(), vec!["AI", "Technology", "Future"]);
        assert_eq!(tags.to_string(), "AI,Technology,Future");
    }

    #[test]
    fn test_remove_preserves_order() {
        let mut tags = Tags::new(["a", "b", "c"]);
        tags.remove("b");
        assert_eq!(tags.to_vec(), vec!["a", "c"]);
    }

    #[test]
    fn test_serde_roundtrip() {
        let tags = Tags::new(["AI", "Technology", "Future"]);
        let json = serde_json::to_string(&tags).unwrap();
        assert_eq!(json, r#"["AI","Technology","Future"]"#);
        let back: Tags = serde_json::from_str(&json).unwrap();
        assert_eq!(tags, back);
    }
}
