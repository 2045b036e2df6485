//! Asset URL rewriting after images move to stable storage.
//!
//! The caller uploads extracted images somewhere durable, builds a remap
//! table from original to stored URL, and applies it here. Only the image
//! collection is rewritten.

use std::collections::HashMap;

use crate::types::article::Article;

impl Article {
    /// Replace image URLs using the remap table.
    ///
    /// Images whose current URL has no entry in the table are left
    /// untouched; their IDs are returned as failures.
    pub fn replace_urls(&mut self, remap: &HashMap<String, String>) -> Vec<String> {
        let mut failed = Vec::new();

        for image in self.images.iter_mut() {
            match remap.get(&image.url) {
                Some(replacement) => image.url = replacement.clone(),
                None => failed.push(image.id.clone()),
            }
        }

        failed
    }

    /// Replace image URLs using the remap table, removing the images that
    /// have no entry.
    ///
    /// Returns the IDs of the removed images.
    pub fn replace_or_remove_urls(&mut self, remap: &HashMap<String, String>) -> Vec<String> {
        let failed = self.replace_urls(remap);

        if !failed.is_empty() {
            tracing::debug!(count = failed.len(), "removing images without a remapped URL");
            self.images.remove(&failed);
        }

        failed
    }
}
