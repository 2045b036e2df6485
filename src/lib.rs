//! Content normalization and validation for news aggregation pipelines.
//!
//! The crate models an article and its child entities (images, videos,
//! quotes, social profiles, tags), enforces a per-field schema over them,
//! and keeps collections of entities always valid. On top of the model it
//! provides the two pipeline stages aggregators need: merging the output
//! of two HTML extraction sources into one article, and rewriting image
//! URLs once assets move to stable storage. The Map form in [`codec`]
//! round-trips articles through flat key/value maps for storage and
//! transport.
//!
//! Normalization is destructive by design: recoverable violations clear
//! the offending field (or the whole child entity), fatal violations on
//! required fields reject the article.

pub mod codec;
pub mod collection;
pub mod error;
pub mod pipeline;
pub mod schema;
pub mod testing;
pub mod traits;
pub mod types;

pub use collection::Collection;
pub use error::{ArticleError, ExtractorError, Result};
pub use pipeline::merge::{absolute_url, from_html};
pub use schema::{Entity, Rule, Violation, Violations};
pub use traits::extractor::{Extracted, ExtractedImage, Extractor};
pub use types::article::Article;
pub use types::image::Image;
pub use types::quote::Quote;
pub use types::social::Social;
pub use types::tags::Tags;
pub use types::video::Video;
pub use types::{Articles, Images, Quotes, Socials, Videos};
