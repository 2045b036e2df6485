//! Canonical entity types: the Article aggregate and its leaf entities.

pub mod article;
pub mod image;
pub mod quote;
pub mod social;
pub mod tags;
pub mod video;

use crate::collection::Collection;

/// Ordered collection of articles.
pub type Articles = Collection<article::Article>;
/// Ordered collection of images.
pub type Images = Collection<image::Image>;
/// Ordered collection of videos.
pub type Videos = Collection<video::Video>;
/// Ordered collection of quotes.
pub type Quotes = Collection<quote::Quote>;
/// Ordered collection of social profiles.
pub type Socials = Collection<social::Social>;
