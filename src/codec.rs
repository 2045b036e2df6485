//! The Map form: flat key/value serialization and reconstruction.
//!
//! Articles round-trip through a `serde_json::Map` with a fixed,
//! versioned key set for storage and transport. Decoding is typed: a key
//! holding a value of the wrong type is an explicit error, never a
//! silently-defaulted zero. Reconstruction re-runs full schema validation
//! and fails on any violation.
//!
//! Legacy key names from earlier schema revisions (`html`,
//! `text_content`, `excerpt`, `byline`, `source`, `site_name`,
//! `article__author_social_profiles`, ...) are accepted on decode only;
//! serialization always emits the canonical keys.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::collection::Collection;
use crate::error::{ArticleError, Result};
use crate::schema::Entity;
use crate::types::article::Article;
use crate::types::image::Image;
use crate::types::quote::Quote;
use crate::types::social::Social;
use crate::types::tags::Tags;
use crate::types::video::Video;

impl Article {
    /// Convert the article to its Map form, children included.
    pub fn to_map(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("id".into(), Value::String(self.id.clone()));
        map.insert("title".into(), Value::String(self.title.clone()));
        map.insert("summary".into(), Value::String(self.summary.clone()));
        map.insert("markup".into(), Value::String(self.markup.clone()));
        map.insert("text".into(), Value::String(self.text.clone()));
        map.insert("genre".into(), Value::String(self.genre.clone()));
        map.insert("author".into(), Value::String(self.author.clone()));
        map.insert(
            "images".into(),
            Value::Array(self.images.iter().map(|i| Value::Object(i.to_map())).collect()),
        );
        map.insert(
            "videos".into(),
            Value::Array(self.videos.iter().map(|v| Value::Object(v.to_map())).collect()),
        );
        map.insert(
            "quotes".into(),
            Value::Array(self.quotes.iter().map(|q| Value::Object(q.to_map())).collect()),
        );
        map.insert(
            "tags".into(),
            Value::Array(self.tags.iter().map(|t| Value::String(t.to_string())).collect()),
        );
        map.insert("published".into(), time_value(&self.published));
        map.insert("modified".into(), time_value(&self.modified));
        map.insert("source_url".into(), Value::String(self.source_url.clone()));
        map.insert("language".into(), Value::String(self.language.clone()));
        map.insert("category".into(), Value::String(self.category.clone()));
        map.insert("source_name".into(), Value::String(self.source_name.clone()));
        map.insert(
            "socials".into(),
            Value::Array(self.socials.iter().map(|s| Value::Object(s.to_map())).collect()),
        );
        map
    }

    /// Reconstruct an article from its Map form.
    ///
    /// Wrong value types are decode errors; schema-invalid child entities
    /// are dropped through the lenient collection path; any violation on
    /// the reconstructed article itself fails with
    /// [`ArticleError::Validation`].
    pub fn from_map(map: &Map<String, Value>) -> Result<Article> {
        let article = Article {
            id: take_str(map, &["id"])?,
            title: take_str(map, &["title"])?,
            summary: take_str(map, &["summary", "excerpt"])?,
            markup: take_str(map, &["markup", "html", "content"])?,
            text: take_str(map, &["text", "text_content"])?,
            genre: take_str(map, &["genre"])?,
            author: take_str(map, &["author", "byline"])?,
            category: take_str(map, &["category"])?,
            language: take_str(map, &["language"])?,
            source_url: take_str(map, &["source_url", "source"])?,
            source_name: take_str(map, &["source_name", "site_name"])?,
            published: take_time(map, &["published"])?,
            modified: take_time(map, &["modified"])?,
            images: decode_collection(map, &["images"], Image::from_map)?,
            videos: decode_collection(map, &["videos"], Video::from_map)?,
            quotes: decode_collection(map, &["quotes"], Quote::from_map)?,
            socials: decode_collection(
                map,
                &["socials", "article__author_social_profiles"],
                Social::from_map,
            )?,
            tags: Tags::new(take_str_array(map, &["tags"])?),
        };

        let violations = article.violations();
        if !violations.is_empty() {
            return Err(ArticleError::Validation(violations.into()));
        }

        Ok(article)
    }
}

/// Map forms for every article in the collection.
impl Collection<Article> {
    pub fn maps(&self) -> Vec<Map<String, Value>> {
        self.iter().map(Article::to_map).collect()
    }
}

impl Image {
    pub fn to_map(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("id".into(), Value::String(self.id.clone()));
        map.insert("url".into(), Value::String(self.url.clone()));
        map.insert("alt".into(), Value::String(self.alt.clone()));
        map.insert("caption".into(), Value::String(self.caption.clone()));
        map.insert("width".into(), Value::from(self.width));
        map.insert("height".into(), Value::from(self.height));
        map
    }

    pub fn from_map(map: &Map<String, Value>) -> Result<Image> {
        let image = Image {
            id: take_str(map, &["id"])?,
            url: take_str(map, &["url"])?,
            alt: take_str(map, &["alt", "alt_text"])?,
            caption: take_str(map, &["caption", "title"])?,
            width: take_u32(map, "width")?,
            height: take_u32(map, "height")?,
        };
        validated(image)
    }
}

impl Video {
    pub fn to_map(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("id".into(), Value::String(self.id.clone()));
        map.insert("url".into(), Value::String(self.url.clone()));
        map.insert("title".into(), Value::String(self.title.clone()));
        map.insert("embed".into(), Value::String(self.embed.clone()));
        map
    }

    pub fn from_map(map: &Map<String, Value>) -> Result<Video> {
        let video = Video {
            id: take_str(map, &["id"])?,
            url: take_str(map, &["url"])?,
            title: take_str(map, &["title"])?,
            embed: take_str(map, &["embed"])?,
        };
        validated(video)
    }
}

impl Quote {
    pub fn to_map(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("id".into(), Value::String(self.id.clone()));
        map.insert("text".into(), Value::String(self.text.clone()));
        map.insert("author".into(), Value::String(self.author.clone()));
        map.insert("source_url".into(), Value::String(self.source_url.clone()));
        map.insert("platform".into(), Value::String(self.platform.clone()));
        map
    }

    pub fn from_map(map: &Map<String, Value>) -> Result<Quote> {
        let quote = Quote {
            id: take_str(map, &["id"])?,
            text: take_str(map, &["text"])?,
            author: take_str(map, &["author"])?,
            source_url: take_str(map, &["source_url", "source"])?,
            platform: take_str(map, &["platform"])?,
        };
        validated(quote)
    }
}

impl Social {
    pub fn to_map(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("id".into(), Value::String(self.id.clone()));
        map.insert("platform".into(), Value::String(self.platform.clone()));
        map.insert("url".into(), Value::String(self.url.clone()));
        map
    }

    pub fn from_map(map: &Map<String, Value>) -> Result<Social> {
        let social = Social {
            id: take_str(map, &["id"])?,
            platform: take_str(map, &["platform"])?,
            url: take_str(map, &["url"])?,
        };
        validated(social)
    }
}

/// Fail with the entity's violations unless it passes its schema.
fn validated<T: Entity>(entity: T) -> Result<T> {
    let violations = entity.violations();
    if !violations.is_empty() {
        return Err(ArticleError::Validation(violations.into()));
    }
    Ok(entity)
}

fn time_value(time: &Option<DateTime<Utc>>) -> Value {
    match time {
        Some(time) => Value::String(time.to_rfc3339()),
        None => Value::Null,
    }
}

/// Read a string under the first present key; missing and null decode to
/// an empty string, any other type is a decode error.
fn take_str(map: &Map<String, Value>, keys: &[&str]) -> Result<String> {
    for key in keys {
        match map.get(*key) {
            None => continue,
            Some(Value::String(s)) => return Ok(s.clone()),
            Some(Value::Null) => return Ok(String::new()),
            Some(_) => {
                return Err(ArticleError::Decode {
                    key: (*key).to_string(),
                    expected: "string",
                })
            }
        }
    }
    Ok(String::new())
}

fn take_u32(map: &Map<String, Value>, key: &str) -> Result<u32> {
    match map.get(key) {
        None | Some(Value::Null) => Ok(0),
        Some(Value::Number(number)) => number
            .as_u64()
            .and_then(|wide| u32::try_from(wide).ok())
            .ok_or_else(|| ArticleError::Decode {
                key: key.to_string(),
                expected: "non-negative integer",
            }),
        Some(_) => Err(ArticleError::Decode {
            key: key.to_string(),
            expected: "non-negative integer",
        }),
    }
}

fn take_time(map: &Map<String, Value>, keys: &[&str]) -> Result<Option<DateTime<Utc>>> {
    for key in keys {
        match map.get(*key) {
            None => continue,
            Some(Value::Null) => return Ok(None),
            Some(Value::String(raw)) => {
                return DateTime::parse_from_rfc3339(raw)
                    .map(|time| Some(time.with_timezone(&Utc)))
                    .map_err(|_| ArticleError::Decode {
                        key: (*key).to_string(),
                        expected: "RFC 3339 timestamp",
                    })
            }
            Some(_) => {
                return Err(ArticleError::Decode {
                    key: (*key).to_string(),
                    expected: "RFC 3339 timestamp",
                })
            }
        }
    }
    Ok(None)
}

fn take_str_array(map: &Map<String, Value>, keys: &[&str]) -> Result<Vec<String>> {
    for key in keys {
        match map.get(*key) {
            None => continue,
            Some(Value::Null) => return Ok(Vec::new()),
            Some(Value::Array(values)) => {
                let mut out = Vec::with_capacity(values.len());
                for value in values {
                    let Value::String(s) = value else {
                        return Err(ArticleError::Decode {
                            key: (*key).to_string(),
                            expected: "array of strings",
                        });
                    };
                    out.push(s.clone());
                }
                return Ok(out);
            }
            Some(_) => {
                return Err(ArticleError::Decode {
                    key: (*key).to_string(),
                    expected: "array of strings",
                })
            }
        }
    }
    Ok(Vec::new())
}

/// Decode a child array under the first present key, dropping
/// schema-invalid entries through the lenient path.
fn decode_collection<T: Entity>(
    map: &Map<String, Value>,
    keys: &[&str],
    decode: impl Fn(&Map<String, Value>) -> Result<T>,
) -> Result<Collection<T>> {
    let mut collection = Collection::new();

    for key in keys {
        let values = match map.get(*key) {
            None => continue,
            Some(Value::Null) => return Ok(collection),
            Some(Value::Array(values)) => values,
            Some(_) => {
                return Err(ArticleError::Decode {
                    key: (*key).to_string(),
                    expected: "array of objects",
                })
            }
        };

        for value in values {
            let Value::Object(entry) = value else {
                return Err(ArticleError::Decode {
                    key: (*key).to_string(),
                    expected: "array of objects",
                });
            };
            match decode(entry) {
                Ok(item) => {
                    collection.add([item]);
                }
                Err(ArticleError::Validation(violations)) => {
                    tracing::debug!(key = *key, %violations, "child entity rejected");
                }
                Err(error) => return Err(error),
            }
        }
        break;
    }

    Ok(collection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{valid_article, valid_image, valid_quote, valid_social, valid_video};

    #[test]
    fn test_minimal_article_roundtrip() {
        let mut expected = Article::new();
        expected.title = "X".to_string();
        expected.markup = "<p>x</p>".to_string();
        expected.text = "x".to_string();
        expected.published = Some(Utc::now());

        let got = Article::from_map(&expected.to_map()).unwrap();
        assert_eq!(expected, got);
    }

    #[test]
    fn test_full_article_roundtrip() {
        let mut expected = valid_article();
        expected.images.add([valid_image()]);
        expected.videos.add([valid_video()]);
        expected.quotes.add([valid_quote()]);
        expected.socials.add([valid_social()]);
        expected.tags.add(["travel", "Phuket", "Thailand"]);
        expected.modified = Some(Utc::now());

        let got = Article::from_map(&expected.to_map()).unwrap();
        assert_eq!(expected, got);
    }

    #[test]
    fn test_missing_required_fields_fail_reconstruction() {
        let empty = Article::new();
        let result = Article::from_map(&empty.to_map());
        assert!(matches!(result, Err(ArticleError::Validation(_))));
    }

    #[test]
    fn test_invalid_child_is_dropped_not_fatal() {
        let mut source = valid_article();
        source.images.add([valid_image()]);
        let mut map = source.to_map();

        // Corrupt the image URL inside the map; the entry fails its schema
        // on decode and is dropped, while the article itself survives.
        let images = map.get_mut("images").unwrap().as_array_mut().unwrap();
        images[0]
            .as_object_mut()
            .unwrap()
            .insert("url".into(), Value::String("invalid-url".into()));

        let got = Article::from_map(&map).unwrap();
        assert!(got.images.is_empty());
        assert_eq!(got.title, source.title);
    }

    #[test]
    fn test_wrong_type_is_a_decode_error() {
        let mut map = valid_article().to_map();
        map.insert("title".into(), Value::from(42));
        assert!(matches!(
            Article::from_map(&map),
            Err(ArticleError::Decode { .. })
        ));

        let mut map = valid_article().to_map();
        map.insert("published".into(), Value::from(true));
        assert!(matches!(
            Article::from_map(&map),
            Err(ArticleError::Decode { .. })
        ));

        let mut map = valid_article().to_map();
        map.insert("tags".into(), Value::from(vec![1, 2, 3]));
        assert!(matches!(
            Article::from_map(&map),
            Err(ArticleError::Decode { .. })
        ));
    }

    #[test]
    fn test_legacy_keys_accepted_on_decode() {
        let expected = valid_article();
        let mut map = expected.to_map();

        let markup = map.remove("markup").unwrap();
        map.insert("html".into(), markup);
        let text = map.remove("text").unwrap();
        map.insert("text_content".into(), text);
        let summary = map.remove("summary").unwrap();
        map.insert("excerpt".into(), summary);
        let socials = map.remove("socials").unwrap();
        map.insert("article__author_social_profiles".into(), socials);

        let got = Article::from_map(&map).unwrap();
        assert_eq!(got.markup, expected.markup);
        assert_eq!(got.text, expected.text);
        assert_eq!(got.summary, expected.summary);
    }

    #[test]
    fn test_canonical_keys_win_over_legacy() {
        let mut map = valid_article().to_map();
        map.insert("html".into(), Value::String("<p>legacy</p>".into()));
        let got = Article::from_map(&map).unwrap();
        assert_ne!(got.markup, "<p>legacy</p>");
    }

    #[test]
    fn test_image_map_roundtrip() {
        let image = valid_image();
        let got = Image::from_map(&image.to_map()).unwrap();
        assert_eq!(image, got);
    }

    #[test]
    fn test_image_from_map_rejects_negative_width() {
        let mut map = valid_image().to_map();
        map.insert("width".into(), Value::from(-1));
        assert!(matches!(
            Image::from_map(&map),
            Err(ArticleError::Decode { .. })
        ));
    }

    #[test]
    fn test_quote_legacy_source_key() {
        let mut quote = valid_quote();
        quote.source_url = "https://twitter.com/janesmith/status/123".to_string();
        let mut map = quote.to_map();
        let source = map.remove("source_url").unwrap();
        map.insert("source".into(), source);

        let got = Quote::from_map(&map).unwrap();
        assert_eq!(got.source_url, quote.source_url);
    }

    #[test]
    fn test_articles_maps() {
        let articles = Collection::with_items(vec![valid_article(), valid_article()]);
        let maps = articles.maps();
        assert_eq!(maps.len(), 2);
        assert!(maps[0].contains_key("id"));
    }
}
