//! Field-priority merge of two independent extraction sources.
//!
//! A content (readability-style) source supplies the article body; a
//! metadata (distiller-style) source supplies page metadata and images.
//! Fields are combined lowest-priority-wins-only-if-empty: a value already
//! present on the article is never overwritten, except for the
//! metadata-owned fields (category, site name, images), which the metadata
//! source sets unconditionally when it succeeds. Either source may fail
//! without affecting the other.

use chrono::{DateTime, NaiveDate, Utc};
use scraper::{Html, Selector};
use url::Url;

use crate::error::Result;
use crate::traits::extractor::Extractor;
use crate::types::article::Article;
use crate::types::image::Image;
use crate::types::Images;

/// Build a canonical article from raw HTML.
///
/// Runs both sources against the same markup, merges their fields, scans
/// the page itself for a publication date if neither source found one, and
/// finishes with [`Article::normalize`]. A fatal validation error from
/// normalization is the overall extraction failure; everything else is
/// repaired or dropped silently.
pub fn from_html(
    html: &str,
    base: &Url,
    content: &dyn Extractor,
    metadata: &dyn Extractor,
) -> Result<Article> {
    let mut article = Article::new();
    article.source_url = base.to_string();

    apply_content(&mut article, html, base, content);
    apply_metadata(&mut article, html, base, metadata);

    // Last-resort date scan; normalize falls back to "now" if this also
    // finds nothing.
    if article.published.is_none() {
        article.published = scan_published(html);
    }

    article.normalize()?;
    Ok(article)
}

/// Apply the content source: title, excerpt, text and language fill empty
/// fields; markup comes from this source only.
fn apply_content(article: &mut Article, html: &str, base: &Url, source: &dyn Extractor) {
    let found = match source.extract(html, base) {
        Ok(found) => found,
        Err(error) => {
            tracing::debug!(source = source.name(), %error, "extraction source failed");
            return;
        }
    };

    fill(&mut article.title, found.title);
    fill(&mut article.summary, found.excerpt);
    fill(&mut article.text, found.text);
    fill(&mut article.language, found.language);
    fill(&mut article.author, found.author);

    if let Some(markup) = found.markup {
        article.markup = markup;
    }
    if article.published.is_none() {
        article.published = found.published;
    }
}

/// Apply the metadata source: category, site name and images are owned by
/// this source and overwritten unconditionally; title and excerpt only
/// fill empty fields.
fn apply_metadata(article: &mut Article, html: &str, base: &Url, source: &dyn Extractor) {
    let found = match source.extract(html, base) {
        Ok(found) => found,
        Err(error) => {
            tracing::debug!(source = source.name(), %error, "extraction source failed");
            return;
        }
    };

    article.category = found.category.unwrap_or_default();
    article.source_name = found.site_name.unwrap_or_default();

    article.images = Images::new();
    for found_image in found.images {
        let Some(absolute) = absolute_url(base, &found_image.url) else {
            continue;
        };
        let mut image = Image::new(absolute);
        image.width = found_image.width;
        image.height = found_image.height;
        article.images.add([image]);
    }

    fill(&mut article.title, found.title);
    fill(&mut article.summary, found.excerpt);
    if article.published.is_none() {
        article.published = found.published;
    }
}

/// Set `target` from `value` only when `target` is still empty.
fn fill(target: &mut String, value: Option<String>) {
    if target.is_empty() {
        if let Some(value) = value {
            *target = value;
        }
    }
}

/// Resolve a possibly-relative href against the base URL.
pub fn absolute_url(base: &Url, href: &str) -> Option<String> {
    base.join(href).ok().map(|url| url.to_string())
}

/// Scan the raw page for a publication date the extraction sources missed.
///
/// Checked in order: Open Graph `article:published_time`, any
/// `time[datetime]` element, then the `.field--name-created` node some
/// CMS themes render with a spelled-out date.
fn scan_published(html: &str) -> Option<DateTime<Utc>> {
    let document = Html::parse_document(html);

    if let Ok(selector) = Selector::parse(r#"meta[property="article:published_time"]"#) {
        for element in document.select(&selector) {
            if let Some(content) = element.value().attr("content") {
                if let Ok(parsed) = DateTime::parse_from_rfc3339(content.trim()) {
                    return Some(parsed.with_timezone(&Utc));
                }
            }
        }
    }

    if let Ok(selector) = Selector::parse("time[datetime]") {
        for element in document.select(&selector) {
            if let Some(datetime) = element.value().attr("datetime") {
                if let Ok(parsed) = DateTime::parse_from_rfc3339(datetime.trim()) {
                    return Some(parsed.with_timezone(&Utc));
                }
            }
        }
    }

    if let Ok(selector) = Selector::parse(".field--name-created") {
        for element in document.select(&selector) {
            let text = element.text().collect::<String>();
            if let Ok(date) = NaiveDate::parse_from_str(text.trim(), "%A, %-d %B %Y") {
                return date.and_hms_opt(0, 0, 0).map(|at_midnight| at_midnight.and_utc());
            }
        }
    }

    None
}
