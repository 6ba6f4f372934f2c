//! Blog content models and backend queries.

use folio_core::Locale;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Card image used when an article has no header image.
pub const DEFAULT_IMAGE: &str = "https://img.rubydex.com/v1/2e9bcac0/ruby-1.png";

/// Backend collection holding articles for every sub-site.
pub const ARTICLES_API_PATH: &str = "cms-articles";

/// Uploaded media reference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Media {
    #[serde(default)]
    pub url: Option<String>,
}

/// Article record as returned by the backend.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ArticleRecord {
    pub locale: String,
    pub slug: String,
    pub title: String,
    pub desc: String,
    pub header_image: Option<Media>,
}

/// Article summary shown on the home feed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArticleCard {
    /// Locale of the article; empty when the backend omitted it.
    pub locale: String,
    pub slug: String,
    pub title: String,
    pub desc: String,
    pub image: String,
}

impl From<ArticleRecord> for ArticleCard {
    fn from(record: ArticleRecord) -> Self {
        let image = record
            .header_image
            .and_then(|media| media.url)
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_IMAGE.to_string());
        Self {
            locale: record.locale,
            slug: record.slug,
            title: record.title,
            desc: record.desc,
            image,
        }
    }
}

/// Full article page data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ArticleDetail {
    pub title: String,
    pub desc: String,
    /// Trusted HTML authored in the backend.
    pub content: String,
    pub header_image: Option<Media>,
}

/// Query for the locale's blog feed.
pub fn feed_query(locale: &Locale) -> Value {
    json!({
        "fields": ["locale", "slug", "title", "desc"],
        "populate": { "headerImage": { "fields": ["url"] } },
        "filters": { "entry": "Blog", "locale": locale.as_str() },
    })
}

/// Query for a single article by slug.
pub fn article_query(locale: &Locale, slug: &str) -> Value {
    json!({
        "fields": ["title", "desc", "content"],
        "populate": { "headerImage": { "fields": ["url"] } },
        "filters": { "locale": locale.as_str(), "slug": slug.trim_start_matches('/') },
    })
}

/// Map feed records to `{ "articles": [ArticleCard] }`.
pub fn format_feed(data: Vec<Value>) -> Value {
    let articles: Vec<ArticleCard> = data
        .into_iter()
        .filter_map(|record| match serde_json::from_value::<ArticleRecord>(record) {
            Ok(record) => Some(record.into()),
            Err(err) => {
                tracing::debug!(error = %err, "skipping malformed article record");
                None
            }
        })
        .collect();
    json!({ "articles": articles })
}

/// The first matching article record, or null when there is none.
pub fn format_article(data: Vec<Value>) -> Value {
    data.into_iter().next().unwrap_or(Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_formatter_defaults_image() {
        let value = format_feed(vec![
            json!({"locale": "en", "slug": "defi-101", "title": "DeFi 101", "desc": "Basics", "headerImage": {"url": "https://img/x.png"}}),
            json!({"slug": "nft", "title": "NFTs", "desc": "Tokens", "headerImage": null}),
            json!({"slug": "l2", "title": "Layer 2"}),
        ]);
        let articles = value["articles"].as_array().unwrap();
        assert_eq!(articles.len(), 3);
        assert_eq!(articles[0]["image"], "https://img/x.png");
        assert_eq!(articles[0]["locale"], "en");
        assert_eq!(articles[1]["locale"], "");
        assert_eq!(articles[1]["image"], DEFAULT_IMAGE);
        assert_eq!(articles[2]["image"], DEFAULT_IMAGE);
        assert_eq!(articles[2]["desc"], "");
    }

    #[test]
    fn test_feed_formatter_empty() {
        assert_eq!(format_feed(Vec::new()), json!({"articles": []}));
    }

    #[test]
    fn test_article_formatter_takes_first() {
        assert_eq!(format_article(vec![json!({"title": "A"}), json!({"title": "B"})]), json!({"title": "A"}));
        assert_eq!(format_article(Vec::new()), Value::Null);
    }

    #[test]
    fn test_queries_filter_by_locale() {
        let locale = Locale::new("en");
        assert_eq!(feed_query(&locale)["filters"], json!({"entry": "Blog", "locale": "en"}));
        assert_eq!(
            article_query(&locale, "/defi-101")["filters"],
            json!({"locale": "en", "slug": "defi-101"})
        );
    }
}
