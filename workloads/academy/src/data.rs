//! Academy content models and backend queries.

use folio_core::Locale;
use folio_data::{group_by_initial, Group};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Backend collection holding articles for every sub-site.
pub const ARTICLES_API_PATH: &str = "cms-articles";

/// Tag marking glossary terms.
pub const GLOSSARY_TAG: &str = "Glossary";

/// Article summary used on index pages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArticleSummary {
    pub locale: String,
    pub slug: String,
    pub title: String,
    pub desc: String,
}

/// Glossary terms sharing an initial.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArticleGroup {
    pub key: String,
    pub articles: Vec<ArticleSummary>,
}

impl From<Group<ArticleSummary>> for ArticleGroup {
    fn from(group: Group<ArticleSummary>) -> Self {
        Self {
            key: group.key,
            articles: group.items,
        }
    }
}

/// Full article page data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ArticleDetail {
    pub title: String,
    pub desc: String,
    /// Trusted HTML authored in the backend.
    pub content: String,
}

/// Latest academy lessons for a locale.
pub fn lessons_query(locale: &Locale) -> Value {
    json!({
        "fields": ["locale", "slug", "title", "desc"],
        "filters": { "entry": "Academy", "locale": locale.as_str() },
        "sort": ["publishedAt:desc"],
        "pagination": { "limit": 12 },
    })
}

/// Every glossary term for a locale.
pub fn glossary_query(locale: &Locale) -> Value {
    json!({
        "fields": ["locale", "slug", "title", "desc"],
        "filters": {
            "entry": "Academy",
            "locale": locale.as_str(),
            "tags": { "name": GLOSSARY_TAG },
        },
    })
}

/// A single article by slug.
pub fn article_query(locale: &Locale, slug: &str) -> Value {
    json!({
        "fields": ["title", "desc", "content"],
        "filters": { "entry": "Academy", "locale": locale.as_str(), "slug": slug.trim_start_matches('/') },
    })
}

fn summaries(data: Vec<Value>) -> Vec<ArticleSummary> {
    data.into_iter()
        .filter_map(|record| match serde_json::from_value(record) {
            Ok(summary) => Some(summary),
            Err(err) => {
                tracing::debug!(error = %err, "skipping malformed article record");
                None
            }
        })
        .collect()
}

/// Map lesson records to `{ "articles": [ArticleSummary] }`.
pub fn format_lessons(data: Vec<Value>) -> Value {
    json!({ "articles": summaries(data) })
}

/// Map glossary records to `{ "articleGroups": [ArticleGroup] }`.
pub fn format_glossary(data: Vec<Value>) -> Value {
    let groups: Vec<ArticleGroup> = group_by_initial(summaries(data), |a| a.title.as_str())
        .into_iter()
        .map(ArticleGroup::from)
        .collect();
    json!({ "articleGroups": groups })
}

/// The first matching article record, or null when there is none.
pub fn format_article(data: Vec<Value>) -> Value {
    data.into_iter().next().unwrap_or(Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn term(title: &str) -> Value {
        json!({"locale": "en", "slug": title.to_lowercase(), "title": title, "desc": ""})
    }

    #[test]
    fn test_glossary_groups_sorted_with_digits_first() {
        let value = format_glossary(vec![term("Zorro"), term("apple"), term("123 Token"), term("Banana")]);
        let groups: Vec<ArticleGroup> = serde_json::from_value(value["articleGroups"].clone()).unwrap();

        let keys: Vec<&str> = groups.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, vec!["#", "A", "B", "Z"]);
        assert_eq!(groups[0].articles[0].title, "123 Token");
        assert_eq!(groups[1].articles[0].title, "apple");
    }

    #[test]
    fn test_glossary_keeps_fetch_order_in_group() {
        let value = format_glossary(vec![term("Bridge"), term("Airdrop"), term("Block"), term("bitcoin")]);
        let groups: Vec<ArticleGroup> = serde_json::from_value(value["articleGroups"].clone()).unwrap();
        let b: Vec<&str> = groups[1].articles.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(b, vec!["Bridge", "Block", "bitcoin"]);
    }

    #[test]
    fn test_glossary_query_filters_tag() {
        let query = glossary_query(&Locale::new("en"));
        assert_eq!(query["filters"]["tags"]["name"], "Glossary");
        assert_eq!(query["filters"]["locale"], "en");
    }

    #[test]
    fn test_lessons_formatter() {
        let value = format_lessons(vec![term("Staking")]);
        assert_eq!(value["articles"][0]["slug"], "staking");
    }
}
