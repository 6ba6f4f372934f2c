//! Locale and content slug extraction from request URLs.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A locale tag such as `en` or `zh-tw`, always stored lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Locale(String);

impl Locale {
    /// Create a locale, normalizing to lowercase.
    pub fn new(tag: impl AsRef<str>) -> Self {
        Self(tag.as_ref().to_ascii_lowercase())
    }

    /// The locale tag.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::new("en")
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Locale {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}

/// Locale and slug parsed out of a URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathInfo {
    pub locale: Locale,
    /// Content path without the locale prefix, always starting with `/`.
    pub slug: String,
}

/// Parses a request URL into locale and content slug.
pub trait PathParser: Send + Sync {
    fn parse(&self, url: &str) -> PathInfo;
}

/// Parser that treats a leading known-locale segment as the locale.
///
/// `/en/glossary?q=1` parses to locale `en` and slug `/glossary`; `/en` to
/// slug `/`. A path without a known locale prefix keeps the whole path as the
/// slug and falls back to the default locale.
#[derive(Debug, Clone)]
pub struct LocalePrefixParser {
    locales: Vec<Locale>,
    default: Locale,
}

impl LocalePrefixParser {
    /// Create a parser for the given locales; the first one is the default.
    pub fn new(locales: impl IntoIterator<Item = impl AsRef<str>>) -> Self {
        let locales: Vec<Locale> = locales.into_iter().map(Locale::new).collect();
        let default = locales.first().cloned().unwrap_or_default();
        Self { locales, default }
    }

    /// Override the default locale.
    pub fn with_default(mut self, locale: Locale) -> Self {
        self.default = locale;
        self
    }

    /// The fallback locale.
    pub fn default_locale(&self) -> &Locale {
        &self.default
    }
}

impl Default for LocalePrefixParser {
    fn default() -> Self {
        Self::new(["en"])
    }
}

impl PathParser for LocalePrefixParser {
    fn parse(&self, url: &str) -> PathInfo {
        let path = pathname_of(url);
        let trimmed = path.trim_start_matches('/');
        let (first, rest) = match trimmed.split_once('/') {
            Some((first, rest)) => (first, rest),
            None => (trimmed, ""),
        };

        let candidate = Locale::new(first);
        if !first.is_empty() && self.locales.contains(&candidate) {
            return PathInfo {
                locale: candidate,
                slug: format!("/{}", rest.trim_end_matches('/')),
            };
        }

        PathInfo {
            locale: self.default.clone(),
            slug: format!("/{}", trimmed.trim_end_matches('/')),
        }
    }
}

/// Strip scheme, host, query and fragment from a URL, leaving the pathname.
pub fn pathname_of(url: &str) -> &str {
    let without_origin = match url.find("://") {
        Some(idx) => {
            let after = &url[idx + 3..];
            after.find('/').map_or("/", |slash| &after[slash..])
        }
        None => url,
    };
    let end = without_origin
        .find(|c| c == '?' || c == '#')
        .unwrap_or(without_origin.len());
    match &without_origin[..end] {
        "" => "/",
        path => path,
    }
}
