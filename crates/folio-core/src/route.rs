//! Route events produced by the client router.

use serde::{Deserialize, Serialize};

use crate::locale::Locale;

/// History action that produced a route event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RouteAction {
    /// Initial location on startup.
    Init,
    /// New history entry.
    Push,
    /// Current history entry replaced.
    Replace,
    /// Back button.
    GoBack,
    /// Forward button.
    GoForward,
}

impl RouteAction {
    /// Whether this action writes history (and can therefore be a no-op
    /// repeat of the current location).
    pub fn is_write(&self) -> bool {
        matches!(self, Self::Push | Self::Replace)
    }
}

/// A single route change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteState {
    pub action: RouteAction,
    /// Full pathname including the locale prefix (`/en/glossary`).
    pub pathname: String,
    pub locale: Locale,
    /// Content slug with the locale prefix removed (`/glossary`).
    pub slug: String,
    pub href: String,
    /// History entry key.
    pub key: String,
}

impl RouteState {
    /// Create a route event; `href` defaults to the pathname and `key` is empty.
    pub fn new(
        action: RouteAction,
        pathname: impl Into<String>,
        locale: Locale,
        slug: impl Into<String>,
    ) -> Self {
        let pathname = pathname.into();
        Self {
            action,
            href: pathname.clone(),
            pathname,
            locale,
            slug: slug.into(),
            key: String::new(),
        }
    }

    /// Set the history entry key.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Set the full href.
    pub fn with_href(mut self, href: impl Into<String>) -> Self {
        self.href = href.into();
        self
    }

    /// Whether this event points at the site root.
    pub fn is_root(&self) -> bool {
        self.pathname == "/"
    }
}
