//! Blog templates.

pub mod article;
pub mod home;

/// Template name of the home feed.
pub const BLOG_HOME: &str = "BlogHome";

/// Template name of an article page.
pub const BLOG_ARTICLE: &str = "BlogArticle";
