//! Academy templates.

pub mod article;
pub mod glossary;
pub mod home;

pub const ACADEMY_HOME: &str = "AcademyHome";
pub const ACADEMY_GLOSSARY: &str = "AcademyGlossary";
pub const ACADEMY_ARTICLE: &str = "AcademyArticle";
