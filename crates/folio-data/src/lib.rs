//! Content loading for template pages.
//!
//! This crate provides:
//! - `Query` / `LoaderSpec` / `ContentLoader` - Declarative data requirements
//! - `load_content` - Concurrent query execution and ordered merge
//! - `FetchMany` - The data-access boundary
//! - `CmsClient` - HTTP `FetchMany` for the content backend, with timeout/retry
//! - `group_by_initial` - Alphabetical grouping for index pages

mod client;
mod executor;
mod fetch;
mod group;
mod loader;
mod qs;
mod retry;
mod timeout;

pub use client::*;
pub use executor::*;
pub use fetch::*;
pub use group::*;
pub use loader::*;
pub use qs::*;
pub use retry::*;
pub use timeout::*;
