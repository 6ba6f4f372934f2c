//! Core abstractions for the folio content rendering pipeline.
//!
//! This crate provides the fundamental types and traits:
//! - `PageData` / `PreloadedData` - Page payload and the server-to-client bridge
//! - `RouteState` - Route events produced by the client router
//! - `Locale` / `PathParser` - Locale and slug extraction from URLs
//! - `Component` - Renderable template component contract
//! - `TimingContext` - Pipeline phase timing

mod component;
mod context;
mod lifecycle;
mod locale;
mod page;
mod route;

pub use component::*;
pub use context::*;
pub use lifecycle::*;
pub use locale::*;
pub use page::*;
pub use route::*;
