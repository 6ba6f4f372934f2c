//! Server-side rendering of template pages into complete HTML documents.
//!
//! This crate provides:
//! - `DocumentShell` - The HTML document wrapped around rendered markup
//! - `BuildManifest` / `ManifestCache` - Client entry script lookup
//! - `RenderAdapter` - Resolve, load, and render one page
//! - `Uploader` / `FsUploader` - Storage of rendered documents

mod adapter;
mod manifest;
mod shell;
mod upload;

pub use adapter::*;
pub use manifest::*;
pub use shell::*;
pub use upload::*;
