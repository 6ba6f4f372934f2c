//! Template registry and route resolution.
//!
//! This crate provides:
//! - `Template` / `TemplateModule` - Lazily loaded, memoized template modules
//! - `TemplateRegistry` - Lookup by static slug or by name
//! - `RouteResolver` - Static slug match first, then content backend lookup

mod registry;
mod resolver;

pub use registry::*;
pub use resolver::*;
