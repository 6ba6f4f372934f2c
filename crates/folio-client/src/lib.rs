//! Client-side page lifecycle.
//!
//! This crate provides:
//! - `NavigationController` - Hydration and race-safe route transitions
//! - `NavigationState` / `PageHandle` - The displayed page, observable by the UI
//! - `ClientHost` - Browser side effects (navigation, scrolling, title)

mod controller;
mod host;
mod state;

pub use controller::*;
pub use host::*;
pub use state::*;
