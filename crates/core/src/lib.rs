//! # folio-core
//!
//! Platform-agnostic scroll-spy navigation controller.
//!
//! This crate decides which section of a single-page site is "active" and
//! performs programmatic scroll-to-section:
//! - **spy**: the [`ScrollSpy`] state machine and active-section resolution
//! - **page**: [`MountedPage`], scoped ownership of the viewport listener
//! - **nav**: the [`NavBar`] model that mirrors the active section
//! - **config**: [`SpyConfig`] tuning (lookahead bias, settle tolerance, ...)
//! - **error**: [`SpyError`]
//!
//! ## Design Principle
//!
//! This crate has **no platform dependencies**. Geometry and scroll commands
//! go through [`folio_traits::LayoutProvider`], event registration through
//! [`folio_traits::ViewportEvents`]. The browser implementations live in
//! `folio-wasm`; in-memory ones ship with `folio-traits`.
//!
//! Everything is single-threaded: one page, one UI thread, events handled
//! one at a time in arrival order.

// Re-export foundation crates
pub use folio_catalog as catalog;
pub use folio_traits as traits;
pub use folio_types as types;

pub mod config;
pub mod error;
pub mod nav;
pub mod page;
pub mod spy;

pub use config::{DEFAULT_LOOKAHEAD_BIAS, DEFAULT_SETTLE_TOLERANCE, SpyConfig};
pub use error::SpyError;
pub use nav::{NavBar, NavItem, SharedNavBar};
pub use page::{MountedPage, SharedSpy};
pub use spy::{ScrollSpy, SpyPhase, SubscriberId, ViewportState};
