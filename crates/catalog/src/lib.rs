//! The content model: an ordered, immutable catalog of page sections.
//!
//! A [`Catalog`] is validated once at construction (non-empty, unique ids)
//! and exposes read-only queries afterwards. The navigation controller in
//! `folio-core` only ever reads ids, labels and order from it.

pub mod catalog;
pub mod error;

pub use catalog::{Catalog, NavEntry};
pub use error::CatalogError;
