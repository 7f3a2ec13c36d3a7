// src/error.rs
//! Error type for the replay engine and the `folio` binary.

use folio_catalog::CatalogError;
use folio_core::SpyError;
use folio_traits::LayoutError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReplayError {
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
    #[error("Navigation error: {0}")]
    Spy(#[from] SpyError),
    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid input: {0}")]
    Input(String),
}
