//! Defines the error types for controller operations.

use folio_catalog::CatalogError;
use folio_traits::EventSourceError;
use thiserror::Error;

/// The main error enum for the scroll-spy controller.
#[derive(Error, Debug)]
pub enum SpyError {
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
    /// A catalog section has no rendered region. This is a wiring bug in the
    /// page, not a runtime condition.
    #[error("Section '{0}' is in the catalog but has no rendered region")]
    Unregistered(String),
    #[error("Rendered region '{0}' has no catalog entry")]
    UnknownRegion(String),
    #[error("Section '{0}' is rendered more than once")]
    DuplicateRegion(String),
    #[error("Viewport event error: {0}")]
    Events(#[from] EventSourceError),
    /// The controller is already borrowed by the caller, typically from
    /// inside [`MountedPage::with_spy`](crate::MountedPage::with_spy).
    #[error("Controller is busy; retry once the current call returns")]
    Busy,
    #[error("Mount error: {0}")]
    Mount(String),
    #[error("Configuration error: {0}")]
    Config(String),
}

impl SpyError {
    /// `true` when the error is a lookup of an id missing from the catalog.
    pub fn is_not_found(&self) -> bool {
        matches!(self, SpyError::Catalog(e) if e.is_not_found())
    }
}
