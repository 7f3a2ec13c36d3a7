//! Error handling for WASM bindings.
//!
//! Converts folio's error types into JavaScript-friendly errors.

use folio_catalog::CatalogError;
use folio_core::SpyError;
use wasm_bindgen::prelude::*;

/// Error codes for TypeScript consumption.
#[wasm_bindgen]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Section id not present in the catalog
    NotFound,
    /// Two catalog entries share an id
    DuplicateId,
    /// Catalog without sections
    EmptyCatalog,
    /// Catalog section without a rendered element
    Unregistered,
    /// Rendered `<section id>` without a catalog entry
    UnknownRegion,
    /// Two rendered elements share a section id
    DuplicateRegion,
    /// Called back into the page while it was already in use
    Busy,
    /// JSON serialization/deserialization error
    Json,
    /// Page lifecycle misuse or listener registration failure
    Mount,
    /// Invalid configuration
    Config,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::DuplicateId => "DUPLICATE_ID",
            ErrorCode::EmptyCatalog => "EMPTY_CATALOG",
            ErrorCode::Unregistered => "UNREGISTERED",
            ErrorCode::UnknownRegion => "UNKNOWN_REGION",
            ErrorCode::DuplicateRegion => "DUPLICATE_REGION",
            ErrorCode::Busy => "BUSY",
            ErrorCode::Json => "JSON_ERROR",
            ErrorCode::Mount => "MOUNT_ERROR",
            ErrorCode::Config => "CONFIG_ERROR",
        }
    }
}

/// A JavaScript-friendly error type.
///
/// Note: This is NOT a wasm_bindgen struct because we need custom
/// conversion to JavaScript Error objects.
#[derive(Debug)]
pub struct FolioError {
    code: ErrorCode,
    message: String,
}

impl FolioError {
    /// Create a new error with the given code and message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn mount(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Mount, message)
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<CatalogError> for FolioError {
    fn from(err: CatalogError) -> Self {
        let code = match &err {
            CatalogError::NotFound(_) => ErrorCode::NotFound,
            CatalogError::DuplicateId(_) => ErrorCode::DuplicateId,
            CatalogError::EmptyCatalog => ErrorCode::EmptyCatalog,
            CatalogError::Json(_) => ErrorCode::Json,
            CatalogError::Io(_) => ErrorCode::Config,
        };
        Self::new(code, err.to_string())
    }
}

impl From<SpyError> for FolioError {
    fn from(err: SpyError) -> Self {
        let code = match err {
            SpyError::Catalog(inner) => return inner.into(),
            SpyError::Unregistered(_) => ErrorCode::Unregistered,
            SpyError::UnknownRegion(_) => ErrorCode::UnknownRegion,
            SpyError::DuplicateRegion(_) => ErrorCode::DuplicateRegion,
            SpyError::Busy => ErrorCode::Busy,
            SpyError::Events(_) | SpyError::Mount(_) => ErrorCode::Mount,
            SpyError::Config(_) => ErrorCode::Config,
        };
        Self::new(code, err.to_string())
    }
}

impl From<serde_wasm_bindgen::Error> for FolioError {
    fn from(err: serde_wasm_bindgen::Error) -> Self {
        Self::new(ErrorCode::Json, err.to_string())
    }
}

impl From<FolioError> for JsValue {
    fn from(err: FolioError) -> Self {
        let js_error = js_sys::Error::new(&err.message);

        // Add the error code as a property
        js_sys::Reflect::set(
            &js_error,
            &"code".into(),
            &JsValue::from_str(err.code.as_str()),
        )
        .ok();

        js_error.into()
    }
}
