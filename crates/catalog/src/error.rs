use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Section not found: '{0}'")]
    NotFound(String),
    #[error("Duplicate section id: '{0}'")]
    DuplicateId(String),
    #[error("Catalog has no sections")]
    EmptyCatalog,
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CatalogError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, CatalogError::NotFound(_))
    }
}
