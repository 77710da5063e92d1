use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// The requested raster or palette has no backing data
    #[error("Resource not found: {0}")]
    ResourceNotFound(String),
    /// A degenerate transition request, it is never attempted
    #[error("Invalid transition specification: {0}")]
    InvalidSpecification(String),
    #[error("Invalid raster catalog: {0}")]
    InvalidCatalog(String),
    #[error("Raster error: {0}")]
    Geo(#[from] geo::Error),
    #[error("{0}")]
    Inf(#[from] inf::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    IOError(#[from] std::io::Error),
}
