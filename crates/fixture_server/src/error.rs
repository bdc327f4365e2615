use thiserror::Error;

#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid dataset: {0}")]
    Json(#[from] serde_json::Error),
}
