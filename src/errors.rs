use thiserror::Error;

/// Error type that captures persistence and configuration failures.
///
/// Aggregations themselves never fail: missing references degrade to
/// zero/no-op results by contract.
#[derive(Debug, Error)]
pub enum CaixaError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Invalid reference: {0}")]
    InvalidRef(String),
}
