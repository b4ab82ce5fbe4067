use thiserror::Error;

/// Result type for credential storage operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Storage-layer errors.
///
/// A missing credential is not an error; `fetch` reports it as `Ok(None)`.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("backend error: {0}")]
    Backend(String),
}
