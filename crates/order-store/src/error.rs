use thiserror::Error;

/// Errors that can occur when interacting with the order store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing store failed. The in-memory implementation never raises
    /// this; it exists for implementations backed by real storage.
    #[error("Store backend error: {0}")]
    Backend(String),
}

/// Result type for order store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
