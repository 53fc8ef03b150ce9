use std::error::Error;
use thiserror::Error;

/// Result alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Error raised by storage backends regardless of the underlying store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backend cannot be reached or refused the operation.
    #[error("storage unavailable: {message}")]
    Unavailable {
        /// Human-readable context for the failure.
        message: String,
        /// Backend-specific cause.
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },
    /// A stored collection exists but cannot be decoded.
    #[error("stored collection `{collection}` is corrupted")]
    Corrupted {
        /// Collection that failed to decode.
        collection: String,
        /// Backend-specific cause.
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },
}

impl StorageError {
    /// Construct an unavailable error from any backend failure.
    pub fn unavailable(message: String, source: impl Error + Send + Sync + 'static) -> Self {
        StorageError::Unavailable {
            message,
            source: Box::new(source),
        }
    }

    /// Construct a corruption error for a collection that failed to decode.
    pub fn corrupted(collection: impl Into<String>, source: impl Error + Send + Sync + 'static) -> Self {
        StorageError::Corrupted {
            collection: collection.into(),
            source: Box::new(source),
        }
    }
}
