//! Error types for the file-backed JSON storage implementation.

use std::path::PathBuf;

use thiserror::Error;

use crate::dao::storage::StorageError;

/// Convenient result alias returning [`JsonDaoError`] failures.
pub type JsonFileResult<T> = Result<T, JsonDaoError>;

/// Failures that can occur while reading or writing collection files.
#[derive(Debug, Error)]
pub enum JsonDaoError {
    /// The data directory could not be created.
    #[error("failed to create data directory `{path}`")]
    CreateRoot {
        /// Directory that could not be created.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// A collection file could not be read or written.
    #[error("i/o failure on collection file `{path}`")]
    Io {
        /// File involved in the failed operation.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// A collection file exists but does not hold valid JSON for its type.
    #[error("failed to decode collection `{collection}` from `{path}`")]
    Decode {
        /// Logical collection name.
        collection: &'static str,
        /// File that failed to decode.
        path: PathBuf,
        /// Underlying decode failure.
        #[source]
        source: serde_json::Error,
    },
    /// A collection could not be serialized before writing.
    #[error("failed to encode collection `{collection}`")]
    Encode {
        /// Logical collection name.
        collection: &'static str,
        /// Underlying encode failure.
        #[source]
        source: serde_json::Error,
    },
}

impl From<JsonDaoError> for StorageError {
    fn from(err: JsonDaoError) -> Self {
        match err {
            JsonDaoError::Decode { collection, .. } => {
                let name = collection.to_string();
                StorageError::corrupted(name, err)
            }
            other => StorageError::unavailable(other.to_string(), other),
        }
    }
}
