//! Error types shared by the CouchDB storage implementation.

use reqwest::StatusCode;
use thiserror::Error;

use crate::dao::storage::StorageError;

/// Convenient result alias returning [`CouchDaoError`] failures.
pub type CouchResult<T> = Result<T, CouchDaoError>;

/// Failures that can occur while interacting with CouchDB.
#[derive(Debug, Error)]
pub enum CouchDaoError {
    /// Required environment variable is missing.
    #[error("missing CouchDB environment variable `{var}`")]
    MissingEnvVar {
        /// Name of the missing variable.
        var: &'static str,
    },
    /// Building the HTTP client failed (invalid TLS setup, etc).
    #[error("failed to build CouchDB client")]
    ClientBuilder {
        /// Underlying client failure.
        #[source]
        source: reqwest::Error,
    },
    /// Querying the database for existence failed.
    #[error("failed to query CouchDB database `{database}`")]
    DatabaseQuery {
        /// Database being checked.
        database: String,
        /// Underlying HTTP failure.
        #[source]
        source: reqwest::Error,
    },
    /// Creating the database failed.
    #[error("failed to create CouchDB database `{database}`")]
    DatabaseCreate {
        /// Database being created.
        database: String,
        /// Underlying HTTP failure.
        #[source]
        source: reqwest::Error,
    },
    /// The database responded with an unexpected status.
    #[error("CouchDB database `{database}` responded with status {status}")]
    DatabaseStatus {
        /// Database involved.
        database: String,
        /// Status returned by CouchDB.
        status: StatusCode,
    },
    /// Sending a document request failed.
    #[error("failed to send CouchDB request for `{path}`")]
    RequestSend {
        /// Document path involved.
        path: String,
        /// Underlying HTTP failure.
        #[source]
        source: reqwest::Error,
    },
    /// A document request returned an unexpected status.
    #[error("CouchDB request for `{path}` returned status {status}")]
    RequestStatus {
        /// Document path involved.
        path: String,
        /// Status returned by CouchDB.
        status: StatusCode,
    },
    /// A response body could not be decoded.
    #[error("failed to decode CouchDB response for `{path}`")]
    DecodeResponse {
        /// Document path involved.
        path: String,
        /// Underlying decode failure.
        #[source]
        source: reqwest::Error,
    },
}

impl From<CouchDaoError> for StorageError {
    fn from(err: CouchDaoError) -> Self {
        StorageError::unavailable(err.to_string(), err)
    }
}
