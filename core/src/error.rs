//! Error types for the bookstore client.
//!
//! # Design
//! Service-side validation failures are not errors here: they come back as
//! an `ApiResponse` with a non-success status. `ApiError` covers only what
//! prevents a response from being produced or read at all.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never completed (connection, TLS, I/O).
    #[error("transport failed: {0}")]
    Transport(#[from] ureq::Error),

    /// The response body was not the JSON the caller expected.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
}
