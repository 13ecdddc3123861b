//! Error types for the todo API client.
//!
//! # Design
//! The server only distinguishes three failure classes: 400 with a plain-text
//! reason, 404 for a missing todo on single-item reads, and 500 with the store
//! error text. `BadRequest` and `NotFound` get their own variants; anything
//! else unexpected lands in `HttpError` with the raw status and body.

use thiserror::Error;

/// Errors returned by `TodoClient` build and parse methods.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404.
    #[error("resource not found")]
    NotFound,

    /// The server returned 400; the body is the server's reason.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Any other unexpected status.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    #[error("deserialization failed: {0}")]
    Deserialization(#[source] serde_json::Error),

    #[error("serialization failed: {0}")]
    Serialization(#[source] serde_json::Error),
}
