//! Error types for the todo service.
//!
//! # Design
//! `StoreError` covers everything below the handler layer: redb failures,
//! record encoding, and malformed keys. `ApiError` is what handlers return.
//! Client input problems become 400 with the raw parser text (or the fixed
//! `Invalid ID` string), store failures become 500 with the store error text.
//! Bodies are plain text with no structured error code.

use std::path::PathBuf;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Errors raised by the store adapter and the repository.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store file could not be created, opened, or locked.
    #[error("open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: redb::DatabaseError,
    },

    /// Any failure reported by redb inside a transaction.
    #[error(transparent)]
    Db(#[from] redb::Error),

    #[error("encode todo {id}: {source}")]
    Encode {
        id: u64,
        #[source]
        source: serde_json::Error,
    },

    /// A stored record is not a valid JSON todo.
    #[error("decode todo {id}: {source}")]
    Decode {
        id: u64,
        #[source]
        source: serde_json::Error,
    },

    #[error("malformed key: expected 8 bytes, got {0}")]
    MalformedKey(usize),
}

macro_rules! store_error_from_redb {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for StoreError {
                fn from(err: $ty) -> Self {
                    StoreError::Db(err.into())
                }
            }
        )*
    };
}

store_error_from_redb!(
    redb::TransactionError,
    redb::TableError,
    redb::StorageError,
    redb::CommitError,
);

/// Errors returned by HTTP handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The `{id}` path segment is not a decimal unsigned integer.
    #[error("Invalid ID")]
    InvalidId,

    /// The request body is not a JSON todo.
    #[error("{0}")]
    MalformedBody(#[source] serde_json::Error),

    #[error("todo not found")]
    NotFound,

    #[error("{0}")]
    Store(#[from] StoreError),

    /// The blocking task running a store transaction panicked or was cancelled.
    #[error("{0}")]
    Worker(#[from] tokio::task::JoinError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidId | ApiError::MalformedBody(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Store(_) | ApiError::Worker(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (status, self.to_string()).into_response()
    }
}
