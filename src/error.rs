//! Error types for the storage
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache and its HTTP front-end.
///
/// A failed cache call never changes cache state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Key not found in cache
    #[error("Key not found: {0}")]
    NotFound(String),

    /// Key already present (conditional insert refused)
    #[error("Key already exists: {0}")]
    AlreadyExists(String),

    /// Key and value together exceed the whole cache budget
    #[error("Entry of {size} bytes exceeds cache budget of {max_size} bytes")]
    EntryTooLarge { size: usize, max_size: usize },

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl CacheError {
    /// Builds a `NotFound` from raw key bytes.
    pub fn not_found(key: &[u8]) -> Self {
        CacheError::NotFound(String::from_utf8_lossy(key).into_owned())
    }

    /// Builds an `AlreadyExists` from raw key bytes.
    pub fn already_exists(key: &[u8]) -> Self {
        CacheError::AlreadyExists(String::from_utf8_lossy(key).into_owned())
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::NotFound(_) => StatusCode::NOT_FOUND,
            CacheError::AlreadyExists(_) => StatusCode::CONFLICT,
            CacheError::EntryTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            CacheError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the storage.
pub type Result<T> = std::result::Result<T, CacheError>;
