//! Request DTOs for the storage HTTP API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;

/// Request body shared by the write operations
/// (`PUT /put`, `POST /put_if_absent`, `POST /set`).
#[derive(Debug, Clone, Deserialize)]
pub struct KeyValueRequest {
    /// The cache key
    pub key: String,
    /// The value to store
    pub value: String,
}

impl KeyValueRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    /// Size limits are left to the cache budget.
    pub fn validate(&self) -> Option<String> {
        if self.key.is_empty() {
            return Some("Key cannot be empty".to_string());
        }
        None
    }
}
