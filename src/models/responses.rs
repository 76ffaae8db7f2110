//! Response DTOs for the storage HTTP API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::CacheStats;

/// Response body for `GET /get/:key`
#[derive(Debug, Clone, Serialize)]
pub struct GetResponse {
    /// The requested key
    pub key: String,
    /// The stored value (lossy UTF-8 if the bytes are not text)
    pub value: String,
}

impl GetResponse {
    /// Creates a new GetResponse from the raw stored bytes
    pub fn new(key: impl Into<String>, value: &[u8]) -> Self {
        Self {
            key: key.into(),
            value: String::from_utf8_lossy(value).into_owned(),
        }
    }
}

/// Response body for the write operations
#[derive(Debug, Clone, Serialize)]
pub struct WriteResponse {
    /// Success message
    pub message: String,
    /// The key that was written
    pub key: String,
}

impl WriteResponse {
    /// Creates a new WriteResponse; `action` reads like "stored" or "updated"
    pub fn new(key: impl Into<String>, action: &str) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' {} successfully", key, action),
            key,
        }
    }
}

/// Response body for `DELETE /del/:key`
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    /// Success message
    pub message: String,
    /// The key that was deleted
    pub key: String,
}

impl DeleteResponse {
    /// Creates a new DeleteResponse
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' deleted successfully", key),
            key,
        }
    }
}

/// Response body for `GET /stats`
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Number of cache hits
    pub hits: u64,
    /// Number of cache misses
    pub misses: u64,
    /// Number of evictions
    pub evictions: u64,
    /// Current number of entries in cache
    pub total_entries: usize,
    /// Bytes used by keys and values
    pub current_size: usize,
    /// Byte budget
    pub max_size: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl From<CacheStats> for StatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            hits: stats.hits,
            misses: stats.misses,
            evictions: stats.evictions,
            total_entries: stats.total_entries,
            current_size: stats.current_size,
            max_size: stats.max_size,
        }
    }
}

/// Response body for `GET /health`
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
