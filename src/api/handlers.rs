//! API Handlers
//!
//! HTTP request handlers for each storage endpoint. Each handler takes the
//! write lock for the whole cache call, so the single-threaded cache only
//! ever sees one operation at a time.

use std::sync::Arc;
use tokio::sync::RwLock;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::cache::SimpleLru;
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::models::{
    DeleteResponse, GetResponse, HealthResponse, KeyValueRequest, StatsResponse, WriteResponse,
};

/// Application state shared across all handlers.
///
/// Contains the cache wrapped in Arc<RwLock<>> for thread-safe access.
#[derive(Clone)]
pub struct AppState {
    /// Serialized access to the cache
    pub cache: Arc<RwLock<SimpleLru>>,
}

impl AppState {
    /// Creates a new AppState with the given cache.
    pub fn new(cache: SimpleLru) -> Self {
        Self {
            cache: Arc::new(RwLock::new(cache)),
        }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(SimpleLru::new(config.max_size))
    }
}

fn validated(req: &KeyValueRequest) -> Result<()> {
    match req.validate() {
        Some(error_msg) => Err(CacheError::InvalidRequest(error_msg)),
        None => Ok(()),
    }
}

/// Handler for PUT /put
///
/// Inserts or replaces a key-value pair.
pub async fn put_handler(
    State(state): State<AppState>,
    Json(req): Json<KeyValueRequest>,
) -> Result<Json<WriteResponse>> {
    validated(&req)?;

    let mut cache = state.cache.write().await;
    cache.put(req.key.as_bytes(), req.value.as_bytes())?;

    Ok(Json(WriteResponse::new(req.key, "stored")))
}

/// Handler for POST /put_if_absent
///
/// Inserts a key-value pair only if the key is not cached yet.
pub async fn put_if_absent_handler(
    State(state): State<AppState>,
    Json(req): Json<KeyValueRequest>,
) -> Result<Json<WriteResponse>> {
    validated(&req)?;

    let mut cache = state.cache.write().await;
    cache.put_if_absent(req.key.as_bytes(), req.value.as_bytes())?;

    Ok(Json(WriteResponse::new(req.key, "stored")))
}

/// Handler for POST /set
///
/// Replaces the value of an existing key.
pub async fn set_handler(
    State(state): State<AppState>,
    Json(req): Json<KeyValueRequest>,
) -> Result<Json<WriteResponse>> {
    validated(&req)?;

    let mut cache = state.cache.write().await;
    cache.set(req.key.as_bytes(), req.value.as_bytes())?;

    Ok(Json(WriteResponse::new(req.key, "updated")))
}

/// Handler for GET /get/:key
///
/// Retrieves a value from the cache by key.
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    // Write lock: a hit promotes the entry and bumps stats
    let mut cache = state.cache.write().await;
    let value = cache.get(key.as_bytes())?;

    Ok(Json(GetResponse::new(key, value)))
}

/// Handler for DELETE /del/:key
///
/// Deletes a key from the cache.
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<DeleteResponse>> {
    let mut cache = state.cache.write().await;
    cache.delete(key.as_bytes())?;

    Ok(Json(DeleteResponse::new(key)))
}

/// Handler for GET /stats
///
/// Returns current cache statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let cache = state.cache.read().await;
    Json(StatsResponse::from(cache.stats()))
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
