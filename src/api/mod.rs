//! API Module
//!
//! HTTP handlers and routing for the storage REST API.
//!
//! # Endpoints
//! - `PUT /put` - Insert or replace a key
//! - `POST /put_if_absent` - Insert a key only if it is absent
//! - `POST /set` - Replace the value of an existing key
//! - `GET /get/:key` - Retrieve a value by key
//! - `DELETE /del/:key` - Delete a key
//! - `GET /stats` - Get cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
