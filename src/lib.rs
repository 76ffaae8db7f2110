//! Mini LRU - A byte-budgeted in-memory key-value storage
//!
//! The core is a single-threaded LRU cache whose budget is the sum of key and
//! value sizes. A small HTTP front-end serializes access to it.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;

pub use api::AppState;
pub use cache::{SimpleLru, Storage};
pub use config::Config;
