//! Asistencia - attendance tracking client
//!
//! Talks to the attendance REST API (personas, asuntos, instancias,
//! asistencia), memoizes its responses in an expiring in-memory cache and
//! serves the application's views over HTTP.

pub mod api;
pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;

pub use api::{create_router, AppState};
pub use cache::{CacheKey, ExpiringCache, SharedCache};
pub use client::ApiClient;
pub use config::Config;
pub use error::{AppError, Result};
pub use tasks::spawn_cleanup_task;
