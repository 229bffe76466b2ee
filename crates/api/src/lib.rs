//! REST API for the student records service.
//!
//! This crate exposes the student repository over HTTP:
//! - CRUD endpoints under `/api/students`
//! - Search and per-grade statistics read models
//! - Health check backed by a database round trip
//! - Permissive CORS for the `/api` subtree and request tracing

/// Error-to-status mapping.
pub mod error;
/// Request handlers.
pub mod handlers;
/// API request/response models.
pub mod models;
/// Route definitions.
pub mod routes;
/// Server configuration and startup.
pub mod server;
/// Application state.
pub mod state;

pub use error::ApiError;
pub use routes::router;
pub use server::{ApiServer, ServerConfig};
pub use state::AppState;
