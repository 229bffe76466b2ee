//! Data access for the student records service.
//!
//! This crate owns database configuration resolution, the PostgreSQL
//! connection pool, schema bootstrap, and the [`StudentRepository`] that
//! translates validated operations into parameterized statements.

/// Database configuration resolved from the environment.
pub mod config;
/// Connection pool wrapper and schema bootstrap.
pub mod database;
/// Repository error taxonomy.
pub mod error;
/// Student repository.
pub mod repository;

pub use config::DbConfig;
pub use database::{Database, DatabaseInfo};
pub use error::RepositoryError;
pub use repository::{GradeStats, StudentRepository};
