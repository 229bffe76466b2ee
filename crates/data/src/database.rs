//! Connection pool wrapper and schema bootstrap.

use crate::config::DbConfig;
use crate::repository::StudentRepository;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{PgPool, Row};
use std::sync::Arc;
use tracing::info;

/// Database connection wrapper owning the pool.
///
/// Constructed once by the composition root and passed by reference (or
/// cloned; clones share the pool) to whatever needs data access. There is no
/// ambient global pool.
#[derive(Clone)]
pub struct Database {
    pool: Arc<PgPool>,
}

impl Database {
    /// Connects to PostgreSQL and builds the pool.
    ///
    /// One connection is established eagerly so an unreachable host or bad
    /// credentials fail here, at startup, rather than on the first query.
    ///
    /// # Errors
    /// Returns an error if the pool cannot be created.
    pub async fn connect(config: &DbConfig) -> Result<Self, sqlx::Error> {
        let options = PgConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .database(&config.database)
            .username(&config.user)
            .password(&config.password);

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout)
            .connect_with(options)
            .await?;

        info!(url = %config.redacted_url(), pool_max = config.max_connections, "connected to database");
        Ok(Self::from_pool(pool))
    }

    /// Wraps an existing pool. Used by tests and embedders.
    #[must_use]
    pub fn from_pool(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    /// Returns a reference to the connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Creates a StudentRepository sharing this pool.
    #[must_use]
    pub fn students(&self) -> StudentRepository {
        StudentRepository::new(self.pool.clone())
    }

    /// Creates the `students` table and its indexes if they do not exist.
    ///
    /// The script is idempotent; running it against an already-initialized
    /// database is a no-op.
    ///
    /// # Errors
    /// Returns an error if the bootstrap script fails.
    pub async fn migrate(&self) -> Result<(), sqlx::Error> {
        sqlx::raw_sql(include_str!("../migrations/001_create_students.sql"))
            .execute(self.pool.as_ref())
            .await?;
        info!("students table ready");
        Ok(())
    }

    /// Round-trips the connection, returning the server version string.
    ///
    /// # Errors
    /// Returns an error if the database is unreachable.
    pub async fn ping(&self) -> Result<String, sqlx::Error> {
        let row = sqlx::query("SELECT version()")
            .fetch_one(self.pool.as_ref())
            .await?;
        row.try_get(0)
    }

    /// Reports whether the `students` table exists and how many rows it holds.
    ///
    /// # Errors
    /// Returns an error if the catalog query fails.
    pub async fn info(&self) -> Result<DatabaseInfo, sqlx::Error> {
        let row = sqlx::query("SELECT to_regclass('public.students') IS NOT NULL")
            .fetch_one(self.pool.as_ref())
            .await?;
        let table_exists: bool = row.try_get(0)?;

        let total_students = if table_exists {
            let row = sqlx::query("SELECT COUNT(*) FROM students")
                .fetch_one(self.pool.as_ref())
                .await?;
            row.try_get(0)?
        } else {
            0
        };

        Ok(DatabaseInfo {
            table_exists,
            total_students,
        })
    }
}

/// Snapshot of database state for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatabaseInfo {
    pub table_exists: bool,
    pub total_students: i64,
}
