//! Repository error taxonomy.

use records_domain::ValidationError;

/// Errors surfaced by repository operations.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// Input failed a field constraint before any statement was sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The targeted student does not exist. Also covers the case where a
    /// concurrent delete removed the row before an update/delete statement
    /// ran: a zero-affected-row write is treated as not-found, not as a
    /// storage failure.
    #[error("Student not found: {id}")]
    NotFound { id: i32 },
    /// Connection failure, pool exhaustion, statement failure, or a row that
    /// failed to decode. The driver rolls back any open transaction before
    /// this escapes.
    #[error("Database error: {0}")]
    Storage(#[from] sqlx::Error),
}
