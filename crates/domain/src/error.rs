//! Validation errors raised before any statement reaches the database.

/// A field constraint violation detected before any write is attempted.
///
/// A `ValidationError` guarantees zero side effects: validation always runs
/// before a statement is sent to the pool.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A required field was missing or empty after trimming.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
    /// Name length outside 1..=100 after trimming.
    #[error("Name must be between 1 and 100 characters")]
    NameLength,
    /// Grade length outside 1..=50 after trimming.
    #[error("Grade must be between 1 and 50 characters")]
    GradeLength,
    /// Age outside 1..=150.
    #[error("Age must be between 1 and 150")]
    AgeOutOfRange,
    /// Student id was zero or negative.
    #[error("Invalid student ID")]
    InvalidId,
}
