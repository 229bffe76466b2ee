//! Domain model for the student records service.
//!
//! This crate defines the `Student` entity, the validated draft type used by
//! create/update operations, and the validation error taxonomy. It has no
//! knowledge of the database or the HTTP layer.

/// Validation error types.
pub mod error;
/// Student entity and draft validation.
pub mod student;

pub use error::ValidationError;
pub use student::{AGE_MAX, AGE_MIN, GRADE_MAX_LEN, NAME_MAX_LEN};
pub use student::{Student, StudentDraft, ValidatedStudent, validate_id};
