use crate::error::ValidationError;
use serde::{Deserialize, Serialize};

/// Maximum name length in characters, after trimming.
pub const NAME_MAX_LEN: usize = 100;
/// Maximum grade length in characters, after trimming.
pub const GRADE_MAX_LEN: usize = 50;
/// Minimum accepted age.
pub const AGE_MIN: i32 = 1;
/// Maximum accepted age.
pub const AGE_MAX: i32 = 150;

/// A persisted student row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    /// System-assigned identifier, never reused.
    pub id: i32,
    pub name: String,
    pub age: i32,
    pub grade: String,
    /// Set once at creation.
    pub created_at: chrono::DateTime<chrono::Utc>,
    /// Refreshed on every successful update.
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// An un-persisted candidate carried by add/update requests.
///
/// Field values are raw caller input; call [`StudentDraft::validate`] to
/// obtain the trimmed, constraint-checked form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentDraft {
    pub name: String,
    pub age: i32,
    pub grade: String,
}

impl StudentDraft {
    pub fn new(name: impl Into<String>, age: i32, grade: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            age,
            grade: grade.into(),
        }
    }

    /// Trims `name` and `grade` and checks every field constraint.
    ///
    /// # Errors
    /// Returns the first violated constraint. Validation order matches the
    /// write path: required fields, then age, then name length, then grade
    /// length.
    pub fn validate(&self) -> Result<ValidatedStudent, ValidationError> {
        let name = self.name.trim();
        let grade = self.grade.trim();

        if name.is_empty() {
            return Err(ValidationError::MissingField("name"));
        }
        if grade.is_empty() {
            return Err(ValidationError::MissingField("grade"));
        }
        if !(AGE_MIN..=AGE_MAX).contains(&self.age) {
            return Err(ValidationError::AgeOutOfRange);
        }
        if name.chars().count() > NAME_MAX_LEN {
            return Err(ValidationError::NameLength);
        }
        if grade.chars().count() > GRADE_MAX_LEN {
            return Err(ValidationError::GradeLength);
        }

        Ok(ValidatedStudent {
            name: name.to_string(),
            age: self.age,
            grade: grade.to_string(),
        })
    }
}

/// A draft that passed validation; `name` and `grade` are trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedStudent {
    pub name: String,
    pub age: i32,
    pub grade: String,
}

/// Checks that an id is positive.
///
/// # Errors
/// Returns [`ValidationError::InvalidId`] for zero or negative ids.
pub fn validate_id(id: i32) -> Result<(), ValidationError> {
    if id < 1 {
        return Err(ValidationError::InvalidId);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_draft_is_trimmed() {
        let draft = StudentDraft::new("  Alice Smith  ", 15, " 10A ");
        let valid = draft.validate().unwrap();
        assert_eq!(valid.name, "Alice Smith");
        assert_eq!(valid.grade, "10A");
        assert_eq!(valid.age, 15);
    }

    #[test]
    fn test_empty_name_rejected() {
        let draft = StudentDraft::new("   ", 15, "10A");
        assert_eq!(
            draft.validate(),
            Err(ValidationError::MissingField("name"))
        );
    }

    #[test]
    fn test_empty_grade_rejected() {
        let draft = StudentDraft::new("Alice", 15, "");
        assert_eq!(
            draft.validate(),
            Err(ValidationError::MissingField("grade"))
        );
    }

    #[test]
    fn test_age_bounds() {
        assert!(StudentDraft::new("Alice", 1, "10A").validate().is_ok());
        assert!(StudentDraft::new("Alice", 150, "10A").validate().is_ok());
        assert_eq!(
            StudentDraft::new("Alice", 0, "10A").validate(),
            Err(ValidationError::AgeOutOfRange)
        );
        assert_eq!(
            StudentDraft::new("Alice", 151, "10A").validate(),
            Err(ValidationError::AgeOutOfRange)
        );
    }

    #[test]
    fn test_name_length_bounds() {
        let max = "x".repeat(NAME_MAX_LEN);
        assert!(StudentDraft::new(max.clone(), 15, "10A").validate().is_ok());
        let over = "x".repeat(NAME_MAX_LEN + 1);
        assert_eq!(
            StudentDraft::new(over, 15, "10A").validate(),
            Err(ValidationError::NameLength)
        );
    }

    #[test]
    fn test_grade_length_bounds() {
        let max = "g".repeat(GRADE_MAX_LEN);
        assert!(StudentDraft::new("Alice", 15, max).validate().is_ok());
        let over = "g".repeat(GRADE_MAX_LEN + 1);
        assert_eq!(
            StudentDraft::new("Alice", 15, over).validate(),
            Err(ValidationError::GradeLength)
        );
    }

    #[test]
    fn test_length_counts_chars_not_bytes() {
        // 100 multibyte characters are within bounds even though the byte
        // length exceeds 100.
        let name = "é".repeat(NAME_MAX_LEN);
        assert!(name.len() > NAME_MAX_LEN);
        assert!(StudentDraft::new(name, 15, "10A").validate().is_ok());
    }

    #[test]
    fn test_id_positivity() {
        assert!(validate_id(1).is_ok());
        assert_eq!(validate_id(0), Err(ValidationError::InvalidId));
        assert_eq!(validate_id(-7), Err(ValidationError::InvalidId));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ValidationError::AgeOutOfRange.to_string(),
            "Age must be between 1 and 150"
        );
        assert_eq!(
            ValidationError::MissingField("grade").to_string(),
            "Missing required field: grade"
        );
    }
}
