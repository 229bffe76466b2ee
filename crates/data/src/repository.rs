//! Student repository: validated CRUD and read models over the pool.
//!
//! Every operation validates its input first, then runs a single
//! parameterized statement. Parameters always go through driver-level
//! binding, never string interpolation. Each call acquires a pooled
//! connection for exactly the duration of its statement and returns it on
//! every exit path.

use crate::error::RepositoryError;
use records_domain::{Student, StudentDraft, validate_id};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use std::sync::Arc;
use tracing::debug;

/// Maps a raw row to the typed [`Student`] record, rejecting rows that fail
/// to decode.
fn student_from_row(row: &PgRow) -> Result<Student, sqlx::Error> {
    Ok(Student {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        age: row.try_get("age")?,
        grade: row.try_get("grade")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

/// Per-grade aggregate returned by [`StudentRepository::count_by_grade`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradeStats {
    pub grade: String,
    pub count: i64,
    /// Mean age within the grade.
    pub avg_age: Decimal,
}

impl GradeStats {
    fn from_row(row: &PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            grade: row.try_get("grade")?,
            count: row.try_get("count")?,
            avg_age: row.try_get("avg_age")?,
        })
    }
}

/// Repository for student CRUD and search operations.
#[derive(Clone)]
pub struct StudentRepository {
    pool: Arc<PgPool>,
}

impl StudentRepository {
    /// Creates a new StudentRepository.
    #[must_use]
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// Returns all students ordered by name ascending.
    ///
    /// # Errors
    /// Returns [`RepositoryError::Storage`] if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Student>, RepositoryError> {
        let rows = sqlx::query("SELECT * FROM students ORDER BY name ASC")
            .fetch_all(self.pool.as_ref())
            .await?;
        Ok(rows
            .iter()
            .map(student_from_row)
            .collect::<Result<_, _>>()?)
    }

    /// Finds a student by id. Absence is `Ok(None)`, never an error.
    ///
    /// # Errors
    /// Returns [`RepositoryError::Storage`] if the query fails.
    pub async fn get(&self, id: i32) -> Result<Option<Student>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM students WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;
        Ok(row.as_ref().map(student_from_row).transpose()?)
    }

    /// Validates the draft and inserts a new student, returning the created
    /// row including its generated id.
    ///
    /// # Errors
    /// Returns [`RepositoryError::Validation`] for a rejected draft (zero
    /// side effects) or [`RepositoryError::Storage`] if the insert fails.
    pub async fn add(&self, draft: &StudentDraft) -> Result<Student, RepositoryError> {
        let valid = draft.validate()?;

        let row = sqlx::query(
            r#"
            INSERT INTO students (name, age, grade)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(&valid.name)
        .bind(valid.age)
        .bind(&valid.grade)
        .fetch_one(self.pool.as_ref())
        .await?;

        let student = student_from_row(&row)?;
        debug!(id = student.id, "student added");
        Ok(student)
    }

    /// Validates and applies a full replacement of name/age/grade, refreshing
    /// `updated_at`.
    ///
    /// Runs as a single statement; a zero-row update means the id does not
    /// exist (or a concurrent delete won), which is reported as
    /// [`RepositoryError::NotFound`]. There is no separate existence check,
    /// so there is no check-then-act window.
    ///
    /// # Errors
    /// `Validation` for a bad id or draft, `NotFound` for a missing row,
    /// `Storage` if the statement fails.
    pub async fn update(&self, id: i32, draft: &StudentDraft) -> Result<Student, RepositoryError> {
        validate_id(id)?;
        let valid = draft.validate()?;

        let row = sqlx::query(
            r#"
            UPDATE students
            SET name = $1, age = $2, grade = $3, updated_at = now()
            WHERE id = $4
            RETURNING *
            "#,
        )
        .bind(&valid.name)
        .bind(valid.age)
        .bind(&valid.grade)
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        match row {
            Some(row) => {
                let student = student_from_row(&row)?;
                debug!(id, "student updated");
                Ok(student)
            }
            None => Err(RepositoryError::NotFound { id }),
        }
    }

    /// Deletes a student. Hard delete, no tombstone.
    ///
    /// # Errors
    /// `Validation` for a non-positive id, `NotFound` if no row was deleted,
    /// `Storage` if the statement fails.
    pub async fn delete(&self, id: i32) -> Result<(), RepositoryError> {
        validate_id(id)?;

        let result = sqlx::query("DELETE FROM students WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound { id });
        }
        debug!(id, "student deleted");
        Ok(())
    }

    /// Case-insensitive substring search over name, grade, and the textual
    /// rendering of age and id. A blank term returns the full listing.
    ///
    /// # Errors
    /// Returns [`RepositoryError::Storage`] if the query fails.
    pub async fn search(&self, term: &str) -> Result<Vec<Student>, RepositoryError> {
        let term = term.trim();
        if term.is_empty() {
            return self.list_all().await;
        }

        let pattern = format!("%{}%", escape_like(term));
        let rows = sqlx::query(
            r#"
            SELECT * FROM students
            WHERE name ILIKE $1
               OR grade ILIKE $1
               OR age::TEXT LIKE $1
               OR id::TEXT LIKE $1
            ORDER BY name ASC
            "#,
        )
        .bind(&pattern)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows
            .iter()
            .map(student_from_row)
            .collect::<Result<_, _>>()?)
    }

    /// Returns count and mean age per distinct grade, ordered by grade
    /// ascending. Empty table yields an empty vec.
    ///
    /// # Errors
    /// Returns [`RepositoryError::Storage`] if the query fails.
    pub async fn count_by_grade(&self) -> Result<Vec<GradeStats>, RepositoryError> {
        let rows = sqlx::query(
            r#"
            SELECT grade, COUNT(*) AS count, AVG(age) AS avg_age
            FROM students
            GROUP BY grade
            ORDER BY grade ASC
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows
            .iter()
            .map(GradeStats::from_row)
            .collect::<Result<_, _>>()?)
    }

    /// Returns all students with exactly the given grade, ordered by name.
    ///
    /// # Errors
    /// Returns [`RepositoryError::Storage`] if the query fails.
    pub async fn list_by_grade(&self, grade: &str) -> Result<Vec<Student>, RepositoryError> {
        let rows = sqlx::query("SELECT * FROM students WHERE grade = $1 ORDER BY name ASC")
            .bind(grade)
            .fetch_all(self.pool.as_ref())
            .await?;
        Ok(rows
            .iter()
            .map(student_from_row)
            .collect::<Result<_, _>>()?)
    }

    /// Returns the total number of students.
    ///
    /// # Errors
    /// Returns [`RepositoryError::Storage`] if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let row = sqlx::query("SELECT COUNT(*) FROM students")
            .fetch_one(self.pool.as_ref())
            .await?;
        Ok(row.try_get(0)?)
    }
}

/// Escapes LIKE metacharacters so a user-supplied term matches literally.
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use records_domain::ValidationError;

    #[test]
    fn test_escape_like_passes_plain_terms() {
        assert_eq!(escape_like("alice"), "alice");
        assert_eq!(escape_like("10A"), "10A");
    }

    #[test]
    fn test_escape_like_metacharacters() {
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("a_b"), "a\\_b");
        assert_eq!(escape_like("back\\slash"), "back\\\\slash");
    }

    // Validation runs before any connection is acquired, so these reject
    // without a database behind the pool.
    #[tokio::test]
    async fn test_update_rejects_bad_id_before_touching_pool() {
        let pool = PgPool::connect_lazy("postgres://localhost/unused").unwrap();
        let repo = StudentRepository::new(Arc::new(pool));
        let draft = StudentDraft::new("Alice", 15, "10A");
        match repo.update(0, &draft).await {
            Err(RepositoryError::Validation(ValidationError::InvalidId)) => {}
            other => panic!("expected InvalidId, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_add_rejects_invalid_draft_before_touching_pool() {
        let pool = PgPool::connect_lazy("postgres://localhost/unused").unwrap();
        let repo = StudentRepository::new(Arc::new(pool));
        let draft = StudentDraft::new("", 15, "10A");
        match repo.add(&draft).await {
            Err(RepositoryError::Validation(ValidationError::MissingField("name"))) => {}
            other => panic!("expected missing name, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_delete_rejects_negative_id_before_touching_pool() {
        let pool = PgPool::connect_lazy("postgres://localhost/unused").unwrap();
        let repo = StudentRepository::new(Arc::new(pool));
        match repo.delete(-3).await {
            Err(RepositoryError::Validation(ValidationError::InvalidId)) => {}
            other => panic!("expected InvalidId, got {other:?}"),
        }
    }
}
