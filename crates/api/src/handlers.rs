//! Request handlers.
//!
//! Handlers parse the request, call exactly one repository operation, and
//! serialize the result; everything else (status mapping, CORS, tracing) is
//! layered around them.

use crate::error::ApiError;
use crate::models::{HealthResponse, MessageResponse, SearchParams, StudentPayload};
use crate::state::AppState;
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use records_data::GradeStats;
use records_domain::{Student, StudentDraft};
use tracing::warn;

/// `GET /`
pub async fn index() -> &'static str {
    "Welcome to Student Management System API"
}

/// `GET /api/health`
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    match state.db.ping().await {
        Ok(version) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "ok",
                database: Some(version),
            }),
        ),
        Err(err) => {
            warn!(%err, "health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    status: "unavailable",
                    database: None,
                }),
            )
        }
    }
}

/// `GET /api/students`
pub async fn list_students(
    State(state): State<AppState>,
) -> Result<Json<Vec<Student>>, ApiError> {
    let students = state.db.students().list_all().await?;
    Ok(Json(students))
}

/// `GET /api/students/{id}`
pub async fn get_student(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Student>, ApiError> {
    let student = state
        .db
        .students()
        .get(id)
        .await?
        .ok_or(ApiError::NotFound(id))?;
    Ok(Json(student))
}

/// Unwraps the JSON body, turning a missing or malformed body into a 400
/// rather than axum's default 422. A payload that fails to parse is a
/// validation failure like any other.
fn require_payload(
    payload: Result<Json<StudentPayload>, JsonRejection>,
) -> Result<StudentPayload, ApiError> {
    match payload {
        Ok(Json(payload)) => Ok(payload),
        Err(rejection) => Err(ApiError::BadRequest(rejection.body_text())),
    }
}

/// `POST /api/students`
pub async fn create_student(
    State(state): State<AppState>,
    payload: Result<Json<StudentPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<Student>), ApiError> {
    let draft: StudentDraft = require_payload(payload)?.into();
    let student = state.db.students().add(&draft).await?;
    Ok((StatusCode::CREATED, Json(student)))
}

/// `PUT /api/students/{id}`
pub async fn update_student(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    payload: Result<Json<StudentPayload>, JsonRejection>,
) -> Result<Json<Student>, ApiError> {
    let draft: StudentDraft = require_payload(payload)?.into();
    let student = state.db.students().update(id, &draft).await?;
    Ok(Json(student))
}

/// `DELETE /api/students/{id}`
pub async fn delete_student(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.db.students().delete(id).await?;
    Ok(Json(MessageResponse::ok("Student deleted successfully")))
}

/// `GET /api/students/search?q=term`
///
/// A blank or missing `q` is a client error at this boundary. The repository
/// itself treats a blank term as "list everything"; rejecting here preserves
/// both layer contracts.
pub async fn search_students(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Student>>, ApiError> {
    let term = params.q.unwrap_or_default();
    if term.trim().is_empty() {
        return Err(ApiError::BadRequest("Search term is required".to_string()));
    }
    let students = state.db.students().search(&term).await?;
    Ok(Json(students))
}

/// `GET /api/students/stats`
pub async fn grade_stats(
    State(state): State<AppState>,
) -> Result<Json<Vec<GradeStats>>, ApiError> {
    let stats = state.db.students().count_by_grade().await?;
    Ok(Json(stats))
}

/// `GET /api/students/grade/{grade}`
pub async fn students_by_grade(
    State(state): State<AppState>,
    Path(grade): Path<String>,
) -> Result<Json<Vec<Student>>, ApiError> {
    let students = state.db.students().list_by_grade(&grade).await?;
    Ok(Json(students))
}
