//! Route definitions.

use crate::handlers;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Builds the application router.
///
/// CORS is permissive and applies to the `/api` subtree only; request tracing
/// covers everything.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/students",
            get(handlers::list_students).post(handlers::create_student),
        )
        .route("/students/search", get(handlers::search_students))
        .route("/students/stats", get(handlers::grade_stats))
        .route("/students/grade/{grade}", get(handlers::students_by_grade))
        .route(
            "/students/{id}",
            get(handlers::get_student)
                .put(handlers::update_student)
                .delete(handlers::delete_student),
        )
        .layer(cors);

    Router::new()
        .route("/", get(handlers::index))
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
