pub mod exercises;
pub mod languages;
pub mod lessons;

use axum::{Json, Router, routing::get, routing::post};
use serde_json::{Value, json};
use std::path::Path;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub use exercises::check_lesson;
pub use languages::list_languages;
pub use lessons::{get_lesson, list_language_lessons, locate_lesson};

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Build the application router.
///
/// `/api/*` serves JSON; everything else falls through to the frontend bundle
/// in `static_dir`.
pub fn router(state: AppState, static_dir: &Path) -> Router {
    let api = Router::new()
        .route("/health", get(health))
        .route("/languages", get(list_languages))
        .route("/languages/{code}/lessons", get(list_language_lessons))
        .route("/locate/{id}", get(locate_lesson))
        .route("/lessons/{id}", get(get_lesson))
        .route("/lessons/{id}/check", post(check_lesson))
        .with_state(state);

    Router::new()
        .nest("/api", api)
        .fallback_service(ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
}
