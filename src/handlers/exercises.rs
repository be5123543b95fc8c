//! Exercise answer checking.

use axum::Json;
use axum::extract::{Path, State};
use serde::Deserialize;

use crate::content;
use crate::error::AppError;
use crate::grading::{self, AnswerSubmission, LessonReport};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CheckRequest {
    pub answers: Vec<AnswerSubmission>,
}

/// Grade submitted answers for one lesson.
pub async fn check_lesson(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<CheckRequest>,
) -> Result<Json<LessonReport>, AppError> {
    let location = state.catalog.locate(id)?;
    let lesson = content::load_lesson(&state.content_dir, &location).await?;
    let report = grading::grade_lesson(&lesson, &request.answers)?;

    tracing::debug!(
        "Lesson {}: {}/{} passed",
        location.global_id,
        report.passed,
        report.answered
    );

    Ok(Json(report))
}
