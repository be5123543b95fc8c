//! HTTP error type.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::content::ContentError;
use crate::grading::GradeError;
use crate::locator::LocateError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    /// Message is safe to show; details are logged at conversion time
    #[error("{0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

impl From<LocateError> for AppError {
    fn from(e: LocateError) -> Self {
        match e {
            LocateError::OutOfRange { .. } | LocateError::UnknownLanguage(_) => {
                AppError::NotFound(e.to_string())
            }
            LocateError::Configuration(_) => {
                tracing::error!("{}", e);
                AppError::Internal("Lesson catalog misconfigured".to_string())
            }
        }
    }
}

impl From<ContentError> for AppError {
    fn from(e: ContentError) -> Self {
        match e {
            ContentError::Locate(e) => e.into(),
            ContentError::NotFound(_) => AppError::NotFound(e.user_message()),
            _ => {
                tracing::error!("{}", e);
                AppError::Internal(e.user_message())
            }
        }
    }
}

impl From<GradeError> for AppError {
    fn from(e: GradeError) -> Self {
        AppError::BadRequest(e.to_string())
    }
}
