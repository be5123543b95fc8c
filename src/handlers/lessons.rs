//! Lesson lookup and listing handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use serde::{Deserialize, Serialize};

use crate::content::{self, Lesson, LessonFilter, LessonSummary, SortOrder};
use crate::error::AppError;
use crate::locator::LessonLocation;
use crate::state::AppState;

/// Lesson location plus file contents.
#[derive(Debug, Serialize)]
pub struct LessonResponse {
    pub location: LessonLocation,
    pub lesson: Lesson,
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub tier: Option<String>,
    pub search: Option<String>,
    pub sort: Option<String>,
}

impl ListQuery {
    fn into_filter(self) -> Result<LessonFilter, AppError> {
        let sort = match self.sort.as_deref() {
            Some(s) => s.parse::<SortOrder>().map_err(AppError::BadRequest)?,
            None => SortOrder::default(),
        };
        Ok(LessonFilter {
            tier: self.tier.filter(|t| !t.is_empty()),
            search: self.search.filter(|s| !s.trim().is_empty()),
            sort,
        })
    }
}

/// Resolve a global lesson id without touching content.
pub async fn locate_lesson(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<LessonLocation>, AppError> {
    let location = state.catalog.locate(id)?;
    tracing::debug!(
        "Lesson {} -> {}/{} ({})",
        id,
        location.language_code,
        location.local_lesson_number,
        location.tier
    );
    Ok(Json(location))
}

/// Load one lesson by global id.
pub async fn get_lesson(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<LessonResponse>, AppError> {
    let location = state.catalog.locate(id)?;
    let lesson = content::load_lesson(&state.content_dir, &location).await?;
    Ok(Json(LessonResponse { location, lesson }))
}

/// List one language's lessons, optionally filtered and sorted.
pub async fn list_language_lessons(
    State(state): State<AppState>,
    Path(code): Path<String>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<LessonSummary>>, AppError> {
    let filter = query.into_filter()?;
    let lessons = content::list_lessons(&state.content_dir, &state.catalog, &code, &filter).await?;
    tracing::debug!("Listed {} lessons for {}", lessons.len(), code);
    Ok(Json(lessons))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(tier: Option<&str>, search: Option<&str>, sort: Option<&str>) -> ListQuery {
        ListQuery {
            tier: tier.map(String::from),
            search: search.map(String::from),
            sort: sort.map(String::from),
        }
    }

    #[test]
    fn test_query_defaults() {
        let filter = query(None, None, None).into_filter().unwrap();
        assert_eq!(filter.sort, SortOrder::Asc);
        assert!(filter.tier.is_none());
    }

    #[test]
    fn test_query_blank_values_ignored() {
        let filter = query(Some(""), Some("  "), Some("desc")).into_filter().unwrap();
        assert!(filter.tier.is_none());
        assert!(filter.search.is_none());
        assert_eq!(filter.sort, SortOrder::Desc);
    }

    #[test]
    fn test_query_bad_sort() {
        let result = query(None, None, Some("random")).into_filter();
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }
}
