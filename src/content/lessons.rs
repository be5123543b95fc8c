//! Loading and listing lesson files.

use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::Path;

use super::exercises::{Exercise, validate_exercises};
use super::ContentError;
use crate::locator::{Catalog, LessonLocation};
use crate::paths;

/// Lesson file contents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub exercises: Vec<Exercise>,
}

/// Listing entry: where a lesson sits plus enough to render a row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonSummary {
    #[serde(flatten)]
    pub location: LessonLocation,
    pub title: String,
    pub exercise_count: usize,
}

/// Listing order by local lesson number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl std::str::FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            _ => Err(format!("Invalid sort order: {}", s)),
        }
    }
}

/// Listing filters.
#[derive(Debug, Clone, Default)]
pub struct LessonFilter {
    /// Exact tier label
    pub tier: Option<String>,
    /// Case-insensitive title substring
    pub search: Option<String>,
    pub sort: SortOrder,
}

impl LessonFilter {
    fn matches_title(&self, title: &str) -> bool {
        match &self.search {
            Some(needle) => title.to_lowercase().contains(&needle.to_lowercase()),
            None => true,
        }
    }
}

/// Load the lesson file for a resolved location.
pub async fn load_lesson(
    content_dir: &Path,
    location: &LessonLocation,
) -> Result<Lesson, ContentError> {
    let path = paths::lesson_path(
        content_dir,
        &location.language_code,
        location.local_lesson_number,
    );

    let content = match tokio::fs::read_to_string(&path).await {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(ContentError::NotFound(path.display().to_string()));
        }
        Err(e) => {
            return Err(ContentError::IoError(
                path.display().to_string(),
                e.to_string(),
            ));
        }
    };

    parse_lesson(&path, &content)
}

fn parse_lesson(path: &Path, content: &str) -> Result<Lesson, ContentError> {
    let lesson: Lesson = serde_json::from_str(content)
        .map_err(|e| ContentError::ParseError(path.display().to_string(), e.to_string()))?;

    validate_exercises(&lesson.exercises)
        .map_err(|e| ContentError::InvalidExercise(path.display().to_string(), e))?;

    Ok(lesson)
}

/// List the lessons present on disk for one language.
///
/// Every entry is classified through `catalog`. Stray files (names that are
/// not lesson numbers, numbers outside the language's range, unreadable or
/// invalid JSON) are skipped with a warning so one bad file does not hide the
/// rest of the listing.
pub async fn list_lessons(
    content_dir: &Path,
    catalog: &Catalog,
    language: &str,
    filter: &LessonFilter,
) -> Result<Vec<LessonSummary>, ContentError> {
    // Unknown language is an error even when no directory exists
    catalog.global_id(language, 1)?;

    let dir = paths::language_dir(content_dir, language);
    let mut entries = match tokio::fs::read_dir(&dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => {
            return Err(ContentError::IoError(
                dir.display().to_string(),
                e.to_string(),
            ));
        }
    };

    let mut lessons = Vec::new();

    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| ContentError::IoError(dir.display().to_string(), e.to_string()))?
    {
        let path = entry.path();

        // Skip non-JSON files
        if path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }

        // Canonical names only, matching paths::lesson_path
        let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("");
        let Some(local) = paths::parse_lesson_number(stem) else {
            tracing::warn!("Skipping {}: not a lesson file name", path.display());
            continue;
        };

        let global_id = match catalog.global_id(language, local) {
            Ok(id) => id,
            Err(e) => {
                tracing::warn!("Skipping {}: {}", path.display(), e);
                continue;
            }
        };
        let location = catalog.locate(i64::from(global_id))?;

        if filter.tier.as_ref().is_some_and(|tier| *tier != location.tier) {
            continue;
        }

        let lesson = match tokio::fs::read_to_string(&path).await {
            Ok(content) => parse_lesson(&path, &content),
            Err(e) => Err(ContentError::IoError(path.display().to_string(), e.to_string())),
        };
        let lesson = match lesson {
            Ok(lesson) => lesson,
            Err(e) => {
                tracing::warn!("Skipping lesson: {}", e);
                continue;
            }
        };

        if !filter.matches_title(&lesson.title) {
            continue;
        }

        lessons.push(LessonSummary {
            location,
            title: lesson.title,
            exercise_count: lesson.exercises.len(),
        });
    }

    lessons.sort_by_key(|l| l.location.local_lesson_number);
    if filter.sort == SortOrder::Desc {
        lessons.reverse();
    }

    Ok(lessons)
}
