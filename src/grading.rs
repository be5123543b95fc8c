//! Answer grading for the quiz widgets.
//!
//! Text answers are compared after normalization, with typo tolerance that
//! scales with answer length. Choice, ordering and flashcard answers are
//! compared exactly.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use unicode_normalization::UnicodeNormalization;

use crate::content::{Exercise, ExerciseType, Lesson};

// ============================================================================
// Request / result types
// ============================================================================

/// Answer as submitted by the frontend widget.
///
/// Untagged: a number is a choice, an array is an ordering, a string is typed
/// text, a bool is a flashcard self-rating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SubmittedAnswer {
    Choice(usize),
    Order(Vec<usize>),
    Text(String),
    Rating(bool),
}

/// One answered exercise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerSubmission {
    pub exercise_id: String,
    pub answer: SubmittedAnswer,
}

/// Result of grading one answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerResult {
    Correct,
    /// Close enough (typo tolerance)
    CloseEnough,
    Incorrect,
}

impl AnswerResult {
    pub fn is_pass(&self) -> bool {
        matches!(self, AnswerResult::Correct | AnswerResult::CloseEnough)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Grade {
    pub exercise_id: String,
    pub result: AnswerResult,
    /// Human-readable correct answer
    pub expected: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonReport {
    pub results: Vec<Grade>,
    pub answered: usize,
    pub passed: usize,
    /// passed / answered, 0.0 when nothing was answered
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GradeError {
    UnknownExercise(String),
    /// Answer shape does not fit the exercise type
    ShapeMismatch { exercise_id: String, expected: ExerciseType },
}

impl std::fmt::Display for GradeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GradeError::UnknownExercise(id) => write!(f, "Unknown exercise: {}", id),
            GradeError::ShapeMismatch { exercise_id, expected } => {
                write!(f, "Answer for {} does not fit a {} exercise", exercise_id, expected)
            }
        }
    }
}

impl std::error::Error for GradeError {}

// ============================================================================
// Normalization
// ============================================================================

/// Normalize a typed answer for comparison.
///
/// - Unicode NFC (so composed and decomposed accents/hangul compare equal)
/// - Lowercase, trimmed
/// - Punctuation removed (Latin and CJK), apostrophes kept
/// - Internal whitespace collapsed
pub fn normalize_answer(input: &str) -> String {
    input
        .nfc()
        .collect::<String>()
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace() || *c == '\'')
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Calculate simple Levenshtein distance between two strings
fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    if a_chars.is_empty() {
        return b_chars.len();
    }
    if b_chars.is_empty() {
        return a_chars.len();
    }

    let mut prev: Vec<usize> = (0..=b_chars.len()).collect();
    let mut curr = vec![0usize; b_chars.len() + 1];

    for (i, a_char) in a_chars.iter().enumerate() {
        curr[0] = i + 1;
        for (j, b_char) in b_chars.iter().enumerate() {
            let cost = if a_char == b_char { 0 } else { 1 };
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b_chars.len()]
}

/// Typo tolerance based on answer length
fn max_typo_distance(answer: &str) -> usize {
    match answer.chars().count() {
        0..=2 => 0, // particles and single kana/hanzi must be exact
        3..=4 => 1,
        _ => 2,
    }
}

/// Grade typed text against the accepted answers.
pub fn grade_text(input: &str, accepted: &[String]) -> AnswerResult {
    let normalized_input = normalize_answer(input);
    if normalized_input.is_empty() {
        return AnswerResult::Incorrect;
    }

    let normalized: Vec<String> = accepted.iter().map(|a| normalize_answer(a)).collect();

    if normalized.contains(&normalized_input) {
        return AnswerResult::Correct;
    }

    let close = normalized.iter().any(|answer| {
        let distance = levenshtein_distance(&normalized_input, answer);
        distance > 0 && distance <= max_typo_distance(answer)
    });

    if close {
        AnswerResult::CloseEnough
    } else {
        AnswerResult::Incorrect
    }
}

// ============================================================================
// Exercise grading
// ============================================================================

/// Grade one answer against its exercise.
pub fn grade(exercise: &Exercise, answer: &SubmittedAnswer) -> Result<Grade, GradeError> {
    let mismatch = || GradeError::ShapeMismatch {
        exercise_id: exercise.id().to_string(),
        expected: exercise.exercise_type(),
    };

    let (result, expected) = match (exercise, answer) {
        (
            Exercise::MultipleChoice {
                options,
                answer: correct,
                ..
            },
            SubmittedAnswer::Choice(choice),
        ) => {
            let result = if choice == correct {
                AnswerResult::Correct
            } else {
                AnswerResult::Incorrect
            };
            (result, options.get(*correct).cloned().unwrap_or_default())
        }
        (Exercise::FillBlank { answers, .. }, SubmittedAnswer::Text(text)) => {
            (grade_text(text, answers), answers.first().cloned().unwrap_or_default())
        }
        (Exercise::DragDrop { items, order, .. }, SubmittedAnswer::Order(submitted)) => {
            let result = if submitted == order {
                AnswerResult::Correct
            } else {
                AnswerResult::Incorrect
            };
            let expected = order
                .iter()
                .filter_map(|&i| items.get(i).map(String::as_str))
                .collect::<Vec<_>>()
                .join(" ");
            (result, expected)
        }
        (Exercise::Flashcard { back, .. }, SubmittedAnswer::Rating(knew_it)) => {
            let result = if *knew_it {
                AnswerResult::Correct
            } else {
                AnswerResult::Incorrect
            };
            (result, back.clone())
        }
        _ => return Err(mismatch()),
    };

    Ok(Grade {
        exercise_id: exercise.id().to_string(),
        result,
        expected,
    })
}

/// Grade a batch of answers for one lesson.
///
/// Unknown exercise ids and mismatched answer shapes fail the whole batch.
pub fn grade_lesson(
    lesson: &Lesson,
    submissions: &[AnswerSubmission],
) -> Result<LessonReport, GradeError> {
    let by_id: HashMap<&str, &Exercise> =
        lesson.exercises.iter().map(|ex| (ex.id(), ex)).collect();

    let results = submissions
        .iter()
        .map(|sub| {
            let exercise = by_id
                .get(sub.exercise_id.as_str())
                .ok_or_else(|| GradeError::UnknownExercise(sub.exercise_id.clone()))?;
            grade(exercise, &sub.answer)
        })
        .collect::<Result<Vec<_>, _>>()?;

    let answered = results.len();
    let passed = results.iter().filter(|g| g.result.is_pass()).count();
    let score = if answered == 0 {
        0.0
    } else {
        passed as f64 / answered as f64
    };

    Ok(LessonReport {
        results,
        answered,
        passed,
        score,
    })
}
