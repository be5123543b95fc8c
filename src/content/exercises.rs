//! Exercise types for the quiz widgets.
//!
//! Each lesson carries a mixed list of exercises. The frontend renders one
//! widget per type; the backend validates the definitions on load and grades
//! submitted answers (see [`crate::grading`]).

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Marker for the gap in a fill-in-the-blank sentence.
pub const BLANK_MARKER: &str = "___";

/// Type of exercise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseType {
    MultipleChoice,
    FillBlank,
    DragDrop,
    Flashcard,
}

impl ExerciseType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MultipleChoice => "multiple_choice",
            Self::FillBlank => "fill_blank",
            Self::DragDrop => "drag_drop",
            Self::Flashcard => "flashcard",
        }
    }
}

impl std::fmt::Display for ExerciseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single exercise definition (from lesson JSON).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum Exercise {
    /// Pick one option; `answer` is the index of the correct option
    MultipleChoice {
        id: String,
        prompt: String,
        options: Vec<String>,
        answer: usize,
        #[serde(default)]
        explanation: Option<String>,
    },
    /// Type the word missing at `___`; any entry in `answers` is accepted
    FillBlank {
        id: String,
        sentence: String,
        answers: Vec<String>,
        #[serde(default)]
        hint: Option<String>,
        #[serde(default)]
        translation: Option<String>,
    },
    /// Arrange `items`; `order` lists item indices in the correct sequence
    DragDrop {
        id: String,
        prompt: String,
        items: Vec<String>,
        order: Vec<usize>,
    },
    /// Self-rated card
    Flashcard {
        id: String,
        front: String,
        back: String,
        #[serde(default)]
        reading: Option<String>,
    },
}

impl Exercise {
    pub fn id(&self) -> &str {
        match self {
            Exercise::MultipleChoice { id, .. }
            | Exercise::FillBlank { id, .. }
            | Exercise::DragDrop { id, .. }
            | Exercise::Flashcard { id, .. } => id,
        }
    }

    pub fn exercise_type(&self) -> ExerciseType {
        match self {
            Exercise::MultipleChoice { .. } => ExerciseType::MultipleChoice,
            Exercise::FillBlank { .. } => ExerciseType::FillBlank,
            Exercise::DragDrop { .. } => ExerciseType::DragDrop,
            Exercise::Flashcard { .. } => ExerciseType::Flashcard,
        }
    }
}

/// Validate an exercise definition.
pub fn validate_exercise(ex: &Exercise) -> Result<(), String> {
    if ex.id().is_empty() {
        return Err("Exercise missing ID".to_string());
    }

    match ex {
        Exercise::MultipleChoice { id, options, answer, .. } => {
            if options.len() < 2 {
                return Err(format!("Multiple choice {} needs at least two options", id));
            }
            if *answer >= options.len() {
                return Err(format!("Multiple choice {} answer {} is not an option", id, answer));
            }
        }
        Exercise::FillBlank { id, sentence, answers, .. } => {
            if !sentence.contains(BLANK_MARKER) {
                return Err(format!("Fill blank {} sentence has no {}", id, BLANK_MARKER));
            }
            if answers.is_empty() || answers.iter().any(|a| a.trim().is_empty()) {
                return Err(format!("Fill blank {} has an empty answer list or answer", id));
            }
        }
        Exercise::DragDrop { id, items, order, .. } => {
            if items.len() < 2 {
                return Err(format!("Drag and drop {} needs at least two items", id));
            }
            let mut sorted = order.clone();
            sorted.sort_unstable();
            if sorted != (0..items.len()).collect::<Vec<_>>() {
                return Err(format!("Drag and drop {} order is not a permutation of its items", id));
            }
        }
        Exercise::Flashcard { id, front, back, .. } => {
            if front.trim().is_empty() || back.trim().is_empty() {
                return Err(format!("Flashcard {} has an empty face", id));
            }
        }
    }

    Ok(())
}

/// Validate every exercise in a lesson, including id uniqueness.
pub fn validate_exercises(exercises: &[Exercise]) -> Result<(), String> {
    let mut seen = HashSet::new();
    for ex in exercises {
        validate_exercise(ex)?;
        if !seen.insert(ex.id()) {
            return Err(format!("Duplicate exercise id {}", ex.id()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mc(id: &str, options: &[&str], answer: usize) -> Exercise {
        Exercise::MultipleChoice {
            id: id.to_string(),
            prompt: "?".to_string(),
            options: options.iter().map(|s| s.to_string()).collect(),
            answer,
            explanation: None,
        }
    }

    #[test]
    fn test_exercise_type_as_str() {
        assert_eq!(ExerciseType::MultipleChoice.as_str(), "multiple_choice");
        assert_eq!(ExerciseType::DragDrop.to_string(), "drag_drop");
    }

    #[test]
    fn test_parse_mixed_exercises() {
        let json = r#"[
            {"type": "multiple_choice", "id": "q1", "prompt": "「ねこ」は?", "options": ["dog", "cat"], "answer": 1},
            {"type": "fill_blank", "id": "q2", "sentence": "わたし___がくせいです", "answers": ["は"], "hint": "topic"},
            {"type": "drag_drop", "id": "q3", "prompt": "Order", "items": ["です", "わたし", "は"], "order": [1, 2, 0]},
            {"type": "flashcard", "id": "q4", "front": "水", "back": "water", "reading": "みず"}
        ]"#;

        let exercises: Vec<Exercise> = serde_json::from_str(json).unwrap();
        assert_eq!(exercises.len(), 4);
        assert_eq!(exercises[0].exercise_type(), ExerciseType::MultipleChoice);
        assert_eq!(exercises[1].id(), "q2");
        assert_eq!(exercises[3].exercise_type(), ExerciseType::Flashcard);
        assert!(validate_exercises(&exercises).is_ok());

        match &exercises[2] {
            Exercise::DragDrop { order, .. } => assert_eq!(order, &vec![1, 2, 0]),
            other => panic!("unexpected exercise {:?}", other),
        }
    }

    #[test]
    fn test_unknown_type_rejected() {
        let json = r#"{"type": "essay", "id": "q1", "prompt": "Write"}"#;
        assert!(serde_json::from_str::<Exercise>(json).is_err());
    }

    #[test]
    fn test_validate_multiple_choice() {
        assert!(validate_exercise(&mc("q1", &["a", "b"], 1)).is_ok());
        assert!(validate_exercise(&mc("q1", &["a", "b"], 2)).is_err());
        assert!(validate_exercise(&mc("q1", &["a"], 0)).is_err());
        assert!(validate_exercise(&mc("", &["a", "b"], 0)).is_err());
    }

    #[test]
    fn test_validate_fill_blank() {
        let ex = |sentence: &str, answers: Vec<&str>| Exercise::FillBlank {
            id: "q".to_string(),
            sentence: sentence.to_string(),
            answers: answers.into_iter().map(String::from).collect(),
            hint: None,
            translation: None,
        };
        assert!(validate_exercise(&ex("Ich ___ Anna", vec!["bin"])).is_ok());
        assert!(validate_exercise(&ex("Ich bin Anna", vec!["bin"])).is_err());
        assert!(validate_exercise(&ex("Ich ___ Anna", vec![])).is_err());
        assert!(validate_exercise(&ex("Ich ___ Anna", vec![" "])).is_err());
    }

    #[test]
    fn test_validate_drag_drop_order() {
        let ex = |order: Vec<usize>| Exercise::DragDrop {
            id: "q".to_string(),
            prompt: "Order".to_string(),
            items: vec!["a".into(), "b".into(), "c".into()],
            order,
        };
        assert!(validate_exercise(&ex(vec![2, 0, 1])).is_ok());
        assert!(validate_exercise(&ex(vec![0, 0, 1])).is_err());
        assert!(validate_exercise(&ex(vec![0, 1])).is_err());
        assert!(validate_exercise(&ex(vec![0, 1, 3])).is_err());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let exercises = vec![mc("q1", &["a", "b"], 0), mc("q1", &["c", "d"], 1)];
        let err = validate_exercises(&exercises).unwrap_err();
        assert!(err.contains("Duplicate"));
    }
}
