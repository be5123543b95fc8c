//! Test utilities for content fixtures.
//!
//! Provides a scratch content directory laid out exactly like production,
//! so tests exercise the real path functions instead of hardcoded strings.

use std::fs;
use std::path::Path;
use tempfile::TempDir;

use crate::paths;

/// Fixture lesson with one exercise of each type.
///
/// Answers: `mc1` -> 1, `fb1` -> "ein", `dd1` -> [1, 2, 0], `fc1` -> any rating.
pub fn sample_lesson_json(title: &str) -> String {
    serde_json::json!({
        "title": title,
        "description": "Fixture lesson",
        "exercises": [
            {
                "type": "multiple_choice",
                "id": "mc1",
                "prompt": "Which one is a cat?",
                "options": ["Hund", "Katze", "Vogel"],
                "answer": 1
            },
            {
                "type": "fill_blank",
                "id": "fb1",
                "sentence": "Das ist ___ Haus.",
                "answers": ["ein"]
            },
            {
                "type": "drag_drop",
                "id": "dd1",
                "prompt": "Build the sentence",
                "items": ["Anna", "Ich", "bin"],
                "order": [1, 2, 0]
            },
            {
                "type": "flashcard",
                "id": "fc1",
                "front": "Wasser",
                "back": "water"
            }
        ]
    })
    .to_string()
}

/// Test environment with a temporary content directory.
///
/// The directory is removed when the environment is dropped.
pub struct TestEnv {
    /// Temporary directory (kept alive for file persistence)
    pub temp: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp dir");
        Self { temp }
    }

    /// Root of the lesson content tree.
    pub fn content_dir(&self) -> &Path {
        self.temp.path()
    }

    /// Write the sample lesson at the path the locator resolves to.
    pub fn write_lesson(&self, language: &str, local: u32, title: &str) {
        self.write_raw(language, &paths::lesson_file_name(local), &sample_lesson_json(title));
    }

    /// Write arbitrary contents into a language directory.
    pub fn write_raw(&self, language: &str, file_name: &str, contents: &str) {
        let dir = paths::language_dir(self.content_dir(), language);
        fs::create_dir_all(&dir).expect("Failed to create language dir");
        fs::write(dir.join(file_name), contents).expect("Failed to write fixture");
    }
}
