//! Shared fixtures for HTTP tests.

use axum_test::TestServer;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

use lingora::handlers;
use lingora::locator::Catalog;
use lingora::paths;
use lingora::state::AppState;

pub struct TestApp {
    pub server: TestServer,
    /// Holds the content and static directories alive
    pub root: TempDir,
}

impl TestApp {
    pub fn new() -> Self {
        let root = TempDir::new().unwrap();
        let content_dir = root.path().join("lessons");
        let static_dir = root.path().join("static");
        fs::create_dir_all(&content_dir).unwrap();
        fs::create_dir_all(&static_dir).unwrap();
        fs::write(static_dir.join("index.html"), "<h1>Lingora</h1>").unwrap();

        let state = AppState::new(Catalog::builtin(), content_dir);
        let server = TestServer::new(handlers::router(state, &static_dir)).unwrap();
        Self { server, root }
    }

    pub fn content_dir(&self) -> PathBuf {
        self.root.path().join("lessons")
    }

    pub fn write_raw(&self, language: &str, file_name: &str, contents: &str) {
        let dir = paths::language_dir(&self.content_dir(), language);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(file_name), contents).unwrap();
    }

    pub fn write_lesson(&self, language: &str, local: u32, title: &str) {
        self.write_raw(language, &paths::lesson_file_name(local), &lesson_json(title));
    }
}

/// Lesson with one exercise of each type.
pub fn lesson_json(title: &str) -> String {
    serde_json::json!({
        "title": title,
        "exercises": [
            {"type": "multiple_choice", "id": "mc1", "prompt": "猫?", "options": ["dog", "cat"], "answer": 1},
            {"type": "fill_blank", "id": "fb1", "sentence": "わたし___がくせいです", "answers": ["は"]},
            {"type": "drag_drop", "id": "dd1", "prompt": "Order", "items": ["です", "わたし", "は"], "order": [1, 2, 0]},
            {"type": "flashcard", "id": "fc1", "front": "水", "back": "water"}
        ]
    })
    .to_string()
}
