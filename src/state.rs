//! Application state shared by all handlers.

use std::path::PathBuf;
use std::sync::Arc;

use crate::locator::Catalog;

/// Application state passed to all handlers
#[derive(Clone)]
pub struct AppState {
    /// Validated range table, shared read-only
    pub catalog: Arc<Catalog>,

    /// Root of the lesson content tree
    pub content_dir: PathBuf,
}

impl AppState {
    pub fn new(catalog: Catalog, content_dir: PathBuf) -> Self {
        Self {
            catalog: Arc::new(catalog),
            content_dir,
        }
    }
}
