//! Application configuration.
//!
//! Values are resolved with priority: config.toml > environment (.env) > default.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::locator::{Catalog, LanguageRange, LocateError};
use crate::paths;

/// Configuration file read from the working directory
pub const CONFIG_FILE: &str = "config.toml";

// ==================== Server Configuration ====================

/// Server address to bind to
pub const DEFAULT_SERVER_ADDR: &str = "0.0.0.0";

/// Server port
pub const DEFAULT_SERVER_PORT: u16 = 3000;

/// Directory with the built frontend bundle
pub const DEFAULT_STATIC_DIR: &str = "static";

// ==================== File structure ====================

/// Configuration file structure for config.toml
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    server: Option<ServerSection>,
    content: Option<ContentSection>,
    /// Replaces the builtin range table when present
    languages: Option<Vec<LanguageRange>>,
}

#[derive(Debug, Default, Deserialize)]
struct ServerSection {
    addr: Option<String>,
    port: Option<u16>,
}

#[derive(Debug, Default, Deserialize)]
struct ContentSection {
    dir: Option<String>,
    static_dir: Option<String>,
}

/// Resolved configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub addr: String,
    pub port: u16,
    pub content_dir: PathBuf,
    pub static_dir: PathBuf,
    pub languages: Option<Vec<LanguageRange>>,
}

impl Config {
    /// Load configuration from config.toml, .env and the process environment.
    pub fn load() -> Self {
        // Load .env file if present
        let _ = dotenvy::dotenv();

        let file = read_file_config(Path::new(CONFIG_FILE));
        Self::resolve(file, |key| std::env::var(key).ok())
    }

    fn resolve(file: FileConfig, env: impl Fn(&str) -> Option<String>) -> Self {
        let server = file.server.unwrap_or_default();
        let content = file.content.unwrap_or_default();

        let addr = server
            .addr
            .or_else(|| env("LINGORA_ADDR"))
            .unwrap_or_else(|| DEFAULT_SERVER_ADDR.to_string());

        let port = server
            .port
            .or_else(|| {
                let raw = env("PORT")?;
                raw.parse()
                    .map_err(|e| tracing::warn!("Invalid PORT value '{}': {}", raw, e))
                    .ok()
            })
            .unwrap_or(DEFAULT_SERVER_PORT);

        let content_dir = content
            .dir
            .or_else(|| env("CONTENT_DIR"))
            .unwrap_or_else(paths::default_content_dir);

        let static_dir = content
            .static_dir
            .or_else(|| env("STATIC_DIR"))
            .unwrap_or_else(|| DEFAULT_STATIC_DIR.to_string());

        Self {
            addr,
            port,
            content_dir: PathBuf::from(content_dir),
            static_dir: PathBuf::from(static_dir),
            languages: file.languages,
        }
    }

    /// Get the full server bind address
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.addr, self.port)
    }

    /// Build the range catalog: the configured table if any, else the builtin one.
    pub fn catalog(&self) -> Result<Catalog, LocateError> {
        match &self.languages {
            Some(ranges) => {
                tracing::info!("Using language ranges from {}", CONFIG_FILE);
                Catalog::new(ranges.clone())
            }
            None => Ok(Catalog::builtin()),
        }
    }
}

fn read_file_config(path: &Path) -> FileConfig {
    let Ok(contents) = std::fs::read_to_string(path) else {
        return FileConfig::default();
    };
    match toml::from_str::<FileConfig>(&contents) {
        Ok(config) => {
            tracing::info!("Loaded configuration from {}", path.display());
            config
        }
        Err(e) => {
            tracing::warn!("Ignoring invalid {}: {}", path.display(), e);
            FileConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::resolve(FileConfig::default(), env_of(&[]));
        assert_eq!(config.bind_addr(), "0.0.0.0:3000");
        assert!(config.content_dir.ends_with("lessons"));
        assert_eq!(config.static_dir, PathBuf::from("static"));
        assert!(config.languages.is_none());
    }

    #[test]
    fn test_env_overrides_defaults() {
        let env = env_of(&[("PORT", "8080"), ("CONTENT_DIR", "/srv/lessons")]);
        let config = Config::resolve(FileConfig::default(), env);
        assert_eq!(config.port, 8080);
        assert_eq!(config.content_dir, PathBuf::from("/srv/lessons"));
    }

    #[test]
    fn test_invalid_port_falls_back() {
        let config = Config::resolve(FileConfig::default(), env_of(&[("PORT", "http")]));
        assert_eq!(config.port, DEFAULT_SERVER_PORT);
    }

    #[test]
    fn test_file_overrides_env() {
        let file: FileConfig = toml::from_str(
            r#"
            [server]
            port = 4000

            [content]
            dir = "fixtures/lessons"
            "#,
        )
        .unwrap();
        let env = env_of(&[("PORT", "8080"), ("CONTENT_DIR", "/srv/lessons")]);
        let config = Config::resolve(file, env);
        assert_eq!(config.port, 4000);
        assert_eq!(config.content_dir, PathBuf::from("fixtures/lessons"));
    }

    #[test]
    fn test_languages_override() {
        let file: FileConfig = toml::from_str(
            r#"
            [[languages]]
            code = "it"
            startId = 1
            endId = 10
            tiers = [{ label = "beginner", maxLocal = 5 }, { label = "expert" }]

            [[languages]]
            code = "pt"
            startId = 11
            endId = 20
            tiers = [{ label = "all" }]
            "#,
        )
        .unwrap();
        let config = Config::resolve(file, env_of(&[]));
        let catalog = config.catalog().unwrap();
        assert_eq!(catalog.max_id(), 20);
        assert_eq!(catalog.locate(12).unwrap().language_code, "pt");
    }

    #[test]
    fn test_languages_override_rejects_gap() {
        let file: FileConfig = toml::from_str(
            r#"
            [[languages]]
            code = "it"
            startId = 1
            endId = 10
            tiers = [{ label = "all" }]

            [[languages]]
            code = "pt"
            startId = 15
            endId = 20
            tiers = [{ label = "all" }]
            "#,
        )
        .unwrap();
        let config = Config::resolve(file, env_of(&[]));
        assert!(matches!(config.catalog(), Err(LocateError::Configuration(_))));
    }

    #[test]
    fn test_missing_config_file() {
        let file = read_file_config(Path::new("does/not/exist.toml"));
        assert!(file.server.is_none());
    }
}
