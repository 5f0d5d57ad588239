use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::session::Mode;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default)]
    pub start_mode: Mode,
    #[serde(default = "default_show_examples")]
    pub show_examples: bool,
    /// Fixed seed for quiz option sampling. Random per run when unset.
    #[serde(default)]
    pub quiz_seed: Option<u64>,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_theme() -> String {
    "midnight".to_string()
}
fn default_show_examples() -> bool {
    true
}
fn default_log_level() -> String {
    "info".to_string()
}

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            start_mode: Mode::default(),
            show_examples: default_show_examples(),
            quiz_seed: None,
            log_level: default_log_level(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("paramlab")
            .join("config.toml")
    }

    /// Reset values that do not name anything we know about.
    pub fn normalize(&mut self, available_themes: &[String]) {
        if !available_themes.iter().any(|t| *t == self.theme) {
            self.theme = default_theme();
        }
        self.log_level = self.log_level.to_ascii_lowercase();
        if !LOG_LEVELS.contains(&self.log_level.as_str()) {
            self.log_level = default_log_level();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_serde_defaults_from_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.theme, "midnight");
        assert_eq!(config.start_mode, Mode::Explore);
        assert!(config.show_examples);
        assert_eq!(config.quiz_seed, None);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_config_partial_file() {
        let toml_str = r#"
theme = "paper"
start_mode = "quiz"
quiz_seed = 42
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.theme, "paper");
        assert_eq!(config.start_mode, Mode::Quiz);
        assert_eq!(config.quiz_seed, Some(42));
        assert!(config.show_examples);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config.theme, "midnight");
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut config = Config::default();
        config.start_mode = Mode::Sandbox;
        config.quiz_seed = Some(9);
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.start_mode, Mode::Sandbox);
        assert_eq!(loaded.quiz_seed, Some(9));
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "theme = ").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_normalize_resets_unknown_values() {
        let mut config = Config {
            theme: "neon".to_string(),
            log_level: "LOUD".to_string(),
            ..Config::default()
        };
        config.normalize(&["midnight".to_string(), "paper".to_string()]);
        assert_eq!(config.theme, "midnight");
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_normalize_keeps_known_values() {
        let mut config = Config {
            theme: "paper".to_string(),
            log_level: "DEBUG".to_string(),
            ..Config::default()
        };
        config.normalize(&["midnight".to_string(), "paper".to_string()]);
        assert_eq!(config.theme, "paper");
        assert_eq!(config.log_level, "debug");
    }
}
