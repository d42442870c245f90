//! Configuration for the nutrition client
//!
//! Configuration is loaded in order of precedence:
//! 1. Environment variables (highest priority)
//! 2. Config file (~/.config/nutrack/config.toml)
//! 3. Built-in defaults (lowest priority)

use serde::Deserialize;
use std::path::PathBuf;

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the nutrition API, including the path prefix
    pub api_url: String,

    /// File holding the persisted auth token (single account)
    pub token_path: PathBuf,

    /// External frame-grabber command for camera capture; it must write
    /// one encoded image to stdout. None disables the camera.
    pub capture_command: Option<String>,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Default log level when RUST_LOG is not set
    pub level: String,
    /// Write rotating JSON log files in addition to the in-TUI buffer
    pub file_enabled: bool,
    /// Directory for log files
    pub file_dir: PathBuf,
    /// Log file name prefix
    pub file_prefix: String,
}

fn data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("nutrack")
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_enabled: false,
            file_dir: data_dir().join("logs"),
            file_prefix: "nutrack".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: "http://127.0.0.1:8001/api".to_string(),
            token_path: data_dir().join("token"),
            capture_command: None,
            logging: LoggingConfig::default(),
        }
    }
}

/// Config file structure (subset of Config that makes sense to persist)
#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileConfig {
    pub api_url: Option<String>,
    pub token_path: Option<String>,
    pub capture_command: Option<String>,

    /// Optional [logging] section
    pub logging: Option<FileLogging>,
}

#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileLogging {
    pub level: Option<String>,
    pub file_enabled: Option<bool>,
    pub file_dir: Option<String>,
    pub file_prefix: Option<String>,
}

impl Config {
    /// Path to the config file (~/.config/nutrack/config.toml)
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("nutrack").join("config.toml"))
    }

    /// Load configuration: defaults, overlaid by the config file,
    /// overlaid by environment variables.
    pub fn from_env() -> Self {
        let mut config = Config::default();

        if let Some(path) = Self::config_path() {
            if let Ok(contents) = std::fs::read_to_string(&path) {
                match toml::from_str::<FileConfig>(&contents) {
                    Ok(file) => config.apply_file(file),
                    Err(e) => eprintln!("Warning: could not parse {}: {}", path.display(), e),
                }
            }
        }

        if let Ok(url) = std::env::var("NUTRACK_API_URL") {
            config.api_url = url;
        }
        if let Ok(path) = std::env::var("NUTRACK_TOKEN_PATH") {
            config.token_path = PathBuf::from(path);
        }
        if let Ok(cmd) = std::env::var("NUTRACK_CAPTURE_CMD") {
            config.capture_command = Some(cmd);
        }
        if let Ok(level) = std::env::var("NUTRACK_LOG_LEVEL") {
            config.logging.level = level;
        }

        config
    }

    /// Overlay values from the config file onto this config
    pub(crate) fn apply_file(&mut self, file: FileConfig) {
        if let Some(url) = file.api_url {
            self.api_url = url;
        }
        if let Some(path) = file.token_path {
            self.token_path = PathBuf::from(path);
        }
        if let Some(cmd) = file.capture_command {
            if !cmd.trim().is_empty() {
                self.capture_command = Some(cmd);
            }
        }
        if let Some(logging) = file.logging {
            if let Some(level) = logging.level {
                self.logging.level = level;
            }
            if let Some(enabled) = logging.file_enabled {
                self.logging.file_enabled = enabled;
            }
            if let Some(dir) = logging.file_dir {
                self.logging.file_dir = PathBuf::from(dir);
            }
            if let Some(prefix) = logging.file_prefix {
                self.logging.file_prefix = prefix;
            }
        }
    }

    /// Serialize the config as a commented TOML template
    pub fn to_toml(&self) -> String {
        format!(
            r#"# nutrack configuration
# Values here are overridden by NUTRACK_* environment variables.

# Base URL of the nutrition API
api_url = {api_url:?}

# File holding the persisted auth token
token_path = {token_path:?}

# External frame-grabber command for camera capture (writes one encoded
# image to stdout). Leave commented to disable the camera; file upload
# stays available.
#capture_command = "fswebcam --jpeg 80 -"

[logging]
level = {level:?}
file_enabled = {file_enabled}
file_dir = {file_dir:?}
file_prefix = {file_prefix:?}
"#,
            api_url = self.api_url,
            token_path = self.token_path.display().to_string(),
            level = self.logging.level,
            file_enabled = self.logging.file_enabled,
            file_dir = self.logging.file_dir.display().to_string(),
            file_prefix = self.logging.file_prefix,
        )
    }

    /// Write a config template on first run so users can discover options
    pub fn ensure_config_exists() {
        let Some(path) = Self::config_path() else {
            return;
        };
        if path.exists() {
            return;
        }
        if let Some(parent) = path.parent() {
            if std::fs::create_dir_all(parent).is_err() {
                return;
            }
        }
        let _ = std::fs::write(&path, Config::default().to_toml());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Catches template syntax drift: the generated TOML must parse back
    #[test]
    fn default_config_roundtrips_through_toml() {
        let config = Config::default();
        let toml_str = config.to_toml();

        let parsed: Result<FileConfig, _> = toml::from_str(&toml_str);
        assert!(
            parsed.is_ok(),
            "Default config should round-trip.\nTOML:\n{}\nError: {:?}",
            toml_str,
            parsed.err()
        );

        let file = parsed.unwrap();
        assert_eq!(file.api_url.as_deref(), Some(config.api_url.as_str()));
        // The template keeps capture_command commented out
        assert!(file.capture_command.is_none());
    }

    #[test]
    fn file_values_override_defaults() {
        let mut config = Config::default();
        config.apply_file(FileConfig {
            api_url: Some("http://10.0.0.2:8001/api".into()),
            token_path: None,
            capture_command: Some("grab-frame".into()),
            logging: Some(FileLogging {
                level: Some("debug".into()),
                file_enabled: Some(true),
                file_dir: None,
                file_prefix: None,
            }),
        });

        assert_eq!(config.api_url, "http://10.0.0.2:8001/api");
        assert_eq!(config.capture_command.as_deref(), Some("grab-frame"));
        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.file_enabled);
        // Untouched values keep their defaults
        assert_eq!(config.token_path, Config::default().token_path);
    }
}
