//! Configuration system for persona-builder
//!
//! Supports multiple configuration sources with the following precedence (highest to lowest):
//! 1. CLI arguments
//! 2. Environment variables (PERSONA_BUILDER_* prefix)
//! 3. Configuration file (TOML)
//! 4. Default values

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Error, Result};

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BuilderConfig {
    /// Snapshot export settings
    pub export: ExportSettings,

    /// Clipboard settings
    pub clipboard: ClipboardSettings,

    /// Logging configuration
    pub logging: LoggingSettings,
}

/// Snapshot export settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Directory that receives exported snapshots
    pub dir: String,

    /// Filename prefix; files are named `<prefix>-<millis>.json`
    pub file_prefix: String,
}

/// Clipboard settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClipboardSettings {
    /// Allow `prompt --copy` to reach the clipboard
    pub enabled: bool,

    /// Clipboard program and arguments (unset = detect per platform)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log level: trace, debug, info, warn, error
    pub level: String,

    /// Log file path (empty = no file logging)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,

    /// Maximum log file size in MB before rotation
    pub max_file_size_mb: u64,

    /// Number of rotated log files to keep
    pub max_files: u32,

    /// Enable JSON formatted logging
    pub json_format: bool,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            dir: ".".to_string(),
            file_prefix: "persona".to_string(),
        }
    }
}

impl Default for ClipboardSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            command: None,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            file: None,
            max_file_size_mb: 100,
            max_files: 5,
            json_format: false,
        }
    }
}

impl BuilderConfig {
    /// Load configuration from file with environment variable overrides
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut config = Self::default();

        // 1. Load from config file if it exists
        if let Some(path) = Self::find_config_file(config_path)? {
            debug!(path = %path.display(), "Loading configuration file");
            config = Self::from_file(&path)?;
            info!(path = %path.display(), "Configuration loaded from file");
        }

        // 2. Apply environment variable overrides
        config.apply_env_overrides();

        // 3. Expand paths
        config.expand_paths();

        // 4. Validate
        config.validate()?;

        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| Error::IoRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| Error::ConfigParse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Find the configuration file to use
    fn find_config_file(explicit_path: Option<&str>) -> Result<Option<PathBuf>> {
        // If explicit path provided, use it (error if not found)
        if let Some(path) = explicit_path {
            let path = PathBuf::from(expand_path(path));
            if path.exists() {
                return Ok(Some(path));
            }
            return Err(Error::config_not_found(path));
        }

        let search_paths = [
            // Current directory
            Some(PathBuf::from("persona-builder.toml")),
            // User config directory
            dirs::config_dir().map(|p| p.join("persona-builder").join("config.toml")),
            // Home directory
            dirs::home_dir().map(|p| p.join(".persona-builder").join("config.toml")),
        ];

        for path in search_paths.iter().flatten() {
            if path.exists() {
                debug!(path = %path.display(), "Found configuration file");
                return Ok(Some(path.clone()));
            }
        }

        debug!("No configuration file found, using defaults");
        Ok(None)
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) {
        // Export settings
        if let Ok(val) = std::env::var("PERSONA_BUILDER_EXPORT_DIR") {
            self.export.dir = val;
        }
        if let Ok(val) = std::env::var("PERSONA_BUILDER_FILE_PREFIX") {
            self.export.file_prefix = val;
        }

        // Clipboard settings
        if let Ok(val) = std::env::var("PERSONA_BUILDER_CLIPBOARD_ENABLED") {
            self.clipboard.enabled = parse_bool(&val);
        }
        if let Ok(val) = std::env::var("PERSONA_BUILDER_CLIPBOARD_COMMAND") {
            self.clipboard.command = Some(val);
        }

        // Logging settings
        if let Ok(val) = std::env::var("PERSONA_BUILDER_LOG_LEVEL") {
            self.logging.level = val;
        }
        if let Ok(val) = std::env::var("PERSONA_BUILDER_LOG_FILE") {
            self.logging.file = Some(val);
        }
        if let Ok(val) = std::env::var("PERSONA_BUILDER_LOG_JSON") {
            self.logging.json_format = parse_bool(&val);
        }
    }

    /// Expand ~ and other path variables
    fn expand_paths(&mut self) {
        self.export.dir = expand_path(&self.export.dir);

        if let Some(ref file) = self.logging.file {
            self.logging.file = Some(expand_path(file));
        }
    }

    /// Validate the configuration
    fn validate(&self) -> Result<()> {
        if self.export.dir.trim().is_empty() {
            return Err(Error::Config("export.dir cannot be empty".to_string()));
        }

        let prefix = &self.export.file_prefix;
        if prefix.trim().is_empty() {
            return Err(Error::Config("export.file_prefix cannot be empty".to_string()));
        }
        if prefix.contains('/') || prefix.contains('\\') {
            return Err(Error::Config(format!(
                "export.file_prefix '{}' must not contain path separators",
                prefix
            )));
        }

        if let Some(ref command) = self.clipboard.command {
            if command.trim().is_empty() {
                return Err(Error::Config(
                    "clipboard.command cannot be empty; remove it to auto-detect".to_string(),
                ));
            }
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(Error::Config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_levels.join(", ")
            )));
        }

        Ok(())
    }

    /// Get the export directory as a PathBuf
    pub fn export_dir(&self) -> PathBuf {
        PathBuf::from(&self.export.dir)
    }
}

fn parse_bool(val: &str) -> bool {
    val.to_lowercase() == "true" || val == "1"
}

/// Expand ~ and environment variables in paths
pub fn expand_path(path: &str) -> String {
    shellexpand::full(path)
        .unwrap_or(std::borrow::Cow::Borrowed(path))
        .into_owned()
}

/// Initialize a new configuration file
pub fn init_config(path: Option<&str>, force: bool) -> Result<PathBuf> {
    let config_path = path
        .map(|p| PathBuf::from(expand_path(p)))
        .unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".persona-builder")
                .join("config.toml")
        });

    if config_path.exists() && !force {
        return Err(Error::Config(format!(
            "Configuration file already exists: {}. Use --force to overwrite.",
            config_path.display()
        )));
    }

    if let Some(parent) = config_path.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::IoWrite {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    fs::write(&config_path, generate_default_config()).map_err(|e| Error::IoWrite {
        path: config_path.clone(),
        source: e,
    })?;

    Ok(config_path)
}

/// Generate default configuration content with comments
fn generate_default_config() -> &'static str {
    r#"# persona-builder configuration

[export]
# Directory that receives exported persona snapshots
dir = "."

# Snapshot filenames are <file_prefix>-<unix millis>.json
file_prefix = "persona"

[clipboard]
# Allow 'prompt --copy' to place the prompt on the clipboard
enabled = true

# Clipboard program and arguments (comment out to auto-detect)
# command = "wl-copy"

[logging]
# Log level: trace, debug, info, warn, error
level = "warn"

# Log file path (comment out to disable file logging)
# file = "~/.persona-builder/logs/persona-builder.log"

# Maximum log file size in MB before rotation
max_file_size_mb = 100

# Number of rotated log files to keep
max_files = 5

# Enable JSON formatted logging
json_format = false
"#
}
