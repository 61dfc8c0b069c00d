//! Settings persistence
//!
//! Settings live in a JSON file. Lookup order:
//! 1. `--config <PATH>`
//! 2. `LEVELCAST_CONFIG` environment variable
//! 3. Platform config dir (e.g. `~/.config/levelcast/settings.json`)
//!
//! A missing file means defaults.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use levelcast_core::PlannerSettings;
use serde::{Deserialize, Serialize};

/// Environment variable overriding the settings path
pub const CONFIG_ENV: &str = "LEVELCAST_CONFIG";

/// File name inside the platform config dir
pub const CONFIG_FILE_NAME: &str = "settings.json";

// ============================================================================
// ERROR TYPES
// ============================================================================

/// Settings error type
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Malformed settings file
    #[error("Invalid settings JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// No home directory to derive a config dir from
    #[error("Could not determine a config directory; pass --config or set {CONFIG_ENV}")]
    NoConfigDir,
}

/// Settings result type
pub type Result<T> = std::result::Result<T, ConfigError>;

// ============================================================================
// SETTINGS
// ============================================================================

/// Planner settings plus what to display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CliSettings {
    /// Show the vocabulary unlock schedule
    pub show_unlocks: bool,
    /// Show the lessons-per-day recommendation
    pub show_recommendation: bool,
    #[serde(flatten)]
    pub planner: PlannerSettings,
}

impl Default for CliSettings {
    fn default() -> Self {
        Self {
            show_unlocks: true,
            show_recommendation: true,
            planner: PlannerSettings::default(),
        }
    }
}

/// Resolve the settings path
pub fn resolve_path(explicit: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path);
    }
    if let Some(path) = std::env::var_os(CONFIG_ENV).filter(|p| !p.is_empty()) {
        return Ok(PathBuf::from(path));
    }
    ProjectDirs::from("com", "levelcast", "levelcast")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
        .ok_or(ConfigError::NoConfigDir)
}

/// Load settings, falling back to defaults when the file doesn't exist
pub fn load(path: &Path) -> Result<CliSettings> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "No settings file, using defaults");
        return Ok(CliSettings::default());
    }
    let json = std::fs::read_to_string(path)?;
    let settings: CliSettings = serde_json::from_str(&json)?;
    tracing::debug!(path = %path.display(), "Loaded settings");
    Ok(settings)
}

/// Write settings as pretty JSON, creating parent directories
pub fn save(path: &Path, settings: &CliSettings) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, serde_json::to_string_pretty(settings)?)?;
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
