//! Installation configuration for NutriBase.
//!
//! Stored in a machine-readable TOML file located at:
//!   %APPDATA%/NutriBase/config/config.toml on Windows
//!   $XDG_DATA_HOME/NutriBase/config/config.toml on Linux
//!   ~/Library/Application Support/NutriBase/config/config.toml on macOS
//!
//! The config tracks the AI proxy endpoint and the tracking defaults
//! applied before a profile-derived target exists. The API credential
//! is sourced from the environment and never written to disk.

use serde::{Deserialize, Serialize};

/// Root configuration persisted per installation.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// AI proxy endpoint settings.
    #[serde(default)]
    pub ai: AiSettings,
    /// Defaults for daily targets and chat context.
    #[serde(default)]
    pub tracking: TrackingSettings,
}

/// Where and how to reach the AI proxy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiSettings {
    /// Base URL of the proxy, joined with the four endpoint names.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Default number of days for generated meal plans.
    #[serde(default = "default_plan_days")]
    pub plan_days: u32,
}

impl Default for AiSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
            plan_days: default_plan_days(),
        }
    }
}

impl AiSettings {
    /// Optional bearer credential from `NUTRIBASE_AI_API_KEY`; empty
    /// values count as unset.
    pub fn api_key(&self) -> Option<String> {
        env::var(API_KEY_ENV).ok().filter(|key| !key.is_empty())
    }
}

fn default_base_url() -> String {
    "http://localhost:3000/api/ai".to_string()
}

const fn default_request_timeout_secs() -> u64 {
    60
}

const fn default_plan_days() -> u32 {
    7
}

/// Tracking defaults used until onboarding derives real targets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackingSettings {
    /// Daily calorie target fallback.
    #[serde(default = "default_target_calories")]
    pub default_target_calories: u32,
    /// Daily water target fallback, in milliliters.
    #[serde(default = "default_target_water_ml")]
    pub default_target_water_ml: u32,
    /// How many recent messages accompany each coach request.
    #[serde(default = "default_chat_context_messages")]
    pub chat_context_messages: usize,
}

impl Default for TrackingSettings {
    fn default() -> Self {
        Self {
            default_target_calories: default_target_calories(),
            default_target_water_ml: default_target_water_ml(),
            chat_context_messages: default_chat_context_messages(),
        }
    }
}

const fn default_target_calories() -> u32 {
    2000
}

const fn default_target_water_ml() -> u32 {
    2500
}

const fn default_chat_context_messages() -> usize {
    5
}

/// Standard relative path to the config file (resolved per OS at runtime).
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Environment variable holding the optional AI proxy credential.
pub const API_KEY_ENV: &str = "NUTRIBASE_AI_API_KEY";

use anyhow::{Context, Result};
use directories::BaseDirs;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Returns the root directory where NutriBase stores data.
///
/// Order of precedence:
/// 1. `NUTRIBASE_HOME` environment variable.
/// 2. OS-specific data directory via `directories::BaseDirs`.
pub fn workspace_root() -> Result<PathBuf> {
    if let Ok(path) = env::var("NUTRIBASE_HOME") {
        return Ok(PathBuf::from(path));
    }
    let base_dirs = BaseDirs::new().context("Unable to determine OS data directory")?;
    Ok(base_dirs.data_dir().join("NutriBase"))
}

/// Returns the config directory under the workspace root.
pub fn config_dir() -> Result<PathBuf> {
    let root = workspace_root()?;
    Ok(root.join("config"))
}

/// Path to the config file.
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Loads the configuration from disk or returns defaults.
pub fn load_or_default() -> Result<AppConfig> {
    let path = config_file_path()?;
    if path.exists() {
        let data = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let cfg: AppConfig = toml::from_str(&data)
            .with_context(|| format!("Failed to parse config file {:?}", path))?;
        Ok(cfg)
    } else {
        Ok(AppConfig::default())
    }
}

/// Persists the configuration to disk.
pub fn save(config: &AppConfig) -> Result<()> {
    let dir = config_dir()?;
    fs::create_dir_all(&dir)?;
    let path = config_file_path()?;
    let data = toml::to_string_pretty(config)?;
    fs::write(&path, data)?;
    Ok(())
}

/// Ensures the workspace structure exists (config/ and data/).
pub fn ensure_workspace_structure() -> Result<WorkspacePaths> {
    let root = workspace_root()?;
    let config_dir = root.join("config");
    let data_dir = root.join("data");
    fs::create_dir_all(&config_dir)?;
    fs::create_dir_all(&data_dir)?;
    Ok(WorkspacePaths {
        root,
        config_dir,
        data_dir,
    })
}

/// Convenience struct exposing important workspace paths.
#[derive(Debug, Clone)]
pub struct WorkspacePaths {
    pub root: PathBuf,
    pub config_dir: PathBuf,
    pub data_dir: PathBuf,
}
