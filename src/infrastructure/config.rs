//! Configuration management

use crate::error::{DiaryError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the config file at the diary root
pub const CONFIG_FILE: &str = "diary.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Backing JSON document, relative to the diary root
    pub document: PathBuf,
    /// Directory holding photo and doodle PNGs, relative to the diary root
    pub asset_dir: PathBuf,
    /// Photos wider than this are downscaled before saving (0 disables)
    pub photo_max_width: u32,
    pub created: DateTime<Utc>,
    pub ai: AiConfig,
}

/// Chat-completion endpoint settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    pub endpoint: String,
    pub model: String,
    pub temperature: f64,
    pub timeout_secs: u64,
    /// Environment variable holding the API key
    pub api_key_env: String,
}

impl Default for AiConfig {
    fn default() -> Self {
        AiConfig {
            endpoint: "https://api.groq.com/openai/v1".to_string(),
            model: "llama-3.3-70b-versatile".to_string(),
            temperature: 0.7,
            timeout_secs: 60,
            api_key_env: "GROQ_API_KEY".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            document: PathBuf::from("data").join("diary.json"),
            asset_dir: PathBuf::from("data").join("images"),
            photo_max_width: 1200,
            created: Utc::now(),
            ai: AiConfig::default(),
        }
    }
}

impl Config {
    /// Load config from diary.toml in the given directory.
    /// A missing file yields the defaults.
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        let config_path = path.join(CONFIG_FILE);

        let contents = match fs::read_to_string(&config_path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %config_path.display(), "no config file, using defaults");
                return Ok(Config::default());
            }
            Err(e) => return Err(DiaryError::Io(e)),
        };

        toml::from_str(&contents)
            .map_err(|e| DiaryError::Config(format!("Failed to parse {}: {}", CONFIG_FILE, e)))
    }

    /// Save config to diary.toml in the given directory
    pub fn save_to_dir(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(path.join(CONFIG_FILE), contents)?;

        Ok(())
    }

    /// Absolute location of the backing document under `root`
    pub fn document_path(&self, root: &Path) -> PathBuf {
        root.join(&self.document)
    }

    /// Absolute location of the asset directory under `root`
    pub fn asset_path(&self, root: &Path) -> PathBuf {
        root.join(&self.asset_dir)
    }

    /// Get a single value by key, formatted for display
    pub fn get(&self, key: &str) -> Result<String> {
        match key {
            "document" => Ok(self.document.display().to_string()),
            "asset_dir" => Ok(self.asset_dir.display().to_string()),
            "photo_max_width" => Ok(self.photo_max_width.to_string()),
            "ai.endpoint" => Ok(self.ai.endpoint.clone()),
            "ai.model" => Ok(self.ai.model.clone()),
            "ai.temperature" => Ok(self.ai.temperature.to_string()),
            "ai.timeout_secs" => Ok(self.ai.timeout_secs.to_string()),
            "ai.api_key_env" => Ok(self.ai.api_key_env.clone()),
            "created" => Ok(self.created.to_rfc3339()),
            _ => Err(unknown_key(key)),
        }
    }

    /// Set a single value by key
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "document" => self.document = PathBuf::from(value),
            "asset_dir" => self.asset_dir = PathBuf::from(value),
            "photo_max_width" => self.photo_max_width = parse_value(key, value)?,
            "ai.endpoint" => self.ai.endpoint = value.trim_end_matches('/').to_string(),
            "ai.model" => self.ai.model = value.to_string(),
            "ai.temperature" => self.ai.temperature = parse_value(key, value)?,
            "ai.timeout_secs" => self.ai.timeout_secs = parse_value(key, value)?,
            "ai.api_key_env" => self.ai.api_key_env = value.to_string(),
            "created" => {
                return Err(DiaryError::Config(
                    "Cannot modify 'created' field (read-only)".to_string(),
                ));
            }
            _ => return Err(unknown_key(key)),
        }
        Ok(())
    }

    /// All keys accepted by `get`
    pub fn keys() -> &'static [&'static str] {
        &[
            "document",
            "asset_dir",
            "photo_max_width",
            "ai.endpoint",
            "ai.model",
            "ai.temperature",
            "ai.timeout_secs",
            "ai.api_key_env",
            "created",
        ]
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| DiaryError::Config(format!("Invalid value for '{}': '{}'", key, value)))
}

fn unknown_key(key: &str) -> DiaryError {
    DiaryError::Config(format!(
        "Unknown config key: '{}'. Valid keys are: {}",
        key,
        Config::keys().join(", ")
    ))
}
