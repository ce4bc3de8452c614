use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::review::DEFAULT_TEMPERATURE;

const DEFAULT_CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("OPENAI_API_KEY not found in environment variables")]
    MissingApiKey,
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}

/// Process-wide settings, built once in `main` and handed to the app state.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub openai: OpenAiConfig,
    pub cors: CorsConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub db_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from("/tmp/reviews.db"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub temperature: f32,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: "gpt-4".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

/// `origins: None` means every origin is allowed.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    pub origins: Option<Vec<String>>,
}

impl AppConfig {
    /// Load from the optional TOML file, then apply environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with(|key| std::env::var(key).ok())
    }

    pub fn load_with<F>(env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = match env("CONFIG_PATH") {
            Some(path) => Self::from_file(Path::new(&path))?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => Self::default(),
        };

        config.with_env(env)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    fn with_env<F>(mut self, env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = env("OPENAI_API_KEY") {
            self.openai.api_key = key;
        }
        if let Some(model) = env("OPENAI_MODEL") {
            self.openai.model = model;
        }
        if let Some(url) = env("OPENAI_BASE_URL") {
            self.openai.base_url = url;
        }
        if let Some(origins) = env("CORS_ORIGINS") {
            self.cors.origins = parse_origins(&origins);
        }
        if let Some(path) = env("DATABASE_PATH") {
            self.storage.db_path = PathBuf::from(path);
        }
        if let Some(host) = env("HOST") {
            self.server.host = host;
        }
        if let Some(port) = env("PORT") {
            self.server.port = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue { key: "PORT", value: port })?;
        }

        if self.openai.api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey);
        }

        Ok(self)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

/// Parse a comma-separated allow-list. A `*` entry anywhere means
/// unrestricted. An empty list allows no cross-origin callers.
pub fn parse_origins(raw: &str) -> Option<Vec<String>> {
    let origins: Vec<&str> = raw
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .collect();

    if origins.contains(&"*") {
        return None;
    }

    Some(origins.into_iter().map(String::from).collect())
}
