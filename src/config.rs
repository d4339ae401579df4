// src/config.rs
use crate::errors::{GradeError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_TEMPERATURE: f32 = 0.2;
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;

/// Configuration for the Gemini provider.
///
/// The credential is optional here: a missing key is reported per evaluation,
/// not at startup.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_base: String,
    pub api_key: Option<String>,
    pub model: String,
    pub temperature: f32,
}

/// Where the HTTP server listens.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// High-level application configuration, assembled from an optional TOML file
/// and environment variables (the environment wins).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub gemini: GeminiConfig,
    pub server: ServerConfig,
}

/// On-disk layout of `config.toml`. Every key is optional.
#[derive(Deserialize, Debug, Default)]
#[serde(default)]
struct FileConfig {
    gemini: FileGemini,
    server: FileServer,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
struct FileGemini {
    api_key: Option<String>,
    api_base: Option<String>,
    model: Option<String>,
    temperature: Option<f32>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
struct FileServer {
    host: Option<String>,
    port: Option<u16>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            gemini: GeminiConfig {
                api_base: DEFAULT_API_BASE.to_string(),
                api_key: None,
                model: DEFAULT_MODEL.to_string(),
                temperature: DEFAULT_TEMPERATURE,
            },
            server: ServerConfig {
                host: DEFAULT_HOST.to_string(),
                port: DEFAULT_PORT,
            },
        }
    }
}

impl AppConfig {
    /// Load configuration from the config file (if any) and the process environment.
    pub fn load() -> Result<Self> {
        let env = |key: &str| std::env::var(key).ok();
        match config_file_path() {
            Some(path) => {
                log::info!("Reading configuration from {}", path.display());
                Self::from_file(&path, env)
            }
            None => Self::from_sources("", env),
        }
    }

    /// Reads a TOML config file, then applies the environment lookup on top.
    pub fn from_file<F>(path: &Path, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let contents = std::fs::read_to_string(path)?;
        Self::from_sources(&contents, env)
    }

    /// Builds the configuration from TOML text and an environment lookup.
    pub fn from_sources<F>(toml_text: &str, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let file: FileConfig = toml::from_str(toml_text)?;
        let lookup = |key: &str| env(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = AppConfig::default();

        let api_key = lookup("GEMINI_API_KEY")
            .or_else(|| lookup("API_KEY"))
            .or(file.gemini.api_key.filter(|k| !k.trim().is_empty()));

        let temperature = match lookup("GEMINI_TEMPERATURE") {
            Some(raw) => raw.parse::<f32>().map_err(|_| {
                GradeError::Config(format!("GEMINI_TEMPERATURE must be a number, got '{}'", raw))
            })?,
            None => file.gemini.temperature.unwrap_or(defaults.gemini.temperature),
        };

        let port = match lookup("GRADER_PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|_| {
                GradeError::Config(format!("GRADER_PORT must be a port number, got '{}'", raw))
            })?,
            None => file.server.port.unwrap_or(defaults.server.port),
        };

        Ok(AppConfig {
            gemini: GeminiConfig {
                api_base: lookup("GEMINI_API_BASE")
                    .or(file.gemini.api_base)
                    .unwrap_or(defaults.gemini.api_base),
                api_key,
                model: lookup("GEMINI_MODEL")
                    .or(file.gemini.model)
                    .unwrap_or(defaults.gemini.model),
                temperature,
            },
            server: ServerConfig {
                host: lookup("GRADER_HOST")
                    .or(file.server.host)
                    .unwrap_or(defaults.server.host),
                port,
            },
        })
    }
}

/// `GRADER_CONFIG` if set, otherwise the per-user config file when it exists.
fn config_file_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("GRADER_CONFIG") {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir()
        .map(|dir| dir.join("pdf-grader").join("config.toml"))
        .filter(|path| path.is_file())
}
