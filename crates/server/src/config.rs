//! # Application Configuration
//!
//! Defines the configuration structure for the `twinrag-server` and the
//! logic for loading it from an optional `config.yml` plus environment
//! variables. The file may reference environment variables as `${VAR}`,
//! which keeps credentials out of the file itself.

use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use regex::Regex;
use serde::Deserialize;
use std::env;
use std::fs;
use tracing::info;
use twinrag::constants::DEFAULT_COMPLETION_MODEL;

/// A custom error type for configuration issues.
#[derive(Debug)]
pub enum ConfigError {
    /// Indicates an error from the underlying `config` crate.
    General(String),
    /// Indicates the requested configuration file was not found.
    NotFound(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::General(msg) => write!(f, "Configuration error: {msg}"),
            ConfigError::NotFound(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::General(err.to_string())
    }
}

/// The root configuration structure, mapping directly to `config.yml`.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// The port for the server to listen on. Loaded from `PORT` env var.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Deadline in seconds for each call to an external service.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Connection details for the vector index.
    pub vector: VectorConfig,
    /// Connection details for the completion service.
    pub completion: CompletionConfig,
}

fn default_port() -> u16 {
    8080
}

fn default_request_timeout_secs() -> u64 {
    30
}

/// Configuration for the vector index service.
#[derive(Debug, Deserialize, Clone)]
pub struct VectorConfig {
    pub api_url: String,
    pub api_token: Option<String>,
}

/// Configuration for the completion service.
#[derive(Debug, Deserialize, Clone)]
pub struct CompletionConfig {
    pub api_url: String,
    pub api_key: Option<String>,
    #[serde(default = "default_model_name")]
    pub model_name: String,
}

fn default_model_name() -> String {
    DEFAULT_COMPLETION_MODEL.to_string()
}

// Helper to read a file, substitute env vars, and return its content.
// Returns Ok(None) if the file does not exist, or an error if it fails to read.
fn read_and_substitute(path: &str) -> Result<Option<String>, ConfigError> {
    if !std::path::Path::new(path).exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path)
        .map_err(|e| ConfigError::General(format!("Failed to read config file '{path}': {e}")))?;

    let re = Regex::new(r"\$\{(?P<var>[A-Z0-9_]+)\}").expect("static pattern");
    let expanded_content = re.replace_all(&content, |caps: &regex::Captures| {
        let var_name = &caps["var"];
        env::var(var_name).unwrap_or_else(|_| "".to_string())
    });

    Ok(Some(expanded_content.to_string()))
}

/// Loads the application configuration from a file and environment variables.
///
/// Layering, lowest priority first:
/// 1. `config.yml` in the working directory (optional unless a path is
///    passed explicitly, in which case it must exist), with `${VAR}`
///    substitution applied.
/// 2. Top-level environment variables such as `PORT`.
/// 3. `TWINRAG_`-prefixed variables for nested keys, e.g.
///    `TWINRAG_VECTOR__API_URL` or `TWINRAG_COMPLETION__API_KEY`.
pub fn get_config(config_path_override: Option<&str>) -> Result<AppConfig, ConfigError> {
    let mut builder = ConfigBuilder::builder();

    let config_path = config_path_override.unwrap_or("config.yml");
    match read_and_substitute(config_path)? {
        Some(content) => {
            info!("Loading configuration from '{config_path}'.");
            builder = builder.add_source(File::from_str(&content, FileFormat::Yaml));
        }
        None if config_path_override.is_some() => {
            return Err(ConfigError::NotFound(format!(
                "Config file not found at '{config_path}'."
            )));
        }
        None => {
            info!("No '{config_path}' found; using environment variables only.");
        }
    }

    let settings = builder
        .add_source(Environment::default())
        .add_source(
            Environment::with_prefix("TWINRAG")
                .prefix_separator("_")
                .try_parsing(true)
                .separator("__"),
        )
        .build()?;

    Ok(settings.try_deserialize()?)
}
