//! Application configuration.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,
    /// Key-value store configuration.
    #[serde(default)]
    pub store: StoreConfig,
    /// Seeded administrator account.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Generative assistant configuration.
    #[serde(default)]
    pub assistant: AssistantConfig,
    /// Uploaded media limits.
    #[serde(default)]
    pub media: MediaConfig,
    /// Log output configuration.
    #[serde(default)]
    pub log: LogConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to bind to.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Public URL of the site.
    pub url: String,
}

/// Which medium backs the key-value store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Process memory; lost on restart.
    #[default]
    Memory,
    /// One JSON file per key under `path`.
    File,
}

/// Key-value store configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Storage medium.
    #[serde(default)]
    pub backend: StoreBackend,
    /// Directory for the file backend.
    #[serde(default = "default_store_path")]
    pub path: PathBuf,
    /// Total byte budget across all keys. Writes beyond it fail.
    #[serde(default)]
    pub quota_bytes: Option<usize>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            path: default_store_path(),
            quota_bytes: None,
        }
    }
}

/// Administrator account written on first start.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Administrator email.
    #[serde(default = "default_admin_email")]
    pub admin_email: String,
    /// Administrator display name.
    #[serde(default = "default_admin_name")]
    pub admin_name: String,
    /// Administrator password, hashed before it is stored.
    #[serde(default = "default_admin_password")]
    pub admin_password: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            admin_email: default_admin_email(),
            admin_name: default_admin_name(),
            admin_password: default_admin_password(),
        }
    }
}

/// Generative assistant configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AssistantConfig {
    /// Whether the assistant calls out at all.
    #[serde(default)]
    pub enabled: bool,
    /// API key for the generative service.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Model name.
    #[serde(default = "default_assistant_model")]
    pub model: String,
    /// Base endpoint of the generative service.
    #[serde(default = "default_assistant_endpoint")]
    pub endpoint: String,
    /// Request timeout in seconds.
    #[serde(default = "default_assistant_timeout")]
    pub timeout_secs: u64,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            api_key: None,
            model: default_assistant_model(),
            endpoint: default_assistant_endpoint(),
            timeout_secs: default_assistant_timeout(),
        }
    }
}

/// Limits for images ingested as data URLs.
#[derive(Debug, Clone, Deserialize)]
pub struct MediaConfig {
    /// Maximum decoded image size in bytes.
    #[serde(default = "default_max_image_bytes")]
    pub max_image_bytes: usize,
    /// Accepted image MIME types.
    #[serde(default = "default_allowed_image_types")]
    pub allowed_image_types: Vec<String>,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            max_image_bytes: default_max_image_bytes(),
            allowed_image_types: default_allowed_image_types(),
        }
    }
}

/// Log output configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LogConfig {
    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    3000
}

fn default_store_path() -> PathBuf {
    PathBuf::from("./data")
}

fn default_admin_email() -> String {
    "admin@tvk.org".to_string()
}

fn default_admin_name() -> String {
    "General Secretary".to_string()
}

fn default_admin_password() -> String {
    "change-me-admin".to_string()
}

fn default_assistant_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_assistant_endpoint() -> String {
    "https://generativelanguage.googleapis.com/v1beta/".to_string()
}

const fn default_assistant_timeout() -> u64 {
    20
}

const fn default_max_image_bytes() -> usize {
    2 * 1024 * 1024
}

fn default_allowed_image_types() -> Vec<String> {
    ["image/png", "image/jpeg", "image/webp", "image/gif"]
        .into_iter()
        .map(String::from)
        .collect()
}

impl Config {
    /// Load configuration from files and environment variables.
    ///
    /// Configuration is loaded in the following order:
    /// 1. `.env` (if present)
    /// 2. `config/default.toml`
    /// 3. `config/{environment}.toml` (based on `TVK_ENV`)
    /// 4. Environment variables with `TVK_` prefix
    pub fn load() -> Result<Self, config::ConfigError> {
        let _ = dotenvy::dotenv();
        let env = std::env::var("TVK_ENV").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .set_default("server.url", "http://localhost:3000")?
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("TVK")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Load configuration from a specific file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .add_source(
                config::Environment::with_prefix("TVK")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_optional_sections() {
        let config: Config = config::Config::builder()
            .set_override("server.url", "https://tvk.example")
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.server.port, 3000);
        assert_eq!(config.store.backend, StoreBackend::Memory);
        assert_eq!(config.auth.admin_email, "admin@tvk.org");
        assert!(!config.assistant.enabled);
        assert!(
            config
                .media
                .allowed_image_types
                .contains(&"image/png".to_string())
        );
    }

    #[test]
    fn test_file_backend_parses() {
        let config: Config = config::Config::builder()
            .set_override("server.url", "https://tvk.example")
            .unwrap()
            .set_override("store.backend", "file")
            .unwrap()
            .set_override("store.path", "/var/lib/tvk")
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.store.backend, StoreBackend::File);
        assert_eq!(config.store.path, PathBuf::from("/var/lib/tvk"));
    }
}
