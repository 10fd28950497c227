use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    #[serde(default)]
    pub storage: StorageSettings,
    #[serde(default)]
    pub pagination: PaginationSettings,
    #[serde(default)]
    pub requests: RequestSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: Option<u32>,
    pub min_connections: Option<u32>,
    pub acquire_timeout_secs: Option<u64>,
    pub idle_timeout_secs: Option<u64>,
}

/// Which ledger implementation backs the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Postgres,
    Memory,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StorageSettings {
    #[serde(default)]
    pub backend: StorageBackend,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PaginationSettings {
    /// Ceiling applied to every list query
    #[serde(default = "default_max_page_size")]
    pub max_page_size: usize,
}

impl Default for PaginationSettings {
    fn default() -> Self {
        Self {
            max_page_size: default_max_page_size(),
        }
    }
}

fn default_max_page_size() -> usize { 1000 }

#[derive(Debug, Clone, Deserialize)]
pub struct RequestSettings {
    /// Deadline for a single storage call
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl RequestSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for RequestSettings {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
        }
    }
}

fn default_timeout_ms() -> u64 { 5000 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Environment variables (prefixed with EXPLORE_)
    /// 4. DATABASE_URL, if set
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            // Local overrides for development
            .add_source(File::with_name("config/local").required(false))
            // e.g., EXPLORE__SERVER__PORT -> server.port
            .add_source(env_source())
            .build()?;

        let settings = apply_database_url(settings)?;
        settings.try_deserialize::<Self>()?.validated()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(env_source())
            .build()?;

        settings.try_deserialize::<Self>()?.validated()
    }

    fn validated(self) -> Result<Self, ConfigError> {
        if self.pagination.max_page_size == 0 {
            return Err(ConfigError::Message(
                "pagination.max_page_size must be a positive integer".to_string(),
            ));
        }
        if self.requests.timeout_ms == 0 {
            return Err(ConfigError::Message(
                "requests.timeout_ms must be a positive integer".to_string(),
            ));
        }
        Ok(self)
    }
}

fn env_source() -> Environment {
    Environment::with_prefix("EXPLORE")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

/// DATABASE_URL wins over whatever the files and EXPLORE__ vars set
fn apply_database_url(settings: Config) -> Result<Config, ConfigError> {
    match std::env::var("DATABASE_URL") {
        Ok(url) => Config::builder()
            .add_source(settings)
            .set_override("database.url", url)?
            .build(),
        Err(_) => Ok(settings),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!(
            "lume-explore-{}-{}.toml",
            name,
            std::process::id()
        ));
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    const MINIMAL: &str = r#"
        [server]
        host = "127.0.0.1"
        port = 9000

        [database]
        url = "postgres://localhost/test"
    "#;

    #[test]
    fn test_defaults_fill_optional_sections() {
        let settings = Settings::load_from(write_config("defaults", MINIMAL)).unwrap();

        assert_eq!(settings.server.port, 9000);
        assert_eq!(settings.storage.backend, StorageBackend::Postgres);
        assert_eq!(settings.pagination.max_page_size, 1000);
        assert_eq!(settings.requests.timeout(), Duration::from_millis(5000));
        assert_eq!(settings.logging.level, "info");
        assert_eq!(settings.logging.format, "json");
    }

    #[test]
    fn test_zero_page_size_is_rejected() {
        let contents = format!("{MINIMAL}\n[pagination]\nmax_page_size = 0\n");
        let result = Settings::load_from(write_config("zero-page", &contents));
        assert!(result.is_err());
    }

    #[test]
    fn test_memory_backend_parses() {
        let contents = format!("{MINIMAL}\n[storage]\nbackend = \"memory\"\n");
        let settings = Settings::load_from(write_config("memory", &contents)).unwrap();
        assert_eq!(settings.storage.backend, StorageBackend::Memory);
    }
}
