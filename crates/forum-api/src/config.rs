use config::{Config as ConfigLoader, ConfigError, Environment, File, FileFormat, FileSourceFile};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub cors: CorsConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Per-request timeout enforced by the transport layer
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_request_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    pub enabled: bool,
    pub origins: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    #[serde(default = "default_run_migrations")]
    pub run_migrations: bool,
}

fn default_run_migrations() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Config {
    /// Load configuration from TOML files and environment variables
    ///
    /// Hierarchy (weakest to strongest):
    /// 1. config/default.toml
    /// 2. config/{ENV}.toml (if ENV is set, defaults to `dev`)
    /// 3. `FORUM_<SECTION>__<KEY>` environment variables
    /// 4. `DATABASE_URL`
    pub fn load() -> Result<Self, ConfigError> {
        let env = std::env::var("ENV").unwrap_or_else(|_| "dev".to_string());

        Self::load_layered(vec![
            File::with_name("config/default").required(false),
            File::with_name(&format!("config/{}", env)).required(false),
        ])
    }

    /// Apply `files` in order, then the environment overrides on top
    fn load_layered(files: Vec<File<FileSourceFile, FileFormat>>) -> Result<Self, ConfigError> {
        let builder = files
            .into_iter()
            .fold(ConfigLoader::builder(), |builder, file| builder.add_source(file))
            .add_source(
                Environment::with_prefix("FORUM")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
            );

        let mut cfg: Config = builder.build()?.try_deserialize()?;

        if let Ok(url) = std::env::var("DATABASE_URL") {
            cfg.database.url = url;
        }

        Ok(cfg)
    }

    /// Load config from a specific path (useful for testing)
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let builder = ConfigLoader::builder()
            .add_source(File::from(path.as_ref()));

        let config = builder.build()?;
        config.try_deserialize()
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
        [server]
        host = "127.0.0.1"
        port = 3000

        [cors]
        enabled = true
        origins = ["http://localhost:3000"]

        [database]
        url = "sqlite::memory:"
        max_connections = 5

        [logging]
        level = "debug"
        format = "json"
    "#;

    #[test]
    fn test_config_structure() {
        let config: Config = toml::from_str(SAMPLE).unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.database.url, "sqlite::memory:");
        assert_eq!(config.bind_address(), "127.0.0.1:3000");
    }

    #[test]
    fn test_config_defaults() {
        let config: Config = toml::from_str(SAMPLE).unwrap();
        assert_eq!(config.server.request_timeout_secs, 30);
        assert!(config.database.run_migrations);
    }

    #[test]
    fn test_from_file() {
        let path = std::env::temp_dir().join(format!("forum-config-{}.toml", uuid::Uuid::new_v4()));
        std::fs::write(&path, SAMPLE).unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.cors.origins, vec!["http://localhost:3000"]);

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_env_overrides_file_values() {
        let path = std::env::temp_dir().join(format!("forum-config-{}.toml", uuid::Uuid::new_v4()));
        std::fs::write(&path, SAMPLE).unwrap();
        std::env::set_var("FORUM_SERVER__PORT", "4321");
        std::env::set_var("FORUM_LOGGING__LEVEL", "warn");

        let loaded = Config::load_layered(vec![File::from(path.as_path())]);

        std::env::remove_var("FORUM_SERVER__PORT");
        std::env::remove_var("FORUM_LOGGING__LEVEL");
        std::fs::remove_file(&path).unwrap();

        let config = loaded.unwrap();
        assert_eq!(config.server.port, 4321);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.logging.level, "warn");
    }
}
