use std::env;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    /// Administrator registered at startup when no identity holds its email.
    #[serde(default)]
    pub admin: Option<AdminConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    5
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiration_hours: i64,
}

impl JwtConfig {
    /// Below this length the HMAC key is weaker than the hash it protects.
    pub const RECOMMENDED_SECRET_BYTES: usize = 32;

    pub fn ttl(&self) -> chrono::Duration {
        chrono::Duration::hours(self.expiration_hours)
    }

    pub fn is_secret_weak(&self) -> bool {
        self.secret.len() < Self::RECOMMENDED_SECRET_BYTES
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AdminConfig {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, JWT__SECRET, ADMIN__EMAIL, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: DATABASE__URL=sqlite://other.db overrides database.url
            .add_source(Environment::default().separator("__"))
            .build()?;

        configuration.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use config::FileFormat;

    use super::*;

    fn from_toml(source: &str) -> Config {
        ConfigBuilder::builder()
            .add_source(File::from_str(source, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_defaults_and_optional_admin() {
        let config = from_toml(
            r#"
            [database]
            url = "sqlite::memory:"

            [server]
            http_port = 8080

            [jwt]
            secret = "short"
            expiration_hours = 2
            "#,
        );

        assert_eq!(config.database.max_connections, 5);
        assert!(config.admin.is_none());
        assert!(config.jwt.is_secret_weak());
        assert_eq!(config.jwt.ttl(), chrono::Duration::hours(2));
    }

    #[test]
    fn test_admin_section() {
        let config = from_toml(
            r#"
            [database]
            url = "sqlite::memory:"
            max_connections = 1

            [server]
            http_port = 0

            [jwt]
            secret = "0123456789abcdef0123456789abcdef"
            expiration_hours = 24

            [admin]
            name = "Librarian"
            email = "librarian@example.com"
            password = "change-me"
            "#,
        );

        let admin = config.admin.unwrap();
        assert_eq!(admin.email, "librarian@example.com");
        assert!(!config.jwt.is_secret_weak());
    }
}
