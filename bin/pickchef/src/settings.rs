//! Runtime settings.
//!
//! Values come from the process environment (after `.env` is loaded), using
//! the `PICKCHEF_` prefix, e.g. `PICKCHEF_PORT=9000`. Anything unset falls back
//! to the local development defaults below.

use config::{Config, ConfigError, Environment};
use serde::Deserialize;

pub const DEFAULT_DATABASE_URL: &str = "sqlite:pickchef.db?mode=rwc";
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_ALLOWED_ORIGINS: [&str; 2] = ["http://localhost:5173", "http://localhost:3000"];

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub max_connections: u32,
    /// `PICKCHEF_ALLOWED_ORIGINS` is comma separated.
    pub allowed_origins: Vec<String>,
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_env(
            Environment::with_prefix("PICKCHEF")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("allowed_origins"),
        )
    }

    fn from_env(env: Environment) -> Result<Self, ConfigError> {
        let origins: Vec<String> = DEFAULT_ALLOWED_ORIGINS.iter().map(|o| o.to_string()).collect();

        Config::builder()
            .set_default("database_url", DEFAULT_DATABASE_URL)?
            .set_default("host", DEFAULT_HOST)?
            .set_default("port", DEFAULT_PORT as i64)?
            .set_default("max_connections", DEFAULT_MAX_CONNECTIONS as i64)?
            .set_default("allowed_origins", origins)?
            .add_source(env)
            .build()?
            .try_deserialize()
    }

    pub fn bind_addr(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(vars: &[(&str, &str)]) -> Environment {
        let source: config::Map<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Environment::with_prefix("PICKCHEF")
            .try_parsing(true)
            .list_separator(",")
            .with_list_parse_key("allowed_origins")
            .source(Some(source))
    }

    #[test]
    fn test_defaults_apply_when_unset() {
        let settings = Settings::from_env(env(&[])).unwrap();
        assert_eq!(settings.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(settings.bind_addr(), ("127.0.0.1".to_string(), 8000));
        assert_eq!(settings.max_connections, 5);
        assert_eq!(
            settings.allowed_origins,
            vec!["http://localhost:5173", "http://localhost:3000"]
        );
    }

    #[test]
    fn test_environment_overrides() {
        let settings = Settings::from_env(env(&[
            ("PICKCHEF_PORT", "9000"),
            ("PICKCHEF_DATABASE_URL", "sqlite::memory:"),
            ("PICKCHEF_ALLOWED_ORIGINS", "https://a.example,https://b.example"),
        ]))
        .unwrap();
        assert_eq!(settings.port, 9000);
        assert_eq!(settings.database_url, "sqlite::memory:");
        assert_eq!(
            settings.allowed_origins,
            vec!["https://a.example", "https://b.example"]
        );
    }

    #[test]
    fn test_bad_port_is_an_error() {
        assert!(Settings::from_env(env(&[("PICKCHEF_PORT", "not-a-port")])).is_err());
    }
}
