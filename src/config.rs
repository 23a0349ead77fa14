use std::{env, fmt::Display, str::FromStr};

use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug)]
#[error("Invalid {key} value {value:?}: {reason}")]
pub struct ConfigError {
    pub key: &'static str,
    pub value: String,
    pub reason: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the shop REST API.
    pub api_url: String,
    pub host: String,
    pub port: u16,
    pub templates: String,
    pub static_dir: String,
    /// Placeholder checkout identity for development without the host bridge.
    pub test_user_id: Option<i64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8080".to_string(),
            host: "127.0.0.1".to_string(),
            port: 3000,
            templates: "public/**/*.html".to_string(),
            static_dir: "public/static".to_string(),
            test_user_id: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let config = Self {
            api_url: try_load("API", defaults.api_url)?,
            host: try_load("HOST", defaults.host)?,
            port: try_load("PORT", defaults.port)?,
            templates: try_load("TEMPLATES", defaults.templates)?,
            static_dir: try_load("STATIC_DIR", defaults.static_dir)?,
            test_user_id: optional("STOREFRONT_TEST_USER_ID")?,
        };
        if let Some(id) = config.test_user_id {
            warn!(
                user_id = id,
                "STOREFRONT_TEST_USER_ID is set: checkout accepts orders without a host identity"
            );
        }
        Ok(config)
    }
}

fn parse<T: FromStr>(key: &'static str, value: String) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError {
        key,
        reason: e.to_string(),
        value,
    })
}

fn try_load<T: FromStr + Display>(key: &'static str, default: T) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    match env::var(key) {
        Ok(value) => parse(key, value),
        Err(_) => {
            info!("{key} not set, using default: {default}");
            Ok(default)
        }
    }
}

fn optional<T: FromStr>(key: &'static str) -> Result<Option<T>, ConfigError>
where
    T::Err: Display,
{
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => parse(key, value).map(Some),
        _ => Ok(None),
    }
}
