use std::env;
use std::net::SocketAddr;

use thiserror::Error;

const DEFAULT_DATABASE_URL: &str = "sqlite://courses.db?mode=rwc";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:5173";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_API_URL: &str = "http://localhost:3000/api/courses";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} has an invalid value {value:?}: {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    /// The only origin browsers may call the API from.
    pub allowed_origin: String,
    pub max_connections: u32,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = var_or("DATABASE_URL", DEFAULT_DATABASE_URL);
        let bind_addr = parse_var("BIND_ADDR", DEFAULT_BIND_ADDR)?;
        let allowed_origin = var_or("ALLOWED_ORIGIN", DEFAULT_ALLOWED_ORIGIN);
        if allowed_origin.parse::<axum::http::HeaderValue>().is_err() {
            return Err(ConfigError::Invalid {
                name: "ALLOWED_ORIGIN",
                value: allowed_origin,
                reason: "not a valid header value".to_string(),
            });
        }
        let max_connections = match env::var("DATABASE_MAX_CONNECTIONS") {
            Ok(raw) => parse_value("DATABASE_MAX_CONNECTIONS", &raw)?,
            Err(_) => DEFAULT_MAX_CONNECTIONS,
        };

        Ok(Self {
            database_url,
            bind_addr,
            allowed_origin,
            max_connections,
        })
    }
}

#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub api_url: String,
}

impl ClientConfig {
    pub fn from_env() -> Self {
        Self {
            api_url: var_or("CATALOG_API_URL", DEFAULT_API_URL),
        }
    }
}

fn var_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn parse_var<T>(name: &'static str, default: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    parse_value(name, &var_or(name, default))
}

fn parse_value<T>(name: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse::<T>().map_err(|e| ConfigError::Invalid {
        name,
        value: raw.to_string(),
        reason: e.to_string(),
    })
}
