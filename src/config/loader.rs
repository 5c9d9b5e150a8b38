//! Load [`AppConfig`] from environment variables (optionally seeded from a `.env` file).

use crate::config::types::{AppConfig, Environment};
use crate::config::validate;
use crate::error::ConfigError;
use std::str::FromStr;
use std::time::Duration;

/// Read `.env` if present, then the process environment. Missing variables keep their defaults.
pub fn load_from_env() -> Result<AppConfig, ConfigError> {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            tracing::warn!(error = %e, "ignoring unreadable .env file");
        }
    }
    load_with(|key| std::env::var(key).ok())
}

/// Build config from any key lookup. Values are trimmed; empty values count as unset.
pub fn load_with<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
    let mut config = AppConfig::default();

    if let Some(v) = get("BIND_ADDR") {
        config.bind_addr = v;
    }
    if let Some(v) = get("PORT") {
        config.port = parse("PORT", &v)?;
    }
    if let Some(v) = get("APP_ENV") {
        config.env = Environment::parse(&v).ok_or(ConfigError::InvalidValue { key: "APP_ENV", value: v })?;
    }
    if let Some(v) = get("DATABASE_URL") {
        config.db.url = v;
    }
    if let Some(v) = get("DB_MAX_CONNECTIONS") {
        config.db.max_connections = parse("DB_MAX_CONNECTIONS", &v)?;
    }
    if let Some(v) = get("DB_IDLE_TIMEOUT_SECS") {
        config.db.idle_timeout = Duration::from_secs(parse("DB_IDLE_TIMEOUT_SECS", &v)?);
    }
    if let Some(v) = get("LIST_QUERY_TIMEOUT_SECS") {
        config.list_query_timeout = Duration::from_secs(parse("LIST_QUERY_TIMEOUT_SECS", &v)?);
    }
    if let Some(v) = get("REQUEST_TIMEOUT_SECS") {
        config.request_timeout = Duration::from_secs(parse("REQUEST_TIMEOUT_SECS", &v)?);
    }

    validate(&config)?;
    Ok(config)
}

fn parse<T: FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidValue {
        key,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        load_with(|k| map.get(k).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let config = load(&[]).unwrap();
        assert_eq!(config.port, 4000);
        assert_eq!(config.env, Environment::Development);
        assert_eq!(config.list_query_timeout, Duration::from_secs(3));
        assert_eq!(config.listen_addr(), "0.0.0.0:4000");
    }

    #[test]
    fn reads_overrides() {
        let config = load(&[
            ("PORT", "8080"),
            ("APP_ENV", "Production"),
            ("DATABASE_URL", "postgres://db/catalog"),
            ("DB_MAX_CONNECTIONS", " 10 "),
            ("LIST_QUERY_TIMEOUT_SECS", "5"),
        ])
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.env, Environment::Production);
        assert_eq!(config.db.url, "postgres://db/catalog");
        assert_eq!(config.db.max_connections, 10);
        assert_eq!(config.list_query_timeout, Duration::from_secs(5));
    }

    #[test]
    fn rejects_unparseable_values() {
        match load(&[("PORT", "http")]) {
            Err(ConfigError::InvalidValue { key, value }) => {
                assert_eq!(key, "PORT");
                assert_eq!(value, "http");
            }
            other => panic!("expected invalid value, got {:?}", other),
        }
        assert!(load(&[("APP_ENV", "qa")]).is_err());
    }

    #[test]
    fn empty_values_count_as_unset() {
        let config = load(&[("PORT", "  ")]).unwrap();
        assert_eq!(config.port, 4000);
    }
}
