//! Config validation: ranges and required values.

use crate::config::AppConfig;
use crate::error::ConfigError;

pub fn validate(config: &AppConfig) -> Result<(), ConfigError> {
    if config.port == 0 {
        return Err(ConfigError::Validation("PORT must be greater than zero".into()));
    }
    if config.db.url.is_empty() {
        return Err(ConfigError::Validation("DATABASE_URL must be set".into()));
    }
    if config.db.max_connections == 0 {
        return Err(ConfigError::Validation(
            "DB_MAX_CONNECTIONS must be greater than zero".into(),
        ));
    }
    if config.list_query_timeout.is_zero() {
        return Err(ConfigError::Validation(
            "LIST_QUERY_TIMEOUT_SECS must be greater than zero".into(),
        ));
    }
    if config.request_timeout < config.list_query_timeout {
        return Err(ConfigError::Validation(
            "REQUEST_TIMEOUT_SECS must not be shorter than LIST_QUERY_TIMEOUT_SECS".into(),
        ));
    }
    Ok(())
}
