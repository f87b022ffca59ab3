use crate::error::{Error, Result};
use dotenvy::dotenv;
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_address: String,
    pub database_url: String,
    pub database_max_connections: u32,
    pub session_secret: String,
    pub session_ttl_hours: i64,
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        Ok(Self {
            server_address: get_env_or("SERVER_ADDRESS", "127.0.0.1:5000"),
            database_url: get_env_or("DATABASE_URL", "sqlite://database.db"),
            database_max_connections: get_env_parse_or("DATABASE_MAX_CONNECTIONS", 5)?,
            session_secret: get_env("SESSION_SECRET")?,
            session_ttl_hours: check_session_ttl(get_env_parse_or("SESSION_TTL_HOURS", 24)?)?,
            log_format: match env::var("LOG_FORMAT") {
                Ok(v) if v.eq_ignore_ascii_case("json") => LogFormat::Json,
                _ => LogFormat::Text,
            },
        })
    }
}

/// One hour up to one year; anything else would make `issue_token` overflow or
/// mint already-expired sessions.
const SESSION_TTL_RANGE: std::ops::RangeInclusive<i64> = 1..=8760;

fn check_session_ttl(hours: i64) -> Result<i64> {
    if SESSION_TTL_RANGE.contains(&hours) {
        Ok(hours)
    } else {
        Err(Error::Config(format!(
            "SESSION_TTL_HOURS must be between {} and {}, got {}",
            SESSION_TTL_RANGE.start(),
            SESSION_TTL_RANGE.end(),
            hours
        )))
    }
}

fn get_env(name: &str) -> Result<String> {
    env::var(name).map_err(|_| Error::Config(format!("Missing environment variable: {}", name)))
}

fn get_env_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn get_env_parse_or<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e))),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_falls_back_to_default_when_unset() {
        let value: u32 = get_env_parse_or("QUIZ_FORGE_UNSET_VARIABLE", 7).unwrap();
        assert_eq!(value, 7);
    }

    #[test]
    fn missing_required_variable_is_a_config_error() {
        let err = get_env("QUIZ_FORGE_UNSET_VARIABLE").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn session_ttl_must_be_positive_and_bounded() {
        assert_eq!(check_session_ttl(24).unwrap(), 24);
        assert_eq!(check_session_ttl(8760).unwrap(), 8760);
        for bad in [0, -1, 8761, i64::MAX] {
            assert!(matches!(check_session_ttl(bad), Err(Error::Config(_))));
        }
    }
}
