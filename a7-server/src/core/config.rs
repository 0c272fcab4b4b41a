use chrono_tz::Tz;

use crate::auth::JwtConfig;
use crate::utils::{AppError, AppResult};

/// Server configuration
///
/// # Environment variables
///
/// A `.env` file in the working directory is loaded first; real
/// environment variables win over it.
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | ENVIRONMENT | development | development / staging / production |
/// | LOG_LEVEL | info | tracing filter directive |
/// | LOG_DIR | (unset) | root for rotating log files; console only when unset |
/// | RESTAURANT_ID | default | the one restaurant this server serves |
/// | RESTAURANT_TIMEZONE | UTC | IANA zone for business-day boundaries |
/// | POLL_INTERVAL_SECS | 10 | client refresh interval advertised to the UI |
/// | JWT_SECRET | generated in development | HS256 key, at least 32 chars |
/// | JWT_EXPIRATION_MINUTES | 1440 | token lifetime |
/// | JWT_ISSUER | a7-server | |
/// | JWT_AUDIENCE | a7-clients | |
#[derive(Debug, Clone)]
pub struct Config {
    /// development | staging | production
    pub environment: String,
    pub log_level: String,
    pub log_dir: Option<String>,
    pub restaurant_id: String,
    /// Fallback zone when the restaurant record has none
    pub timezone: Tz,
    pub poll_interval_secs: u64,
    pub jwt: JwtConfig,
}

impl Config {
    /// Load `.env` (if present), then read the process environment
    pub fn from_env() -> AppResult<Self> {
        dotenv::dotenv().ok();
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        let environment = var("ENVIRONMENT").unwrap_or_else(|| "development".into());
        let production = environment == "production";

        let timezone = match var("RESTAURANT_TIMEZONE") {
            Some(name) => name.parse::<Tz>().map_err(|_| {
                AppError::config(format!("RESTAURANT_TIMEZONE is not an IANA zone: {name}"))
            })?,
            None => Tz::UTC,
        };

        let jwt = JwtConfig::from_vars(&var, production).map_err(AppError::from)?;

        Ok(Self {
            environment,
            log_level: var("LOG_LEVEL").unwrap_or_else(|| "info".into()),
            log_dir: var("LOG_DIR").filter(|d| !d.trim().is_empty()),
            restaurant_id: var("RESTAURANT_ID")
                .map(|id| id.trim().to_string())
                .filter(|id| !id.is_empty())
                .unwrap_or_else(|| "default".into()),
            timezone,
            poll_interval_secs: var("POLL_INTERVAL_SECS")
                .and_then(|v| v.parse().ok())
                .filter(|secs| *secs > 0)
                .unwrap_or(10),
            jwt,
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// JSON log lines outside development
    pub fn json_logs(&self) -> bool {
        !self.is_development()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_vars(lookup(&[])).unwrap();
        assert!(config.is_development());
        assert_eq!(config.log_level, "info");
        assert!(config.log_dir.is_none());
        assert_eq!(config.restaurant_id, "default");
        assert_eq!(config.timezone, Tz::UTC);
        assert_eq!(config.poll_interval_secs, 10);
        assert_eq!(config.jwt.expiration_minutes, 1440);
        assert!(config.jwt.secret.len() >= 32);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_vars(lookup(&[
            ("ENVIRONMENT", "staging"),
            ("LOG_LEVEL", "debug"),
            ("LOG_DIR", "/tmp/a7/logs"),
            ("RESTAURANT_ID", " rest-9 "),
            ("RESTAURANT_TIMEZONE", "Europe/Madrid"),
            ("POLL_INTERVAL_SECS", "30"),
            ("JWT_SECRET", SECRET),
            ("JWT_EXPIRATION_MINUTES", "60"),
        ]))
        .unwrap();
        assert!(config.json_logs());
        assert_eq!(config.log_dir.as_deref(), Some("/tmp/a7/logs"));
        assert_eq!(config.restaurant_id, "rest-9");
        assert_eq!(config.timezone, chrono_tz::Europe::Madrid);
        assert_eq!(config.poll_interval_secs, 30);
        assert_eq!(config.jwt.secret, SECRET);
        assert_eq!(config.jwt.expiration_minutes, 60);
    }

    #[test]
    fn test_bad_timezone_is_config_error() {
        let err = Config::from_vars(lookup(&[("RESTAURANT_TIMEZONE", "Mars/Olympus")])).unwrap_err();
        assert_eq!(err.code, crate::utils::ErrorCode::ConfigError);
    }

    #[test]
    fn test_production_requires_secret() {
        assert!(Config::from_vars(lookup(&[("ENVIRONMENT", "production")])).is_err());
        let short = Config::from_vars(lookup(&[("ENVIRONMENT", "production"), ("JWT_SECRET", "short")]));
        assert!(short.is_err());
        let ok = Config::from_vars(lookup(&[("ENVIRONMENT", "production"), ("JWT_SECRET", SECRET)]));
        assert!(ok.is_ok());
    }

    #[test]
    fn test_zero_poll_interval_falls_back() {
        let config = Config::from_vars(lookup(&[("POLL_INTERVAL_SECS", "0")])).unwrap();
        assert_eq!(config.poll_interval_secs, 10);
    }
}
