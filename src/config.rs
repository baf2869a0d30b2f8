use crate::error::ConfigError;
use once_cell::sync::Lazy;
use reqwest::Url;
use std::env;
use std::fmt;
use std::str::FromStr;

pub const ENV_VAR: &str = "VOCA_ENV";
pub const BASE_URL_VAR: &str = "VOCA_API_BASE_URL";

static DEVELOPMENT_BASE_URL: Lazy<Url> =
    Lazy::new(|| Url::parse("http://localhost:8000/api/").expect("valid development base URL"));
static PRODUCTION_BASE_URL: Lazy<Url> =
    Lazy::new(|| Url::parse("http://104.247.76.243/api/").expect("valid production base URL"));

#[derive(Debug, Clone, Copy, Eq, PartialEq, Default)]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    pub fn base_url(self) -> &'static Url {
        match self {
            Environment::Development => &*DEVELOPMENT_BASE_URL,
            Environment::Production => &*PRODUCTION_BASE_URL,
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Production => write!(f, "production"),
        }
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "development" => Ok(Environment::Development),
            "production" => Ok(Environment::Production),
            other => Err(ConfigError::UnknownEnvironment(other.to_string())),
        }
    }
}

/// Where the client sends requests. Built once, then handed to `VocaApi::new`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub environment: Environment,
    pub base_url: Url,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::for_environment(Environment::default())
    }
}

impl ApiConfig {
    pub fn for_environment(environment: Environment) -> Self {
        Self {
            environment,
            base_url: environment.base_url().clone(),
        }
    }

    pub fn with_base_url(mut self, url: &str) -> Result<Self, ConfigError> {
        self.base_url = parse_base_url(url)?;
        Ok(self)
    }

    /// Reads `VOCA_ENV` (default `development`) and the optional
    /// `VOCA_API_BASE_URL` override.
    pub fn from_env() -> Result<Self, ConfigError> {
        let name = env::var(ENV_VAR).ok();
        let base_url = env::var(BASE_URL_VAR).ok();
        Self::from_values(name.as_deref(), base_url.as_deref())
    }

    pub fn from_values(
        environment: Option<&str>,
        base_url: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let environment = match environment.filter(|name| !name.trim().is_empty()) {
            Some(name) => name.parse()?,
            None => Environment::default(),
        };
        let config = Self::for_environment(environment);
        match base_url.filter(|url| !url.trim().is_empty()) {
            Some(url) => config.with_base_url(url),
            None => Ok(config),
        }
    }
}

fn parse_base_url(url: &str) -> Result<Url, ConfigError> {
    let parsed = Url::parse(url.trim()).map_err(|err| ConfigError::InvalidBaseUrl {
        url: url.to_string(),
        reason: err.to_string(),
    })?;
    if parsed.cannot_be_a_base() {
        return Err(ConfigError::InvalidBaseUrl {
            url: url.to_string(),
            reason: "URL cannot be used as a base".to_string(),
        });
    }
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_development() {
        let config = ApiConfig::from_values(None, None).unwrap();
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.base_url.as_str(), "http://localhost:8000/api/");
        assert_eq!(config, ApiConfig::default());
    }

    #[test]
    fn selects_production() {
        let config = ApiConfig::from_values(Some("production"), None).unwrap();
        assert_eq!(config.base_url.as_str(), "http://104.247.76.243/api/");
    }

    #[test]
    fn blank_values_fall_back() {
        let config = ApiConfig::from_values(Some(""), Some("  ")).unwrap();
        assert_eq!(config, ApiConfig::default());
    }

    #[test]
    fn rejects_unknown_environment() {
        let err = ApiConfig::from_values(Some("staging"), None).unwrap_err();
        assert_eq!(err, ConfigError::UnknownEnvironment("staging".to_string()));
    }

    #[test]
    fn base_url_override() {
        let config =
            ApiConfig::from_values(Some("production"), Some("http://127.0.0.1:9000/api/")).unwrap();
        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.base_url.as_str(), "http://127.0.0.1:9000/api/");

        let err = ApiConfig::default().with_base_url("not a url").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBaseUrl { .. }));
        assert!(ApiConfig::default().with_base_url("mailto:a@b.c").is_err());
    }
}
