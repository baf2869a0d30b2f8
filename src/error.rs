use reqwest::StatusCode;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    UnknownEnvironment(String),
    InvalidBaseUrl { url: String, reason: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::UnknownEnvironment(name) => write!(
                f,
                "unknown environment {name:?} (expected \"development\" or \"production\")"
            ),
            ConfigError::InvalidBaseUrl { url, reason } => {
                write!(f, "invalid base URL {url:?}: {reason}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug)]
pub enum ApiError {
    Config(ConfigError),
    Http(reqwest::Error),
    Status { status: StatusCode, body: String },
    AlreadyInstalled,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Config(err) => write!(f, "config error: {err}"),
            ApiError::Http(err) => write!(f, "http error: {err}"),
            ApiError::Status { status, body } if body.is_empty() => {
                write!(f, "server replied {status}")
            }
            ApiError::Status { status, body } => write!(f, "server replied {status}: {body}"),
            ApiError::AlreadyInstalled => write!(f, "a global API client is already installed"),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Config(err) => Some(err),
            ApiError::Http(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ConfigError> for ApiError {
    fn from(value: ConfigError) -> Self {
        ApiError::Config(value)
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(value: reqwest::Error) -> Self {
        ApiError::Http(value)
    }
}

/// Raised when a raw JSON search payload lacks the structure it needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseShapeError {
    MissingField(&'static str),
    NotAnArray(&'static str),
}

impl fmt::Display for ResponseShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseShapeError::MissingField(field) => write!(f, "missing field `{field}`"),
            ResponseShapeError::NotAnArray(field) => write!(f, "field `{field}` is not an array"),
        }
    }
}

impl std::error::Error for ResponseShapeError {}
