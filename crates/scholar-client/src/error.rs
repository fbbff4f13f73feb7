//! Client and configuration errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Request failed: {message}")]
    RequestFailed { message: String },
    #[error("Invalid URL: {url}")]
    InvalidUrl { url: String },
    #[error("Timeout")]
    Timeout,
    #[error("Rate limited")]
    RateLimited,
    #[error("Still rate limited after {attempts} attempts")]
    RetriesExhausted { attempts: u32 },
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Parse error: {message}")]
    ParseError { message: String },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ClientError::Timeout
        } else {
            ClientError::RequestFailed {
                message: e.to_string(),
            }
        }
    }
}

/// Configuration validation error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Missing field: {0}")]
    MissingField(String),
    #[error("Invalid URL for {name}: {url}")]
    InvalidUrl { name: &'static str, url: String },
    #[error("Value out of range: {0}")]
    OutOfRange(String),
    #[error("Invalid config file: {0}")]
    Parse(String),
}
