//! Parsing error types
//!
//! Data-quality problems never surface here: absent fields and malformed
//! markup degrade inside the parsing report. These errors cover contract
//! violations only - bad selector configuration and unresolvable URLs.

use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum ParsingError {
    #[error("invalid CSS selector '{selector}': {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("URL resolution failed for '{url}': {reason}")]
    UrlResolutionFailed { url: String, reason: String },

    #[error("invalid parser configuration: {message}")]
    ConfigurationError { message: String },
}

impl ParsingError {
    pub fn invalid_selector(selector: &str, reason: impl ToString) -> Self {
        Self::InvalidSelector {
            selector: selector.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn url_resolution_failed(url: &str, reason: impl ToString) -> Self {
        Self::UrlResolutionFailed {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::ConfigurationError {
            message: message.into(),
        }
    }
}

pub type ParsingResult<T> = Result<T, ParsingError>;
