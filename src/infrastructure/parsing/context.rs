//! Parsing context for HTML extraction
//!
//! Context objects carry per-document information into a parse call; the
//! parser itself stays stateless and shareable.

use crate::infrastructure::parsing::config::naver;

/// Context for parsing a medicine detail page
#[derive(Debug, Clone)]
pub struct DetailParseContext {
    /// Document URL, recorded in the parsing report; may be empty
    pub url: String,

    /// Base URL for resolving relative image and reference links
    pub base_url: String,
}

impl DetailParseContext {
    /// Create a context for a document fetched from `url`
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            base_url: naver::BASE_URL.to_string(),
        }
    }

    /// Override the base URL used for relative link resolution
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}
