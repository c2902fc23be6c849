//! Target URL validation
//!
//! A shortcode must point at an absolute URL with a scheme and a host.
//! Relative references and scheme-only strings are rejected before any
//! registry state is touched.

use url::Url;

/// URL validation error
#[derive(Debug)]
pub enum UrlValidationError {
    EmptyUrl,
    MissingHost(String),
    InvalidFormat(String),
}

impl std::fmt::Display for UrlValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyUrl => write!(f, "URL cannot be empty"),
            Self::MissingHost(url) => write!(f, "URL has no host: {}", url),
            Self::InvalidFormat(msg) => write!(f, "Invalid URL format: {}", msg),
        }
    }
}

impl std::error::Error for UrlValidationError {}

/// Validate that a string is an absolute URL (scheme + host).
pub fn validate_url(url: &str) -> Result<(), UrlValidationError> {
    let url = url.trim();

    if url.is_empty() {
        return Err(UrlValidationError::EmptyUrl);
    }

    let parsed = Url::parse(url).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    if !parsed.has_host() {
        return Err(UrlValidationError::MissingHost(url.to_string()));
    }

    Ok(())
}
