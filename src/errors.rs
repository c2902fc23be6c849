use actix_web::http::StatusCode;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnaplinkError {
    InvalidUrl(String),
    InvalidValidity(String),
    ShortcodeExists(String),
    CodeSpaceExhausted(String),
    NotFound(String),
    Expired(String),
}

impl SnaplinkError {
    pub fn code(&self) -> &'static str {
        match self {
            SnaplinkError::InvalidUrl(_) => "E001",
            SnaplinkError::InvalidValidity(_) => "E002",
            SnaplinkError::ShortcodeExists(_) => "E003",
            SnaplinkError::CodeSpaceExhausted(_) => "E004",
            SnaplinkError::NotFound(_) => "E005",
            SnaplinkError::Expired(_) => "E006",
        }
    }

    pub fn error_type(&self) -> &'static str {
        match self {
            SnaplinkError::InvalidUrl(_) => "Invalid URL",
            SnaplinkError::InvalidValidity(_) => "Invalid Validity Period",
            SnaplinkError::ShortcodeExists(_) => "Shortcode Already Exists",
            SnaplinkError::CodeSpaceExhausted(_) => "Shortcode Space Exhausted",
            SnaplinkError::NotFound(_) => "Short URL Not Found",
            SnaplinkError::Expired(_) => "Short URL Expired",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            SnaplinkError::InvalidUrl(msg) => msg,
            SnaplinkError::InvalidValidity(msg) => msg,
            SnaplinkError::ShortcodeExists(msg) => msg,
            SnaplinkError::CodeSpaceExhausted(msg) => msg,
            SnaplinkError::NotFound(msg) => msg,
            SnaplinkError::Expired(msg) => msg,
        }
    }

    /// HTTP status the caller should report this failure with.
    pub fn http_status(&self) -> StatusCode {
        match self {
            SnaplinkError::InvalidUrl(_) => StatusCode::BAD_REQUEST,
            SnaplinkError::InvalidValidity(_) => StatusCode::BAD_REQUEST,
            SnaplinkError::ShortcodeExists(_) => StatusCode::CONFLICT,
            SnaplinkError::CodeSpaceExhausted(_) => StatusCode::SERVICE_UNAVAILABLE,
            SnaplinkError::NotFound(_) => StatusCode::NOT_FOUND,
            SnaplinkError::Expired(_) => StatusCode::GONE,
        }
    }
}

impl fmt::Display for SnaplinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.error_type(), self.message())
    }
}

impl std::error::Error for SnaplinkError {}

// Convenience constructors
impl SnaplinkError {
    pub fn invalid_url<T: Into<String>>(msg: T) -> Self {
        SnaplinkError::InvalidUrl(msg.into())
    }

    pub fn invalid_validity<T: Into<String>>(msg: T) -> Self {
        SnaplinkError::InvalidValidity(msg.into())
    }

    pub fn shortcode_exists<T: Into<String>>(msg: T) -> Self {
        SnaplinkError::ShortcodeExists(msg.into())
    }

    pub fn code_space_exhausted<T: Into<String>>(msg: T) -> Self {
        SnaplinkError::CodeSpaceExhausted(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        SnaplinkError::NotFound(msg.into())
    }

    pub fn expired<T: Into<String>>(msg: T) -> Self {
        SnaplinkError::Expired(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, SnaplinkError>;
