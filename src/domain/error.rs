use thiserror::Error;

/// Domain-level errors for the itinerary manager.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid destination: {0}")]
    Validation(String),

    #[error("Destination '{0}' not found")]
    NotFound(String),

    #[error("Malformed itinerary data: {0}")]
    MalformedRecord(String),

    #[error("IO error: {0}")]
    Io(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("AI advisor unavailable: {reason}")]
    AdvisoryUnavailable { reason: String },

    #[error("Authentication failed. Please check your OpenAI API key.")]
    AdvisoryAuth,

    #[error("Rate limit exceeded. Please try again later.")]
    AdvisoryRateLimited,

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("HTTP request failed: {0}")]
    HttpRequest(String),
}

impl From<std::io::Error> for DomainError {
    fn from(err: std::io::Error) -> Self {
        DomainError::Io(err.to_string())
    }
}

impl From<toml::de::Error> for DomainError {
    fn from(err: toml::de::Error) -> Self {
        DomainError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for DomainError {
    fn from(err: toml::ser::Error) -> Self {
        DomainError::Serialization(err.to_string())
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        // Syntax and missing-field errors both mean the stored data cannot be trusted.
        if err.is_io() {
            DomainError::Io(err.to_string())
        } else {
            DomainError::MalformedRecord(err.to_string())
        }
    }
}
