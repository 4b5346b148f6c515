//! Error types for the InvestMate application.

use thiserror::Error;

/// The main error type for InvestMate.
#[derive(Error, Debug)]
pub enum Error {
    /// IO errors (file operations, terminal, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Terminal/TUI related errors
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// HTTP transport errors from the AI service
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The AI service answered with a non-success status
    #[error("AI service returned status {status}: {message}")]
    Service { status: u16, message: String },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A collaborator reply did not match the expected schema
    #[error("Decode error: {0}")]
    Decode(#[from] crate::api::DecodeError),

    /// Channel communication errors
    #[error("Channel error: {0}")]
    Channel(String),

    /// Invalid input or state
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Rate limiting errors
    #[error("Rate limited: retry after {0} seconds")]
    RateLimited(u64),

    /// Generic application error
    #[error("{0}")]
    Application(String),
}

/// Alias for Result with our Error type.
pub type Result<T> = std::result::Result<T, Error>;

impl From<config::ConfigError> for Error {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

impl Error {
    /// Create a new terminal error.
    pub fn terminal(msg: impl Into<String>) -> Self {
        Self::Terminal(msg.into())
    }

    /// Create a new config error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new channel error.
    pub fn channel(msg: impl Into<String>) -> Self {
        Self::Channel(msg.into())
    }

    /// Create a new invalid input error.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a new application error.
    pub fn application(msg: impl Into<String>) -> Self {
        Self::Application(msg.into())
    }

    /// Check if this error is transient (a later request may succeed).
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Http(_) | Self::RateLimited(_) | Self::Channel(_) | Self::Service { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recoverable_classification() {
        assert!(Error::RateLimited(3).is_recoverable());
        assert!(
            Error::Service {
                status: 503,
                message: "overloaded".into()
            }
            .is_recoverable()
        );
        assert!(!Error::config("bad").is_recoverable());
        assert!(!Error::invalid_input("empty").is_recoverable());
    }

    #[test]
    fn test_display_messages() {
        assert_eq!(
            Error::config("missing model").to_string(),
            "Configuration error: missing model"
        );
        assert_eq!(
            Error::RateLimited(5).to_string(),
            "Rate limited: retry after 5 seconds"
        );
    }
}
