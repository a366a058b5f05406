//! Assistant client error types.

use std::sync::Arc;

use folio_core::Error;

const INVALID_KEY_NOTICE: &str = "Invalid API key. Please check your configuration.";
const RATE_LIMIT_NOTICE: &str = "Rate limit exceeded. Please try again in a moment.";
const UNSTABLE_LINK: &str = "Neural link unstable. Try again?";

/// Errors from the generative-language API client.
#[derive(Debug, thiserror::Error)]
pub enum AssistantError {
    /// No API key configured.
    #[error("missing API key: FOLIO_ASSISTANT_API_KEY not set")]
    MissingApiKey,

    /// Blank or oversized question.
    #[error("invalid question: {0}")]
    InvalidQuestion(String),

    /// Authentication failed (invalid API key).
    #[error("authentication failed: {0}")]
    Auth(String),

    /// Rate limited or out of quota.
    #[error("rate limited: {0}")]
    RateLimited(String),

    /// Any other non-2xx response.
    #[error("HTTP error {status}: {message}")]
    Http { status: u16, message: String },

    /// Request timeout.
    #[error("request timeout")]
    Timeout,

    /// Network error.
    #[error("network error: {0}")]
    Network(Arc<reqwest::Error>),

    /// Response parse error.
    #[error("parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for AssistantError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() { AssistantError::Timeout } else { AssistantError::Network(Arc::new(err)) }
    }
}

impl AssistantError {
    /// The notice shown in the chat in place of a reply.
    ///
    /// Key problems and rate limits get fixed wording; anything else is
    /// reported as a connection error carrying the underlying message.
    pub fn user_message(&self) -> String {
        match self {
            AssistantError::Auth(_) | AssistantError::MissingApiKey => INVALID_KEY_NOTICE.to_string(),
            AssistantError::RateLimited(_) => RATE_LIMIT_NOTICE.to_string(),
            AssistantError::Http { message, .. } if message.contains("API key") => INVALID_KEY_NOTICE.to_string(),
            AssistantError::Http { message, .. } if message.contains("quota") => RATE_LIMIT_NOTICE.to_string(),
            AssistantError::Http { message, .. } if !message.is_empty() => format!("Connection Error: {message}"),
            AssistantError::Http { .. } => format!("Connection Error: {UNSTABLE_LINK}"),
            other => format!("Connection Error: {other}"),
        }
    }
}

impl From<AssistantError> for Error {
    fn from(err: AssistantError) -> Self {
        match err {
            AssistantError::InvalidQuestion(msg) => Error::InvalidInput(msg),
            AssistantError::MissingApiKey | AssistantError::Auth(_) => Error::AssistantAuth(err.to_string()),
            AssistantError::RateLimited(_) => Error::AssistantRateLimited(err.to_string()),
            AssistantError::Timeout => Error::FetchTimeout(err.to_string()),
            other => Error::AssistantFailed(other.to_string()),
        }
    }
}
