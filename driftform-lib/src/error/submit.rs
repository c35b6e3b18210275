//! Submission transport error types

/// Transport-level failures of a submission.
///
/// These never carry per-field information; the engine reports all of them
/// through the form banner.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    /// Network error while talking to the endpoint.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The endpoint answered with a status that carries no verdict.
    #[error("HTTP {status}: {body}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// The endpoint answered with a body that is not a valid verdict.
    #[error("Response parse error: {0}")]
    Parse(String),

    /// The endpoint could not be reached at all.
    #[error("Endpoint unavailable: {0}")]
    Unavailable(String),
}

impl SubmitError {
    /// Creates a new parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Creates a new unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }

    /// Returns the HTTP status code if this is an HTTP error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns `true` if submitting again may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Http { status, .. } => matches!(status, 429 | 500 | 502 | 503 | 504),
            Self::Network(_) | Self::Unavailable(_) => true,
            Self::Parse(_) => false,
        }
    }
}
