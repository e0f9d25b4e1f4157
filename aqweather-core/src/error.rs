use thiserror::Error;

/// Failures of a provider call.
///
/// `Display` is the exact text shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// The weather endpoint answered 404.
    #[error("City not found. Please check spelling.")]
    NotFound,

    /// Any other non-success status.
    #[error("Something went wrong. Try again.")]
    Request { status: u16 },

    /// Network failure or an unreadable body.
    #[error("{0}")]
    Transport(String),
}

impl SearchError {
    pub fn from_status(status: reqwest::StatusCode) -> Self {
        if status == reqwest::StatusCode::NOT_FOUND {
            SearchError::NotFound
        } else {
            SearchError::Request { status: status.as_u16() }
        }
    }
}

impl From<reqwest::Error> for SearchError {
    /// The request URL carries the API key, so it never reaches the message.
    fn from(err: reqwest::Error) -> Self {
        let summary = if err.is_timeout() {
            "Request timed out"
        } else if err.is_connect() {
            "Could not connect to the weather service"
        } else if err.is_decode() || err.is_body() {
            "Could not read the weather service response"
        } else {
            "Request to the weather service failed"
        };

        let err = err.without_url();
        let mut message = summary.to_string();
        let mut source = std::error::Error::source(&err);
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }

        SearchError::Transport(message)
    }
}

impl From<serde_json::Error> for SearchError {
    fn from(err: serde_json::Error) -> Self {
        SearchError::Transport(err.to_string())
    }
}
