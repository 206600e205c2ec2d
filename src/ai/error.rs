use thiserror::Error;

/// Failure taxonomy for the AI proxy boundary.
///
/// The proxy reports configuration problems as 500s, throttling as
/// 429, and rejected input as 400; everything else (transport,
/// decoding, unexpected statuses) collapses into [`AiError::Failed`].
#[derive(Debug, Error)]
pub enum AiError {
    #[error("AI service is not configured: {0}")]
    NotConfigured(String),
    #[error("AI service is rate limited: {0}")]
    RateLimited(String),
    #[error("invalid request: {0}")]
    InvalidInput(String),
    #[error("AI request was cancelled")]
    Cancelled,
    #[error("AI request failed: {0}")]
    Failed(String),
}

impl AiError {
    /// Maps a non-success proxy response onto the taxonomy.
    pub(crate) fn from_response(status: reqwest::StatusCode, body: &str) -> Self {
        let message = error_message(body);
        match status.as_u16() {
            400 => Self::InvalidInput(message),
            429 => Self::RateLimited(message),
            500.. if message.to_ascii_lowercase().contains("not configured") => {
                Self::NotConfigured(message)
            }
            _ => Self::Failed(format!("{status}: {message}")),
        }
    }

    /// The coach-facing reply shown when a chat turn fails.
    pub fn coach_reply(&self) -> &'static str {
        match self {
            Self::NotConfigured(_) => {
                "I'm having trouble connecting to my knowledge base. \
                 Please check the application configuration."
            }
            Self::RateLimited(_) => {
                "I'm receiving too many requests right now. Please try again in a moment."
            }
            _ => "I'm sorry, I'm having trouble connecting right now. Please try again later.",
        }
    }
}

/// Pulls the `error` field out of a proxy error body, falling back to
/// the raw body when it is not the expected JSON shape.
fn error_message(body: &str) -> String {
    #[derive(serde::Deserialize)]
    struct ErrorBody {
        error: String,
    }
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => parsed.error,
        Err(_) => body.chars().take(200).collect(),
    }
}
