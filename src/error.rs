//! Error types for the studio core.

/// Errors that can occur while driving a generation session.
#[derive(Debug, thiserror::Error)]
pub enum ImgForgeError {
    /// Request rejected before any network call (missing prompt or images).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The service call settled but produced no usable image.
    #[error("generation failed: {0}")]
    Service(String),

    /// API key missing or invalid.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Sanitized response body.
        message: String,
    },

    /// Content was blocked by safety filters.
    #[error("content blocked: {0}")]
    ContentBlocked(String),

    /// Network or HTTP error.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Failed to decode base64 data.
    #[error("failed to decode: {0}")]
    Decode(String),

    /// I/O error (e.g., saving file).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ImgForgeError {
    /// Returns true if the request was rejected before reaching the service.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidRequest(_))
    }

    /// Returns true if the failure came from the remote service after the
    /// call was issued.
    pub fn is_service_failure(&self) -> bool {
        matches!(
            self,
            Self::Service(_)
                | Self::Auth(_)
                | Self::Api { .. }
                | Self::ContentBlocked(_)
                | Self::Network(_)
        )
    }
}

/// Result type alias for studio operations.
pub type Result<T> = std::result::Result<T, ImgForgeError>;

/// Bounds and cleans an error body returned by the remote API so it is
/// printable as a user-facing message.
pub(crate) fn sanitize_error_message(text: &str) -> String {
    const MAX_LEN: usize = 300;

    let cleaned: String = text
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();
    let trimmed = cleaned.trim();

    if trimmed.len() <= MAX_LEN {
        return trimmed.to_string();
    }

    let mut end = MAX_LEN;
    while !trimmed.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &trimmed[..end])
}
