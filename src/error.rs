//! Errors raised while talking to the remote APIs.

/// Failure of a request against the Reports API or the Content API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Invalid or missing configuration (bad base URL, unbuildable client)
    Config(String),
    /// Network or transport failure before a response was received
    Transport(String),
    /// The backend answered with a non-2xx status
    Status { status: u16, message: String },
    /// The response body could not be decoded into the expected shape
    Decode(String),
}

impl ApiError {
    /// Whether the failure came from a response we could not make sense of.
    pub fn is_unrecognized(&self) -> bool {
        matches!(self, ApiError::Decode(_))
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Config(msg) => write!(f, "Configuration error: {}", msg),
            ApiError::Transport(msg) => write!(f, "Request failed: {}", msg),
            ApiError::Status { status, message } if message.is_empty() => {
                write!(f, "Request failed with status code {}", status)
            }
            ApiError::Status { status, message } => {
                write!(f, "Request failed with status code {}: {}", status, message)
            }
            ApiError::Decode(msg) => write!(f, "Unexpected response: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else if let Some(status) = e.status() {
            ApiError::Status {
                status: status.as_u16(),
                message: String::new(),
            }
        } else {
            ApiError::Transport(e.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Decode(e.to_string())
    }
}

impl From<url::ParseError> for ApiError {
    fn from(e: url::ParseError) -> Self {
        ApiError::Config(format!("invalid URL: {}", e))
    }
}
