use thiserror::Error;

/// Transient failures talking to the backend
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    /// Non-2xx response; `message` is the server-provided text when present
    #[error("HTTP {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Status {
        status: u16,
        message: Option<String>,
    },

    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Server-provided message, if the backend sent one
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Status { message, .. } => message.as_deref(),
            ApiError::Network(_) | ApiError::Decode(_) => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Network(_) => "NETWORK_ERROR",
            ApiError::Status { .. } => "HTTP_STATUS",
            ApiError::Decode(_) => "DECODE_ERROR",
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else {
            ApiError::Network(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_message() {
        let err = ApiError::Status {
            status: 500,
            message: Some("Internal Server Error".into()),
        };
        assert_eq!(err.server_message(), Some("Internal Server Error"));
        assert_eq!(err.to_string(), "HTTP 500: Internal Server Error");
        assert_eq!(ApiError::Network("refused".into()).server_message(), None);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(ApiError::Decode("bad".into()).code(), "DECODE_ERROR");
        assert_eq!(
            ApiError::Status {
                status: 404,
                message: None
            }
            .to_string(),
            "HTTP 404: no message"
        );
    }
}
