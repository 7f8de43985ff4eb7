//! Errors crossing the HTTP boundary.

/// Transport and server failures reported by a `RawApiPort`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The request never produced an HTTP response.
    #[error("Request failed: {0}")]
    RequestFailed(String),
    /// The server answered with a non-success status.
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },
    #[error("Failed to parse response: {0}")]
    ParseError(String),
    #[error("Failed to serialize request: {0}")]
    SerializeError(String),
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// Text suitable for a blocking alert.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::RequestFailed(_) => {
                "Could not reach the server. Check your connection and try again.".to_string()
            }
            ApiError::Server { message, .. } => message.clone(),
            ApiError::ParseError(_) => "The server sent an unexpected response.".to_string(),
            ApiError::SerializeError(_) => "Could not prepare the request.".to_string(),
            ApiError::InvalidUrl(_) => "This action points to an invalid address.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_message_reaches_the_user_verbatim() {
        let err = ApiError::Server {
            status: 400,
            message: "Not enough gold".to_string(),
        };
        assert_eq!(err.user_message(), "Not enough gold");
    }

    #[test]
    fn transport_details_stay_out_of_the_alert() {
        let err = ApiError::RequestFailed("dns error: no such host".to_string());
        assert!(!err.user_message().contains("dns"));
    }
}
