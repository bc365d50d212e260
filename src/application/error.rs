// Errors surfaced by the water quality API client
use thiserror::Error;

pub const GENERIC_ERROR_MESSAGE: &str = "An unexpected error occurred";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("Authentication token not found.")]
    MissingToken,

    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// Text shown to the user; transport details stay in the logs
    pub fn user_message(&self) -> String {
        match self {
            ApiError::MissingToken => "Please log in to continue".to_string(),
            ApiError::Http { message, .. } => message.clone(),
            ApiError::Network(_) | ApiError::Decode(_) => GENERIC_ERROR_MESSAGE.to_string(),
        }
    }
}
