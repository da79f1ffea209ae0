//! Model backend error types

use thiserror::Error;

/// Errors from the model backend
#[derive(Error, Debug)]
pub enum BackendError {
    /// API request failed (transport, auth, provider-side error)
    #[error("{provider} API error: {message}")]
    Api { provider: String, message: String },

    /// The provider returned something the backend could not use
    #[error("invalid model response: {0}")]
    InvalidResponse(String),
}

impl BackendError {
    /// Create an API error
    pub fn api(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Api {
            provider: provider.into(),
            message: message.into(),
        }
    }
}

pub type BackendResult<T> = Result<T, BackendError>;
