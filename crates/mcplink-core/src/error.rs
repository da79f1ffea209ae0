//! Request-level error taxonomy
//!
//! Per-provider connect failures never reach this level; they are logged
//! and skipped during registry connect. Everything here aborts the request
//! (after teardown has run) and carries the HTTP-ish status the caller
//! should see.

use thiserror::Error;

use crate::backend::BackendError;

/// Failure of one bridge request
#[derive(Error, Debug)]
pub enum BridgeError {
    /// No provider connected successfully; there is nothing to advertise
    #[error("no tool provider connected")]
    EmptyCatalog,

    /// The model echoed a tool identifier that does not decode to a
    /// connected provider's tool
    #[error("invalid tool identifier: {0}")]
    InvalidIdentifier(String),

    /// The model backend call itself failed
    #[error("model backend error: {0}")]
    Backend(#[from] BackendError),

    /// The model kept requesting tools past the configured round cap
    #[error("model exceeded {0} tool round trips")]
    RoundLimit(u32),

    /// The overall request deadline expired
    #[error("request deadline exceeded")]
    Timeout,

    /// Unexpected internal failure
    #[error("{0}")]
    Internal(String),
}

/// Result alias for request-level operations
pub type BridgeResult<T> = Result<T, BridgeError>;

impl BridgeError {
    /// HTTP status for this failure kind
    pub fn status(&self) -> u16 {
        match self {
            BridgeError::EmptyCatalog | BridgeError::InvalidIdentifier(_) => 400,
            BridgeError::Backend(_) | BridgeError::RoundLimit(_) | BridgeError::Internal(_) => 500,
            BridgeError::Timeout => 504,
        }
    }
}
