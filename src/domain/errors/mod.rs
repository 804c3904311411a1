// Domain errors - Error taxonomy shared by every layer

use thiserror::Error;

use crate::domain::model::Orientation;

/// Domain-specific error types
#[derive(Error, Debug)]
pub enum DomainError {
    /// Missing or rejected credential; never retried
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Non-auth HTTP failure or unusable response body
    #[error("Provider error{}: {message}", status.map(|s| format!(" (HTTP {})", s)).unwrap_or_default())]
    Provider {
        status: Option<u16>,
        message: String,
    },

    /// Per-attempt deadline exceeded and retry budget spent
    #[error("Timed out searching for '{term}' ({orientation}) after {attempts} attempt(s)")]
    Timeout {
        term: String,
        orientation: Orientation,
        attempts: u32,
    },

    /// Probe sequence exhausted without a qualifying candidate
    #[error("No media found for terms {terms:?} ({orientation})")]
    NoResults {
        terms: Vec<String>,
        orientation: Orientation,
    },

    /// External rendering tool exited unsuccessfully
    #[error("{tool} failed with status {}: {stderr}", status.map(|c| c.to_string()).unwrap_or_else(|| "signal".to_string()))]
    RenderTool {
        tool: String,
        status: Option<i32>,
        stderr: String,
    },

    /// Caller supplied arguments that violate a precondition
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    /// Provider error without an HTTP status (transport or decoding)
    pub fn provider(message: impl Into<String>) -> Self {
        DomainError::Provider {
            status: None,
            message: message.into(),
        }
    }

    /// Whether the error is a per-attempt deadline miss
    pub fn is_timeout(&self) -> bool {
        matches!(self, DomainError::Timeout { .. })
    }

    /// Errors the search orchestrator must not absorb
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            DomainError::Configuration(_)
                | DomainError::Timeout { .. }
                | DomainError::RenderTool { .. }
                | DomainError::InvalidRequest(_)
                | DomainError::Internal(_)
        )
    }
}

/// Result type alias for domain operations
pub type DomainResult<T> = std::result::Result<T, DomainError>;
