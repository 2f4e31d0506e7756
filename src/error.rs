//! Error types for the deepboxlib library.

use thiserror::Error;

use crate::api::ApiStatus;

/// Main error type for deepboxlib operations.
#[derive(Error, Debug)]
pub enum DeepboxError {
    /// The DeepBox API answered with a non-success HTTP status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Network request error.
    #[error("Request error: {0}")]
    RequestError(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Invalid or unexpected response from server.
    #[error("Invalid response from server")]
    InvalidResponse,

    /// A path or identifier does not exist remotely.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The principal lacks the permission for the operation.
    #[error("Access denied: {0}")]
    AccessDenied(String),

    /// The target already exists.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The operation is not supported for this path.
    #[error("Unsupported: {0}")]
    Unsupported(String),

    /// Invalid configuration value.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The operation was cancelled by the caller.
    #[error("Operation cancelled")]
    Cancelled,

    /// Request timed out.
    #[error("Request timed out")]
    Timeout,

    /// Custom error message.
    #[error("{0}")]
    Custom(String),
}

impl DeepboxError {
    /// Build an API error from a raw HTTP status code.
    pub fn from_status(status: u16) -> Self {
        DeepboxError::Api {
            status,
            message: ApiStatus::from(status).description().to_string(),
        }
    }

    /// Classified status of an API error, if this is one.
    pub fn status(&self) -> Option<ApiStatus> {
        match self {
            DeepboxError::Api { status, .. } => Some(ApiStatus::from(*status)),
            _ => None,
        }
    }

    /// True for a 403 answer from the API.
    pub fn is_forbidden(&self) -> bool {
        self.status() == Some(ApiStatus::Forbidden)
    }

    /// True for a 404 answer from the API or a local not-found.
    pub fn is_not_found(&self) -> bool {
        matches!(self, DeepboxError::NotFound(_)) || self.status() == Some(ApiStatus::NotFound)
    }

    /// Map an API error to the feature-level taxonomy.
    ///
    /// 403 becomes [`DeepboxError::AccessDenied`], 404 becomes
    /// [`DeepboxError::NotFound`] and 409 becomes [`DeepboxError::Conflict`],
    /// each carrying `context`. Everything else is returned untouched.
    pub fn for_path(self, context: impl Into<String>) -> Self {
        match self.status() {
            Some(ApiStatus::Forbidden) => DeepboxError::AccessDenied(context.into()),
            Some(ApiStatus::NotFound) => DeepboxError::NotFound(context.into()),
            Some(ApiStatus::Conflict) => DeepboxError::Conflict(context.into()),
            _ => self,
        }
    }
}

/// Result type alias for deepboxlib operations.
pub type Result<T> = std::result::Result<T, DeepboxError>;
