//! DeepBox API status codes.

/// HTTP status codes the DeepBox API is known to answer with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiStatus {
    /// Malformed request
    BadRequest = 400,
    /// Missing or expired token
    Unauthorized = 401,
    /// Principal may not see or touch the resource
    Forbidden = 403,
    /// Resource does not exist
    NotFound = 404,
    /// Resource already exists
    Conflict = 409,
    /// Rate limit exceeded
    TooManyRequests = 429,
    /// Internal server error
    Internal = 500,
    /// Temporarily unavailable
    Unavailable = 503,
    /// Any other status
    Unknown = 0,
}

impl From<u16> for ApiStatus {
    fn from(code: u16) -> Self {
        match code {
            400 => ApiStatus::BadRequest,
            401 => ApiStatus::Unauthorized,
            403 => ApiStatus::Forbidden,
            404 => ApiStatus::NotFound,
            409 => ApiStatus::Conflict,
            429 => ApiStatus::TooManyRequests,
            500 => ApiStatus::Internal,
            503 => ApiStatus::Unavailable,
            _ => ApiStatus::Unknown,
        }
    }
}

impl ApiStatus {
    /// Get human-readable description of the status.
    pub fn description(&self) -> &'static str {
        match self {
            ApiStatus::BadRequest => "Bad request",
            ApiStatus::Unauthorized => "Unauthorized",
            ApiStatus::Forbidden => "Forbidden",
            ApiStatus::NotFound => "Not found",
            ApiStatus::Conflict => "Conflict",
            ApiStatus::TooManyRequests => "Too many requests",
            ApiStatus::Internal => "Internal server error",
            ApiStatus::Unavailable => "Service unavailable",
            ApiStatus::Unknown => "Unknown error",
        }
    }
}
