// Gateway Error Types
use thiserror::Error;

/// Coarse classification used by callers deciding how to surface a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Network,
    Timeout,
    Unauthorized,
    Http,
    Application,
    Decode,
    InvalidRequest,
    Storage,
}

/// Every failure a gateway call can produce
#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    // No response received
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out after {after_ms} ms")]
    Timeout { after_ms: u64 },

    // HTTP 401
    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    // Any other non-2xx status
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    // 2xx transport, failing envelope code
    #[error("Application error {code}: {message}")]
    Application { code: i64, message: String },

    #[error("Invalid response body: {0}")]
    Decode(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Session storage error: {0}")]
    Storage(String),
}

impl GatewayError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GatewayError::Network(_) => ErrorKind::Network,
            GatewayError::Timeout { .. } => ErrorKind::Timeout,
            GatewayError::Unauthorized { .. } => ErrorKind::Unauthorized,
            GatewayError::Http { .. } => ErrorKind::Http,
            GatewayError::Application { .. } => ErrorKind::Application,
            GatewayError::Decode(_) => ErrorKind::Decode,
            GatewayError::InvalidRequest(_) => ErrorKind::InvalidRequest,
            GatewayError::Storage(_) => ErrorKind::Storage,
        }
    }

    /// Transport status, when a response was received
    pub fn status_code(&self) -> Option<u16> {
        match self {
            GatewayError::Unauthorized { .. } => Some(401),
            GatewayError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Get error code for client handling
    pub fn error_code(&self) -> &'static str {
        match self {
            GatewayError::Network(_) => "NETWORK_ERROR",
            GatewayError::Timeout { .. } => "TIMEOUT",
            GatewayError::Unauthorized { .. } => "UNAUTHORIZED",
            GatewayError::Http { status, .. } => match status {
                400 => "BAD_REQUEST",
                403 => "FORBIDDEN",
                404 => "NOT_FOUND",
                409 => "CONFLICT",
                500..=599 => "SERVER_ERROR",
                _ => "HTTP_ERROR",
            },
            GatewayError::Application { .. } => "APPLICATION_ERROR",
            GatewayError::Decode(_) => "INVALID_RESPONSE",
            GatewayError::InvalidRequest(_) => "INVALID_REQUEST",
            GatewayError::Storage(_) => "SESSION_STORAGE_ERROR",
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, GatewayError::Unauthorized { .. })
    }
}

// Static constructor methods
impl GatewayError {
    pub fn network(message: impl Into<String>) -> Self {
        GatewayError::Network(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        GatewayError::Unauthorized { message: message.into() }
    }

    pub fn http(status: u16, message: impl Into<String>) -> Self {
        GatewayError::Http { status, message: message.into() }
    }

    pub fn application(code: i64, message: impl Into<String>) -> Self {
        GatewayError::Application { code, message: message.into() }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        GatewayError::Decode(message.into())
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        GatewayError::InvalidRequest(message.into())
    }

    pub fn storage(message: impl Into<String>) -> Self {
        GatewayError::Storage(message.into())
    }
}

impl From<serde_json::Error> for GatewayError {
    fn from(err: serde_json::Error) -> Self {
        GatewayError::Decode(err.to_string())
    }
}

impl From<url::ParseError> for GatewayError {
    fn from(err: url::ParseError) -> Self {
        GatewayError::InvalidRequest(err.to_string())
    }
}

impl From<std::io::Error> for GatewayError {
    fn from(err: std::io::Error) -> Self {
        GatewayError::Storage(err.to_string())
    }
}

pub type GatewayResult<T> = Result<T, GatewayError>;
