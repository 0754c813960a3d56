use std::fmt;

/// Lulu SDK error type
///
/// Represents all possible errors that can occur when authenticating
/// against or calling the Lulu Print API.
#[derive(Debug)]
pub enum LuluError {
    /// Minting or refreshing an access token failed
    Authentication(ApiError),
    /// The access token payload could not be decoded
    Decode(String),
    /// A resource request failed after authentication succeeded
    Transport(ApiError),
    /// Invalid or incomplete configuration
    Configuration(String),
}

impl LuluError {
    /// HTTP status code of the underlying failure, if the server answered
    pub fn status(&self) -> Option<u16> {
        match self {
            LuluError::Authentication(ApiError::Http { status, .. })
            | LuluError::Transport(ApiError::Http { status, .. }) => Some(*status),
            _ => None,
        }
    }

    /// Whether this error came from the token endpoint
    pub fn is_authentication(&self) -> bool {
        matches!(self, LuluError::Authentication(_))
    }
}

impl fmt::Display for LuluError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LuluError::Authentication(err) => write!(f, "Authentication failed: {}", err),
            LuluError::Decode(msg) => write!(f, "Token decode failed: {}", msg),
            LuluError::Transport(err) => write!(f, "Request failed: {}", err),
            LuluError::Configuration(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for LuluError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LuluError::Authentication(err) | LuluError::Transport(err) => Some(err),
            _ => None,
        }
    }
}

impl From<jsonwebtoken::errors::Error> for LuluError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        LuluError::Decode(err.to_string())
    }
}

impl From<url::ParseError> for LuluError {
    fn from(err: url::ParseError) -> Self {
        LuluError::Configuration(format!("Invalid URL: {}", err))
    }
}

/// HTTP-level errors produced by a transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Network error (connection, timeout, etc.)
    Network(String),
    /// HTTP error with status code
    Http { status: u16, message: String },
    /// Failed to parse response
    Parse(String),
    /// Request building failed
    Request(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(msg) => write!(f, "Network error: {}", msg),
            ApiError::Http { status, message } => {
                write!(f, "HTTP {} error: {}", status, message)
            }
            ApiError::Parse(msg) => write!(f, "Parse error: {}", msg),
            ApiError::Request(msg) => write!(f, "Request error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Network("Request timeout".to_string())
        } else if err.is_connect() {
            ApiError::Network(format!("Connection failed: {}", err))
        } else if let Some(status) = err.status() {
            ApiError::Http {
                status: status.as_u16(),
                message: err.to_string(),
            }
        } else if err.is_decode() {
            ApiError::Parse(err.to_string())
        } else if err.is_builder() {
            ApiError::Request(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}
