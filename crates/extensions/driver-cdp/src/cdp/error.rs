//! CDP error types.

use buildport_protocols::PageError;
use thiserror::Error;

/// Chrome reports this code once the target behind a session is gone.
const SESSION_NOT_FOUND: i64 = -32001;

/// CDP client errors.
#[derive(Debug, Error)]
pub enum CdpError {
    /// Failed to connect to Chrome.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Nothing answers on the debugging endpoint.
    #[error("Chrome not available at {0}")]
    ChromeNotAvailable(String),

    /// No Chrome executable configured or found.
    #[error("Chrome not found. Install Google Chrome or set browser.chrome_path")]
    ChromeNotFound,

    /// Chrome could not be started.
    #[error("Failed to launch Chrome: {0}")]
    LaunchFailed(String),

    /// WebSocket error.
    #[error("WebSocket error: {0}")]
    WebSocket(String),

    /// CDP protocol error.
    #[error("CDP error: {message} (code: {code})")]
    Protocol { code: i64, message: String },

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// HTTP error (for endpoint discovery).
    #[error("HTTP error: {0}")]
    Http(String),

    /// Navigation failed.
    #[error("Navigation failed: {0}")]
    NavigationFailed(String),

    /// JavaScript execution error.
    #[error("JavaScript error: {0}")]
    JavaScript(String),

    /// Timeout.
    #[error("Timeout: {0}")]
    Timeout(String),

    /// Session closed.
    #[error("Session closed")]
    SessionClosed,

    /// Invalid response.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl From<tokio_tungstenite::tungstenite::Error> for CdpError {
    fn from(e: tokio_tungstenite::tungstenite::Error) -> Self {
        CdpError::WebSocket(e.to_string())
    }
}

impl From<reqwest::Error> for CdpError {
    fn from(e: reqwest::Error) -> Self {
        CdpError::Http(e.to_string())
    }
}

impl From<url::ParseError> for CdpError {
    fn from(e: url::ParseError) -> Self {
        CdpError::ConnectionFailed(format!("Invalid URL: {}", e))
    }
}

impl From<CdpError> for PageError {
    fn from(e: CdpError) -> Self {
        match e {
            CdpError::SessionClosed => PageError::Closed,
            CdpError::Protocol { code, .. } if code == SESSION_NOT_FOUND => PageError::Closed,
            CdpError::Protocol { code, message } => {
                PageError::Script(format!("{} (code: {})", message, code))
            }
            CdpError::ConnectionFailed(msg)
            | CdpError::ChromeNotAvailable(msg)
            | CdpError::WebSocket(msg)
            | CdpError::Http(msg)
            | CdpError::LaunchFailed(msg) => PageError::Connection(msg),
            CdpError::ChromeNotFound => PageError::Connection(e.to_string()),
            CdpError::NavigationFailed(msg) => PageError::Navigation(msg),
            CdpError::JavaScript(msg) => PageError::Script(msg),
            CdpError::Timeout(msg) => PageError::Timeout(msg),
            CdpError::Serialization(err) => PageError::InvalidResponse(err.to_string()),
            CdpError::InvalidResponse(msg) => PageError::InvalidResponse(msg),
        }
    }
}
