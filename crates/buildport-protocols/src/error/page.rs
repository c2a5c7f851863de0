//! Page-interaction errors.

use thiserror::Error;

/// Errors raised by a page session.
#[derive(Debug, Error)]
pub enum PageError {
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    #[error("Stale element handle: {0}")]
    StaleElement(u64),

    #[error("Navigation failed: {0}")]
    Navigation(String),

    #[error("Script error: {0}")]
    Script(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Invalid selector: {0}")]
    InvalidSelector(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Session closed")]
    Closed,
}

impl PageError {
    /// Whether the error only means the element was not on the page.
    pub fn is_not_found(&self) -> bool {
        matches!(self, PageError::ElementNotFound(_))
    }

    /// Whether the session itself is gone, so no further call can succeed.
    pub fn is_session_lost(&self) -> bool {
        matches!(self, PageError::Closed | PageError::Connection(_))
    }
}
