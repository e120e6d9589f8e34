//! Error types for the Gopher client.
//!
//! This module defines all error types used throughout the crate.
//!
//! # Usage
//!
//! All fallible operations return [`Result<T>`] which uses [`Error`]:
//!
//! ```ignore
//! use gopher_client::{GopherClient, Result};
//!
//! async fn example(client: &GopherClient) -> Result<()> {
//!     let response = client.get("gopher://gopher.floodgap.com/1/").await?;
//!     println!("{}", response.text);
//!     Ok(())
//! }
//! ```
//!
//! # Error Categories
//!
//! | Category | Variants |
//! |----------|----------|
//! | Input | [`Error::MalformedUri`], [`Error::Config`] |
//! | Session | [`Error::AlreadyActive`], [`Error::InvalidState`] |
//! | Connection | [`Error::Connection`], [`Error::Timeout`] |
//! | Rendering | [`Error::Render`] |
//! | External | [`Error::Io`], [`Error::Json`], [`Error::Regex`] |

// ============================================================================
// Imports
// ============================================================================

use std::io::Error as IoError;
use std::result::Result as StdResult;

use thiserror::Error;

// ============================================================================
// Result Alias
// ============================================================================

/// Result type alias using crate [`enum@Error`].
///
/// All fallible operations in this crate return this type.
pub type Result<T> = StdResult<T, Error>;

// ============================================================================
// Error Enum
// ============================================================================

/// Main error type for the crate.
///
/// Each variant includes relevant context for debugging.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Input Errors
    // ========================================================================
    /// Input does not match the accepted URI grammar.
    ///
    /// Never retried; the caller must fix the input.
    #[error("Malformed URI '{input}': {reason}")]
    MalformedUri {
        /// The raw input as supplied by the caller.
        input: String,
        /// Why the input was rejected.
        reason: String,
    },

    /// Configuration error.
    ///
    /// Returned when client defaults or the URI pattern are invalid.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    // ========================================================================
    // Session Errors
    // ========================================================================
    /// A request is already in flight.
    ///
    /// The client handles one request at a time. The caller must wait for
    /// the active request or reset it explicitly.
    #[error("Request already active: {host}{selector}")]
    AlreadyActive {
        /// Host of the in-flight request.
        host: String,
        /// Selector of the in-flight request.
        selector: String,
    },

    /// Session API called in a state that does not allow it.
    #[error("Invalid session state: {message}")]
    InvalidState {
        /// Description of the violated precondition.
        message: String,
    },

    // ========================================================================
    // Connection Errors
    // ========================================================================
    /// Socket-level failure (refused, reset, DNS failure).
    ///
    /// The session is left active; call `reset()` before retrying.
    #[error("Connection failed for '{query}': {source}")]
    Connection {
        /// The original query string.
        query: String,
        /// Underlying socket error.
        #[source]
        source: IoError,
    },

    /// Request exceeded the configured deadline.
    ///
    /// The session is left active; call `reset()` before retrying.
    #[error("Request '{query}' timed out after {timeout_ms}ms")]
    Timeout {
        /// The original query string.
        query: String,
        /// Milliseconds waited before timeout.
        timeout_ms: u64,
    },

    // ========================================================================
    // Rendering Errors
    // ========================================================================
    /// The injected renderer failed after a successful fetch.
    #[error("Render error: {message}")]
    Render {
        /// Description of the rendering failure.
        message: String,
    },

    // ========================================================================
    // External Errors
    // ========================================================================
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] IoError),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URI pattern failed to compile.
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),
}

// ============================================================================
// Error Constructors
// ============================================================================

impl Error {
    /// Creates a malformed URI error.
    #[inline]
    pub fn malformed_uri(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedUri {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Creates a configuration error.
    #[inline]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Creates an already-active error.
    #[inline]
    pub fn already_active(host: impl Into<String>, selector: impl Into<String>) -> Self {
        Self::AlreadyActive {
            host: host.into(),
            selector: selector.into(),
        }
    }

    /// Creates an invalid state error.
    #[inline]
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState {
            message: message.into(),
        }
    }

    /// Creates a connection error.
    #[inline]
    pub fn connection(query: impl Into<String>, source: IoError) -> Self {
        Self::Connection {
            query: query.into(),
            source,
        }
    }

    /// Creates a timeout error.
    #[inline]
    pub fn timeout(query: impl Into<String>, timeout_ms: u64) -> Self {
        Self::Timeout {
            query: query.into(),
            timeout_ms,
        }
    }

    /// Creates a render error.
    #[inline]
    pub fn render(message: impl Into<String>) -> Self {
        Self::Render {
            message: message.into(),
        }
    }
}

// ============================================================================
// Error Predicates
// ============================================================================

impl Error {
    /// Returns `true` if this is a timeout error.
    #[inline]
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// Returns `true` if this is a connection error.
    ///
    /// Both variants leave the session active and awaiting `reset()`.
    #[inline]
    #[must_use]
    pub fn is_connection_error(&self) -> bool {
        matches!(self, Self::Connection { .. } | Self::Timeout { .. })
    }

    /// Returns `true` if the same call may succeed later.
    ///
    /// Nothing is retried automatically.
    #[inline]
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::AlreadyActive { .. } | Self::Connection { .. } | Self::Timeout { .. }
        )
    }

    /// Returns the original query string for connection errors.
    #[must_use]
    pub fn query(&self) -> Option<&str> {
        match self {
            Self::Connection { query, .. } | Self::Timeout { query, .. } => Some(query),
            _ => None,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use std::error::Error as _;
    use std::io::ErrorKind;

    #[test]
    fn test_error_display() {
        let err = Error::malformed_uri("gopher://", "missing host");
        assert_eq!(err.to_string(), "Malformed URI 'gopher://': missing host");
    }

    #[test]
    fn test_config_error() {
        let err = Error::config("default port must be non-zero");
        assert_eq!(
            err.to_string(),
            "Configuration error: default port must be non-zero"
        );
    }

    #[test]
    fn test_connection_error_carries_query_and_cause() {
        let io_err = IoError::new(ErrorKind::ConnectionRefused, "refused");
        let err = Error::connection("gopher://localhost:7070/", io_err);

        assert_eq!(err.query(), Some("gopher://localhost:7070/"));
        assert!(err.source().is_some());
        assert!(err.to_string().contains("refused"));
    }

    #[test]
    fn test_is_timeout() {
        let timeout_err = Error::timeout("q", 5000);
        let other_err = Error::config("test");

        assert!(timeout_err.is_timeout());
        assert!(!other_err.is_timeout());
    }

    #[test]
    fn test_is_connection_error() {
        let conn_err = Error::connection("q", IoError::new(ErrorKind::Other, "x"));
        let timeout_err = Error::timeout("q", 1000);
        let other_err = Error::already_active("host", "/");

        assert!(conn_err.is_connection_error());
        assert!(timeout_err.is_connection_error());
        assert!(!other_err.is_connection_error());
    }

    #[test]
    fn test_is_recoverable() {
        assert!(Error::already_active("h", "").is_recoverable());
        assert!(Error::timeout("q", 1).is_recoverable());
        assert!(!Error::malformed_uri("x", "y").is_recoverable());
        assert!(!Error::render("boom").is_recoverable());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = IoError::new(ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(err.query().is_none());
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<String>("invalid").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Json(_)));
    }
}
