//! Gopher request line.
//!
//! The only thing a Gopher client ever sends:
//!
//! ```text
//! selector [TAB query] CRLF
//! ```

// ============================================================================
// Imports
// ============================================================================

use crate::uri::UriComponents;

// ============================================================================
// Constants
// ============================================================================

/// Line terminator on the wire.
pub const CRLF: &str = "\r\n";

/// Separator between selector and search query.
pub const TAB: char = '\t';

// ============================================================================
// Request
// ============================================================================

/// A request to a Gopher server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// Target hostname.
    pub host: String,

    /// Target port.
    pub port: u16,

    /// Selector string (empty for the root menu).
    pub selector: String,

    /// Search query for type `7` items.
    pub query: Option<String>,
}

impl Request {
    /// Creates a request for the given target and selector.
    #[inline]
    #[must_use]
    pub fn new(host: impl Into<String>, port: u16, selector: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port,
            selector: selector.into(),
            query: None,
        }
    }

    /// Attaches a search query.
    #[inline]
    #[must_use]
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Formats the request line sent on connect.
    #[must_use]
    pub fn to_line(&self) -> String {
        let mut line = String::with_capacity(self.selector.len() + CRLF.len() + 16);
        line.push_str(&self.selector);

        if let Some(query) = &self.query {
            line.push(TAB);
            line.push_str(query);
        }

        line.push_str(CRLF);
        line
    }

    /// Returns the `host:port` pair used for connecting.
    #[inline]
    #[must_use]
    pub fn target(&self) -> (&str, u16) {
        (self.host.as_str(), self.port)
    }
}

impl From<&UriComponents> for Request {
    fn from(components: &UriComponents) -> Self {
        Self {
            host: components.host.clone(),
            port: components.port,
            selector: components.selector.clone(),
            query: components.query.clone(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
