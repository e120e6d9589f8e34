//! Client configuration.
//!
//! Supplied by the host application, usually as JSON:
//!
//! ```json
//! {
//!   "default_host": "gopher.floodgap.com",
//!   "default_port": 70,
//!   "search": "gopher://gopher.floodgap.com:70/7/v2/vs",
//!   "timeout_ms": 30000
//! }
//! ```
//!
//! Missing fields take their defaults; `"timeout_ms": null` disables the
//! request deadline.

// ============================================================================
// Imports
// ============================================================================

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::transport::{Connection, DEFAULT_READ_BUFFER_SIZE, DEFAULT_REQUEST_TIMEOUT};
use crate::uri::{DEFAULT_PORT, DEFAULT_URI_PATTERN, UriCodec};

// ============================================================================
// Constants
// ============================================================================

/// Host used when input names none.
pub const DEFAULT_HOST: &str = "gopher.floodgap.com";

/// Veronica-2 search selector.
pub const DEFAULT_SEARCH: &str = "gopher://gopher.floodgap.com:70/7/v2/vs";

// ============================================================================
// ClientConfig
// ============================================================================

/// Settings consumed from the host application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Host used when input names none.
    pub default_host: String,

    /// Port used when input names none.
    pub default_port: u16,

    /// Search URI that `search()` prefixes to its query.
    pub search: String,

    /// URI grammar as a regular expression with named groups.
    pub uri_pattern: String,

    /// Request deadline in milliseconds; `None` waits forever.
    pub timeout_ms: Option<u64>,

    /// Bytes read per socket read.
    pub read_buffer_size: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            default_host: DEFAULT_HOST.to_string(),
            default_port: DEFAULT_PORT,
            search: DEFAULT_SEARCH.to_string(),
            uri_pattern: DEFAULT_URI_PATTERN.to_string(),
            timeout_ms: Some(
                u64::try_from(DEFAULT_REQUEST_TIMEOUT.as_millis()).unwrap_or(u64::MAX),
            ),
            read_buffer_size: DEFAULT_READ_BUFFER_SIZE,
        }
    }
}

// ============================================================================
// ClientConfig - Loading
// ============================================================================

impl ClientConfig {
    /// Parses and validates a JSON configuration.
    ///
    /// # Errors
    ///
    /// - [`Error::Json`] if the document is not valid JSON
    /// - [`Error::Config`] / [`Error::Regex`] if validation fails
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read, otherwise as
    /// [`ClientConfig::from_json`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// - [`Error::Config`] if a default is empty or zero
    /// - [`Error::Regex`] if the URI pattern does not compile
    /// - [`Error::MalformedUri`] if the search URI does not parse
    pub fn validate(&self) -> Result<()> {
        if self.read_buffer_size == 0 {
            return Err(Error::config("read buffer size must be non-zero"));
        }
        if self.timeout_ms == Some(0) {
            return Err(Error::config("timeout must be non-zero; use null to disable"));
        }
        if self.search.trim().is_empty() {
            return Err(Error::config("search URI must not be empty"));
        }

        self.codec()?.parse(&self.search)?;
        Ok(())
    }
}

// ============================================================================
// ClientConfig - Derived Components
// ============================================================================

impl ClientConfig {
    /// Returns the request deadline.
    #[inline]
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    /// Builds the URI codec described by this configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern or defaults are invalid.
    pub fn codec(&self) -> Result<UriCodec> {
        UriCodec::new(&self.uri_pattern, self.default_host.as_str(), self.default_port)
    }

    /// Builds the connection manager described by this configuration.
    #[must_use]
    pub fn connection(&self) -> Connection {
        Connection::new()
            .with_timeout(self.timeout())
            .with_read_buffer_size(self.read_buffer_size)
    }
}

// ============================================================================
// Tests
// ============================================================================
