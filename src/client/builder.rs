//! Builder pattern for client configuration.
//!
//! Provides a fluent API for configuring and creating [`GopherClient`]
//! instances.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//!
//! use gopher_client::GopherClient;
//!
//! # fn example() -> gopher_client::Result<()> {
//! let client = GopherClient::builder()
//!     .default_host("gopher.floodgap.com")
//!     .default_port(70)
//!     .timeout(Duration::from_secs(10))
//!     .build()?;
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::error::Result;

use super::config::ClientConfig;
use super::core::GopherClient;
use super::render::{PlainRenderer, Renderer};

// ============================================================================
// ClientBuilder
// ============================================================================

/// Builder for configuring a [`GopherClient`].
///
/// Use [`GopherClient::builder()`] to create a new builder.
#[derive(Clone, Default)]
pub struct ClientBuilder {
    /// Accumulated configuration.
    config: ClientConfig,
    /// Injected renderer.
    renderer: Option<Arc<dyn Renderer>>,
}

impl fmt::Debug for ClientBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientBuilder")
            .field("config", &self.config)
            .field("custom_renderer", &self.renderer.is_some())
            .finish()
    }
}

// ============================================================================
// ClientBuilder Implementation
// ============================================================================

impl ClientBuilder {
    /// Creates a builder with default configuration.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole configuration.
    #[inline]
    #[must_use]
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the host used when input names none.
    #[inline]
    #[must_use]
    pub fn default_host(mut self, host: impl Into<String>) -> Self {
        self.config.default_host = host.into();
        self
    }

    /// Sets the port used when input names none.
    #[inline]
    #[must_use]
    pub fn default_port(mut self, port: u16) -> Self {
        self.config.default_port = port;
        self
    }

    /// Sets the search URI used by `search()`.
    #[inline]
    #[must_use]
    pub fn search_uri(mut self, uri: impl Into<String>) -> Self {
        self.config.search = uri.into();
        self
    }

    /// Sets the URI grammar.
    ///
    /// The pattern must define the `host`, `port` and `selector` groups.
    #[inline]
    #[must_use]
    pub fn uri_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.config.uri_pattern = pattern.into();
        self
    }

    /// Sets the request deadline.
    #[inline]
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout_ms = Some(u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX));
        self
    }

    /// Disables the request deadline.
    #[inline]
    #[must_use]
    pub fn no_timeout(mut self) -> Self {
        self.config.timeout_ms = None;
        self
    }

    /// Sets the socket read buffer size.
    #[inline]
    #[must_use]
    pub fn read_buffer_size(mut self, size: usize) -> Self {
        self.config.read_buffer_size = size;
        self
    }

    /// Injects a renderer.
    #[inline]
    #[must_use]
    pub fn renderer(mut self, renderer: impl Renderer + 'static) -> Self {
        self.renderer = Some(Arc::new(renderer));
        self
    }

    /// Injects a shared renderer.
    #[inline]
    #[must_use]
    pub fn shared_renderer(mut self, renderer: Arc<dyn Renderer>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    /// Builds the client with validation.
    ///
    /// # Errors
    ///
    /// - [`crate::Error::Config`] if a default is empty or zero
    /// - [`crate::Error::Regex`] if the URI pattern does not compile
    /// - [`crate::Error::MalformedUri`] if the search URI does not parse
    pub fn build(self) -> Result<GopherClient> {
        self.config.validate()?;

        let codec = self.config.codec()?;
        let connection = self.config.connection();
        let renderer = self
            .renderer
            .unwrap_or_else(|| Arc::new(PlainRenderer) as Arc<dyn Renderer>);

        Ok(GopherClient::new(
            codec,
            connection,
            self.config.search,
            renderer,
        ))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use crate::error::Error;

    #[test]
    fn test_new_uses_default_config() {
        let builder = ClientBuilder::new();
        assert_eq!(builder.config, ClientConfig::default());
        assert!(builder.renderer.is_none());
    }

    #[test]
    fn test_setters() {
        let builder = ClientBuilder::new()
            .default_host("localhost")
            .default_port(7070)
            .search_uri("gopher://localhost/7/search")
            .timeout(Duration::from_millis(1500))
            .read_buffer_size(512);

        assert_eq!(builder.config.default_host, "localhost");
        assert_eq!(builder.config.default_port, 7070);
        assert_eq!(builder.config.search, "gopher://localhost/7/search");
        assert_eq!(builder.config.timeout_ms, Some(1500));
        assert_eq!(builder.config.read_buffer_size, 512);
    }

    #[test]
    fn test_huge_timeout_saturates() {
        let builder = ClientBuilder::new().timeout(Duration::MAX);
        assert_eq!(builder.config.timeout_ms, Some(u64::MAX));
    }

    #[test]
    fn test_no_timeout() {
        let builder = ClientBuilder::new().no_timeout();
        assert_eq!(builder.config.timeout_ms, None);
    }

    #[test]
    fn test_build_with_defaults() {
        let client = ClientBuilder::new().build().expect("valid defaults");
        assert_eq!(client.codec().default_port(), 70);
    }

    #[test]
    fn test_build_fails_with_bad_pattern() {
        let err = ClientBuilder::new().uri_pattern("(").build().unwrap_err();
        assert!(matches!(err, Error::Regex(_)));
    }

    #[test]
    fn test_build_fails_with_zero_port() {
        let err = ClientBuilder::new().default_port(0).build().unwrap_err();
        assert!(err.to_string().contains("port"));
    }

    #[test]
    fn test_debug_hides_renderer() {
        let builder = ClientBuilder::new().renderer(PlainRenderer);
        assert!(format!("{builder:?}").contains("custom_renderer: true"));
    }
}
