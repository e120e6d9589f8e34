//! Gopher client coordinator.
//!
//! The [`GopherClient`] ties the codec, session, connection, parser and
//! renderer together.
//!
//! # Request Flow
//!
//! ```text
//! raw query ─► UriCodec::parse ─► SessionState::begin ─► Connection::request
//!                                                             │
//! GopherResponse ◄─ Renderer::render ◄─ reset ◄─ finish ◄─ parse_body
//! ```
//!
//! # Example
//!
//! ```no_run
//! use gopher_client::GopherClient;
//!
//! # async fn example() -> gopher_client::Result<()> {
//! let client = GopherClient::builder().build()?;
//!
//! let menu = client.get("gopher://gopher.floodgap.com/1/").await?;
//! println!("{}", menu.text);
//!
//! let hits = client.search("frogs").await?;
//! println!("{} results", hits.entries().len());
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::identifiers::RequestId;
use crate::protocol::{Request, parser};
use crate::session::{HistoryEntry, ServerSnapshot, SessionState};
use crate::transport::Connection;
use crate::uri::{UriCodec, UriComponents};

use super::builder::ClientBuilder;
use super::render::Renderer;
use super::response::{ClientStatus, GopherResponse, ResponseData};

// ============================================================================
// Types
// ============================================================================

/// Internal shared state for the client.
pub(crate) struct ClientInner {
    /// URI grammar and defaults.
    pub codec: UriCodec,

    /// Connection manager.
    pub connection: Connection,

    /// Search URI prefixed by `search()`.
    pub search: String,

    /// Injected renderer.
    pub renderer: Arc<dyn Renderer>,

    /// Active request and history.
    pub session: Mutex<SessionState>,
}

/// Marks the active request as failed if `run` is dropped before it settles.
///
/// Dropping a `get` future mid-flight leaves a failed request that
/// [`GopherClient::reset`] can archive.
struct InFlightGuard<'a> {
    session: &'a Mutex<SessionState>,
    request_id: RequestId,
    armed: bool,
}

impl<'a> InFlightGuard<'a> {
    fn new(session: &'a Mutex<SessionState>, request_id: RequestId) -> Self {
        Self {
            session,
            request_id,
            armed: true,
        }
    }

    /// The request reached `finish` or `mark_failed` on its own.
    fn disarm(&mut self) {
        self.armed = false;
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        if self.armed
            && let Err(e) = self.session.lock().mark_failed("request cancelled")
        {
            debug!(request_id = %self.request_id, error = %e, "Could not record cancellation");
        }
    }
}

/// JSON export of the client state.
#[derive(Serialize)]
struct StateExport<'a> {
    server: ServerSnapshot,
    history: &'a [HistoryEntry],
}

// ============================================================================
// GopherClient
// ============================================================================

/// Gopher protocol client.
///
/// Handles one request at a time; a second call while a request is in
/// flight fails with [`crate::Error::AlreadyActive`]. Cloning shares the
/// same session and history.
#[derive(Clone)]
pub struct GopherClient {
    /// Shared inner state.
    pub(crate) inner: Arc<ClientInner>,
}

// ============================================================================
// GopherClient - Display
// ============================================================================

impl fmt::Debug for GopherClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GopherClient")
            .field("default_host", &self.inner.codec.default_host())
            .field("default_port", &self.inner.codec.default_port())
            .field("active", &self.is_active())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// GopherClient - Public API
// ============================================================================

impl GopherClient {
    /// Creates a configuration builder for the client.
    #[inline]
    #[must_use]
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Fetches a Gopher resource.
    ///
    /// Accepts a `gopher://` URI or a bare selector/query string.
    ///
    /// # Errors
    ///
    /// - [`crate::Error::MalformedUri`] if the input does not parse
    /// - [`crate::Error::AlreadyActive`] if a request is in flight
    /// - [`crate::Error::Connection`] / [`crate::Error::Timeout`] on socket failure;
    ///   the session stays active until [`GopherClient::reset`]
    /// - [`crate::Error::Render`] if the renderer fails
    pub async fn get(&self, query: &str) -> Result<GopherResponse> {
        let components = self.inner.codec.parse(query)?;
        self.run(query, &components).await
    }

    /// Runs a search against the configured search selector.
    ///
    /// Same as `get("<search>?<text>")`.
    ///
    /// # Errors
    ///
    /// As [`GopherClient::get`].
    pub async fn search(&self, text: &str) -> Result<GopherResponse> {
        let query = format!("{}?{}", self.inner.search, text.trim());
        self.get(&query).await
    }

    /// Fetches already-parsed components.
    ///
    /// # Errors
    ///
    /// As [`GopherClient::get`], minus URI parsing.
    pub async fn fetch(&self, components: &UriComponents) -> Result<GopherResponse> {
        let query = components.to_uri();
        self.run(&query, components).await
    }

    /// Archives a failed request so a new one can begin.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidState`] if no failed or finished
    /// request is waiting.
    pub fn reset(&self) -> Result<HistoryEntry> {
        let mut session = self.inner.session.lock();
        let entry = session.reset()?.clone();
        info!(id = %entry.id, host = %entry.host, "Request reset");
        Ok(entry)
    }

    /// Returns `true` while a request is in progress or awaiting reset.
    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.inner.session.lock().is_active()
    }

    /// Returns a copy of the history ledger, oldest first.
    #[must_use]
    pub fn history(&self) -> Vec<HistoryEntry> {
        self.inner.session.lock().history().to_vec()
    }

    /// Returns a point-in-time status.
    #[must_use]
    pub fn status(&self) -> ClientStatus {
        let session = self.inner.session.lock();
        ClientStatus {
            active: session.is_active(),
            server: session.snapshot(),
            history: session.history().len(),
        }
    }

    /// Serializes the current request and the history to JSON.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Json`] if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        let session = self.inner.session.lock();
        let export = StateExport {
            server: session.snapshot(),
            history: session.history(),
        };
        Ok(serde_json::to_string(&export)?)
    }

    /// Returns the long URI of the active request.
    #[must_use]
    pub fn current_uri(&self) -> Option<String> {
        self.current_components().map(|c| c.to_uri())
    }

    /// Returns the short URI of the active request.
    #[must_use]
    pub fn current_short_uri(&self) -> Option<String> {
        self.current_components().map(|c| c.to_short_uri())
    }

    /// Returns the active request as a directory-entry line.
    #[must_use]
    pub fn current_directory_entry(&self) -> Option<String> {
        self.current_components().map(|c| c.to_directory_entry())
    }

    /// Returns the URI codec.
    #[inline]
    #[must_use]
    pub fn codec(&self) -> &UriCodec {
        &self.inner.codec
    }

    /// Returns the configured search URI.
    #[inline]
    #[must_use]
    pub fn search_uri(&self) -> &str {
        &self.inner.search
    }
}

// ============================================================================
// GopherClient - Internal API
// ============================================================================

impl GopherClient {
    /// Creates a client from validated parts.
    pub(crate) fn new(
        codec: UriCodec,
        connection: Connection,
        search: String,
        renderer: Arc<dyn Renderer>,
    ) -> Self {
        let inner = Arc::new(ClientInner {
            codec,
            connection,
            search,
            renderer,
            session: Mutex::new(SessionState::new()),
        });

        debug!(
            default_host = %inner.codec.default_host(),
            default_port = inner.codec.default_port(),
            "Gopher client initialized"
        );

        Self { inner }
    }

    /// Components of the active request.
    fn current_components(&self) -> Option<UriComponents> {
        self.inner.session.lock().components()
    }

    /// Runs one request through the full lifecycle.
    async fn run(&self, query: &str, components: &UriComponents) -> Result<GopherResponse> {
        let session = &self.inner.session;
        let request_id = session.lock().begin(components)?;

        info!(
            %request_id,
            host = %components.host,
            port = components.port,
            selector = %components.selector,
            "Gopher request"
        );

        let mut guard = InFlightGuard::new(session, request_id);

        let request = Request::from(components);
        if let Err(e) = self.inner.connection.request(&request, query, session).await {
            guard.disarm();
            warn!(%request_id, error = %e, "Gopher request failed");
            if let Err(state_err) = session.lock().mark_failed(e.to_string()) {
                warn!(%request_id, error = %state_err, "Could not record failure");
            }
            return Err(e);
        }

        let (body, server) = {
            let mut state = session.lock();
            let body = parser::parse_body(state.data(), components.item_type);
            state.finish()?;
            let server = state.snapshot();
            state.reset()?;
            (body, server)
        };
        guard.disarm();

        info!(
            %request_id,
            bytes = server.bytes,
            entries = body.entries().len(),
            "Gopher response received"
        );

        let rendered = self.inner.renderer.render(&body.to_text()).await?;

        Ok(GopherResponse {
            text: rendered.text,
            html: rendered.html,
            data: ResponseData {
                request_id,
                server,
                body,
                rendered: rendered.data,
            },
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
