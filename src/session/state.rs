//! Per-request session state.
//!
//! One request may be active at a time. Its lifecycle:
//!
//! ```text
//! idle ──begin──► active ──append_chunk*──► finish ──reset──► idle
//!                    │                                  ▲
//!                    └──────────mark_failed─────────────┘
//! ```
//!
//! `reset` archives the request into the history ledger and clears every
//! active field.

// ============================================================================
// Imports
// ============================================================================

use std::net::IpAddr;
use std::time::SystemTime;

use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::identifiers::RequestId;
use crate::protocol::ItemType;
use crate::uri::UriComponents;

use super::history::{HistoryEntry, Outcome};

// ============================================================================
// ServerSnapshot
// ============================================================================

/// Serializable copy of the active request fields.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ServerSnapshot {
    /// Whether a request is in progress.
    pub active: bool,
    /// Request identity.
    pub id: Option<RequestId>,
    /// Server hostname.
    pub host: Option<String>,
    /// Server port.
    pub port: Option<u16>,
    /// Resolved peer address.
    pub ipaddr: Option<IpAddr>,
    /// Requested item type.
    #[serde(rename = "type")]
    pub item_type: Option<ItemType>,
    /// Selector.
    pub selector: Option<String>,
    /// Search query.
    pub query: Option<String>,
    /// Display name.
    pub name: Option<String>,
    /// When the request began.
    pub start: Option<SystemTime>,
    /// When the response stream ended.
    pub stop: Option<SystemTime>,
    /// Failure description, if the request failed.
    pub failure: Option<String>,
    /// Number of chunks received.
    pub chunks: usize,
    /// Number of bytes received.
    pub bytes: usize,
}

// ============================================================================
// SessionState
// ============================================================================

/// State of the single active request plus the history ledger.
///
/// This is the only writer of the history.
#[derive(Debug, Default)]
pub struct SessionState {
    active: bool,
    id: Option<RequestId>,
    host: Option<String>,
    port: Option<u16>,
    ipaddr: Option<IpAddr>,
    item_type: Option<ItemType>,
    selector: Option<String>,
    query: Option<String>,
    name: Option<String>,
    start: Option<SystemTime>,
    stop: Option<SystemTime>,
    failure: Option<String>,
    data: Vec<Vec<u8>>,
    history: Vec<HistoryEntry>,
}

// ============================================================================
// SessionState - Transitions
// ============================================================================

impl SessionState {
    /// Creates an idle session with an empty history.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new request.
    ///
    /// Copies the target from `components`; without a display name the
    /// request's own URI is used as its name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AlreadyActive`] if a request is already in progress.
    pub fn begin(&mut self, components: &UriComponents) -> Result<RequestId> {
        if self.active {
            return Err(Error::already_active(
                self.host.clone().unwrap_or_default(),
                self.selector.clone().unwrap_or_default(),
            ));
        }

        let id = RequestId::generate();
        let name = components
            .effective_display_name()
            .map_or_else(|| components.to_uri(), str::to_string);

        self.active = true;
        self.id = Some(id);
        self.host = Some(components.host.clone());
        self.port = Some(components.port);
        self.ipaddr = None;
        self.item_type = Some(components.item_type);
        self.selector = Some(components.selector.clone());
        self.query = components.effective_query().map(str::to_string);
        self.name = Some(name);
        self.start = Some(SystemTime::now());
        self.stop = None;
        self.failure = None;
        self.data = Vec::new();

        debug!(%id, host = %components.host, port = components.port, "Request begun");

        Ok(id)
    }

    /// Records the peer address resolved at connect time.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidState`] if no request is active.
    pub fn record_peer(&mut self, ipaddr: IpAddr) -> Result<()> {
        self.require_active("record a peer address")?;
        self.ipaddr = Some(ipaddr);
        Ok(())
    }

    /// Appends a received chunk in arrival order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidState`] if no request is receiving.
    pub fn append_chunk(&mut self, chunk: impl Into<Vec<u8>>) -> Result<()> {
        self.require_receiving("append data")?;
        self.data.push(chunk.into());
        Ok(())
    }

    /// Marks the end of the response stream.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidState`] if no request is receiving.
    pub fn finish(&mut self) -> Result<()> {
        self.require_receiving("finish")?;
        self.stop = Some(SystemTime::now());
        Ok(())
    }

    /// Records a connection failure.
    ///
    /// The request stays active until `reset`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidState`] if no request is receiving.
    pub fn mark_failed(&mut self, message: impl Into<String>) -> Result<()> {
        self.require_receiving("mark as failed")?;
        self.failure = Some(message.into());
        Ok(())
    }

    /// Archives the request into history and clears the active fields.
    ///
    /// Only a finished or failed request can be reset.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidState`] if the session is idle or the request
    /// is still in flight.
    pub fn reset(&mut self) -> Result<&HistoryEntry> {
        self.require_active("reset")?;
        if self.stop.is_none() && self.failure.is_none() {
            return Err(Error::invalid_state(
                "cannot reset a request that is still in flight",
            ));
        }

        let outcome = match self.failure.take() {
            Some(message) => Outcome::Failed { message },
            None => Outcome::Completed,
        };

        let entry = HistoryEntry {
            id: self.id.take().unwrap_or_else(RequestId::generate),
            host: self.host.take().unwrap_or_default(),
            port: self.port.take().unwrap_or_default(),
            ipaddr: self.ipaddr.take(),
            start: self.start.take().unwrap_or_else(SystemTime::now),
            stop: self.stop.take(),
            outcome,
        };

        debug!(id = %entry.id, host = %entry.host, outcome = ?entry.outcome, "Request archived");

        self.active = false;
        self.item_type = None;
        self.selector = None;
        self.query = None;
        self.name = None;
        self.data = Vec::new();

        self.history.push(entry);
        self.history
            .last()
            .ok_or_else(|| Error::invalid_state("history is empty after archiving"))
    }
}

// ============================================================================
// SessionState - Accessors
// ============================================================================

impl SessionState {
    /// Returns `true` while a request is in progress.
    #[inline]
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Returns `true` once the response stream ended or failed.
    #[inline]
    #[must_use]
    pub const fn is_settled(&self) -> bool {
        self.stop.is_some() || self.failure.is_some()
    }

    /// Returns the active request ID.
    #[inline]
    #[must_use]
    pub const fn request_id(&self) -> Option<RequestId> {
        self.id
    }

    /// Returns the active host.
    #[inline]
    #[must_use]
    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    /// Returns the active port.
    #[inline]
    #[must_use]
    pub const fn port(&self) -> Option<u16> {
        self.port
    }

    /// Returns the resolved peer address.
    #[inline]
    #[must_use]
    pub const fn ipaddr(&self) -> Option<IpAddr> {
        self.ipaddr
    }

    /// Returns the active selector.
    #[inline]
    #[must_use]
    pub fn selector(&self) -> Option<&str> {
        self.selector.as_deref()
    }

    /// Returns the active query.
    #[inline]
    #[must_use]
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// Returns the active display name.
    #[inline]
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the active item type.
    #[inline]
    #[must_use]
    pub const fn item_type(&self) -> Option<ItemType> {
        self.item_type
    }

    /// Returns the start timestamp.
    #[inline]
    #[must_use]
    pub const fn start(&self) -> Option<SystemTime> {
        self.start
    }

    /// Returns the stop timestamp.
    #[inline]
    #[must_use]
    pub const fn stop(&self) -> Option<SystemTime> {
        self.stop
    }

    /// Returns the recorded failure.
    #[inline]
    #[must_use]
    pub fn failure(&self) -> Option<&str> {
        self.failure.as_deref()
    }

    /// Returns the received chunks in arrival order.
    #[inline]
    #[must_use]
    pub fn data(&self) -> &[Vec<u8>] {
        &self.data
    }

    /// Returns the history ledger, oldest first.
    #[inline]
    #[must_use]
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Rebuilds the URI components of the active request.
    ///
    /// A name that merely repeats the request URI is not a display name.
    #[must_use]
    pub fn components(&self) -> Option<UriComponents> {
        if !self.active {
            return None;
        }

        let mut components = UriComponents {
            host: self.host.clone()?,
            port: self.port?,
            item_type: self.item_type.unwrap_or_default(),
            selector: self.selector.clone().unwrap_or_default(),
            query: self.query.clone(),
            display_name: None,
        };

        if let Some(name) = &self.name
            && *name != components.to_uri()
        {
            components.display_name = Some(name.clone());
        }

        Some(components)
    }

    /// Returns a serializable copy of the active fields.
    #[must_use]
    pub fn snapshot(&self) -> ServerSnapshot {
        ServerSnapshot {
            active: self.active,
            id: self.id,
            host: self.host.clone(),
            port: self.port,
            ipaddr: self.ipaddr,
            item_type: self.item_type,
            selector: self.selector.clone(),
            query: self.query.clone(),
            name: self.name.clone(),
            start: self.start,
            stop: self.stop,
            failure: self.failure.clone(),
            chunks: self.data.len(),
            bytes: self.data.iter().map(Vec::len).sum(),
        }
    }
}

// ============================================================================
// SessionState - Preconditions
// ============================================================================

impl SessionState {
    /// Fails unless a request is active.
    fn require_active(&self, action: &str) -> Result<()> {
        if self.active {
            Ok(())
        } else {
            Err(Error::invalid_state(format!(
                "cannot {action}: no active request"
            )))
        }
    }

    /// Fails unless a request is active and still receiving.
    fn require_receiving(&self, action: &str) -> Result<()> {
        self.require_active(action)?;
        if self.is_settled() {
            return Err(Error::invalid_state(format!(
                "cannot {action}: response already ended"
            )));
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use std::net::Ipv4Addr;

    fn components() -> UriComponents {
        UriComponents::new("host1", 70)
            .with_selector("/docs")
            .with_query("frogs")
    }

    #[test]
    fn test_new_is_idle() {
        let state = SessionState::new();
        assert!(!state.is_active());
        assert!(state.history().is_empty());
        assert_eq!(state.snapshot(), ServerSnapshot::default());
    }

    #[test]
    fn test_begin_copies_components() {
        let mut state = SessionState::new();
        let id = state.begin(&components()).expect("begin");

        assert!(state.is_active());
        assert_eq!(state.request_id(), Some(id));
        assert_eq!(state.host(), Some("host1"));
        assert_eq!(state.port(), Some(70));
        assert_eq!(state.selector(), Some("/docs"));
        assert_eq!(state.query(), Some("frogs"));
        assert!(state.start().is_some());
        assert!(state.stop().is_none());
        assert!(state.data().is_empty());
    }

    #[test]
    fn test_begin_defaults_name_to_uri() {
        let mut state = SessionState::new();
        state.begin(&components()).expect("begin");
        assert_eq!(state.name(), Some("gopher://host1:70/1/docs?frogs"));
    }

    #[test]
    fn test_begin_keeps_display_name() {
        let mut state = SessionState::new();
        state
            .begin(&components().with_display_name("Docs"))
            .expect("begin");
        assert_eq!(state.name(), Some("Docs"));
    }

    #[test]
    fn test_begin_while_active_fails() {
        let mut state = SessionState::new();
        state.begin(&components()).expect("begin");

        let err = state.begin(&UriComponents::new("other", 70)).unwrap_err();
        assert!(matches!(err, Error::AlreadyActive { .. }));
        assert_eq!(state.host(), Some("host1"));
    }

    #[test]
    fn test_chunks_keep_arrival_order() {
        let mut state = SessionState::new();
        state.begin(&components()).expect("begin");
        state.append_chunk(b"one".to_vec()).expect("append");
        state.append_chunk(&b"two"[..]).expect("append");

        assert_eq!(state.data(), &[b"one".to_vec(), b"two".to_vec()]);
        assert_eq!(state.snapshot().bytes, 6);
        assert_eq!(state.snapshot().chunks, 2);
    }

    #[test]
    fn test_append_while_idle_fails() {
        let mut state = SessionState::new();
        assert!(matches!(
            state.append_chunk(b"x".to_vec()),
            Err(Error::InvalidState { .. })
        ));
    }

    #[test]
    fn test_append_after_finish_fails() {
        let mut state = SessionState::new();
        state.begin(&components()).expect("begin");
        state.finish().expect("finish");
        assert!(state.append_chunk(b"late".to_vec()).is_err());
    }

    #[test]
    fn test_reset_archives_and_clears() {
        let mut state = SessionState::new();
        let id = state.begin(&components()).expect("begin");
        state
            .record_peer(IpAddr::V4(Ipv4Addr::LOCALHOST))
            .expect("peer");
        state.append_chunk(b"data".to_vec()).expect("append");
        state.finish().expect("finish");

        let start = state.start();
        let stop = state.stop();

        let entry = state.reset().expect("reset").clone();
        assert_eq!(entry.id, id);
        assert_eq!(entry.host, "host1");
        assert_eq!(entry.port, 70);
        assert_eq!(entry.ipaddr, Some(IpAddr::V4(Ipv4Addr::LOCALHOST)));
        assert_eq!(Some(entry.start), start);
        assert_eq!(entry.stop, stop);
        assert!(entry.is_completed());

        assert_eq!(state.history().len(), 1);
        assert_eq!(state.snapshot(), ServerSnapshot::default());
        assert!(state.components().is_none());
    }

    #[test]
    fn test_reset_in_flight_fails() {
        let mut state = SessionState::new();
        state.begin(&components()).expect("begin");

        assert!(matches!(state.reset(), Err(Error::InvalidState { .. })));
        assert!(state.is_active());
        assert!(state.history().is_empty());
    }

    #[test]
    fn test_reset_idle_fails() {
        let mut state = SessionState::new();
        assert!(state.reset().is_err());
        assert!(state.history().is_empty());
    }

    #[test]
    fn test_reset_twice_fails() {
        let mut state = SessionState::new();
        state.begin(&components()).expect("begin");
        state.finish().expect("finish");
        state.reset().expect("reset");

        assert!(state.reset().is_err());
        assert_eq!(state.history().len(), 1);
    }

    #[test]
    fn test_failed_request_can_be_reset() {
        let mut state = SessionState::new();
        state.begin(&components()).expect("begin");
        state.mark_failed("connection refused").expect("fail");

        assert!(state.is_active());
        let entry = state.reset().expect("reset");
        assert!(entry.stop.is_none());
        assert_eq!(
            entry.outcome,
            Outcome::Failed {
                message: "connection refused".to_string()
            }
        );
        assert!(!state.is_active());
    }

    #[test]
    fn test_components_round_trip() {
        let mut state = SessionState::new();
        let original = components().with_display_name("Docs");
        state.begin(&original).expect("begin");

        assert_eq!(state.components(), Some(original));
    }

    #[test]
    fn test_components_omit_default_name() {
        let mut state = SessionState::new();
        state.begin(&components()).expect("begin");

        let rebuilt = state.components().expect("active");
        assert!(rebuilt.display_name.is_none());
        assert_eq!(rebuilt, components());
    }

    #[test]
    fn test_history_preserves_order() {
        let mut state = SessionState::new();
        for host in ["a", "b", "c"] {
            state.begin(&UriComponents::new(host, 70)).expect("begin");
            state.finish().expect("finish");
            state.reset().expect("reset");
        }

        let hosts: Vec<&str> = state.history().iter().map(|e| e.host.as_str()).collect();
        assert_eq!(hosts, ["a", "b", "c"]);
    }

    #[test]
    fn test_reset_returns_newest_entry() {
        let mut state = SessionState::new();
        for host in ["first", "second"] {
            state.begin(&UriComponents::new(host, 70)).expect("begin");
            state.finish().expect("finish");
            let entry = state.reset().expect("reset");
            assert_eq!(entry.host, host);
        }

        assert_eq!(state.history().last().map(|e| e.host.as_str()), Some("second"));
    }
}
