//! History ledger entries.

// ============================================================================
// Imports
// ============================================================================

use std::net::IpAddr;
use std::time::{Duration, SystemTime};

use serde::Serialize;

use crate::identifiers::RequestId;

// ============================================================================
// Outcome
// ============================================================================

/// How an archived request ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Outcome {
    /// The server closed the stream normally.
    Completed,
    /// The connection failed or timed out.
    Failed {
        /// Failure description.
        message: String,
    },
}

// ============================================================================
// HistoryEntry
// ============================================================================

/// Record of one finished request.
///
/// Created only by `SessionState::reset`; never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    /// Request identity.
    pub id: RequestId,
    /// Server hostname.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Peer address resolved at connect time.
    pub ipaddr: Option<IpAddr>,
    /// When the request began.
    pub start: SystemTime,
    /// When the response stream ended; `None` for failed requests.
    pub stop: Option<SystemTime>,
    /// How the request ended.
    pub outcome: Outcome,
}

impl HistoryEntry {
    /// Returns `true` if the request completed normally.
    #[inline]
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.outcome == Outcome::Completed
    }

    /// Returns the round-trip time of a completed request.
    #[must_use]
    pub fn duration(&self) -> Option<Duration> {
        self.stop
            .and_then(|stop| stop.duration_since(self.start).ok())
    }
}

// ============================================================================
// Tests
// ============================================================================
