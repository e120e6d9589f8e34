//! Results returned by the client.

// ============================================================================
// Imports
// ============================================================================

use serde::Serialize;
use serde_json::Value;

use crate::identifiers::RequestId;
use crate::protocol::{DirectoryEntry, ResponseBody};
use crate::session::ServerSnapshot;

// ============================================================================
// GopherResponse
// ============================================================================

/// Successful result of `get` or `search`.
#[derive(Debug, Clone, Serialize)]
pub struct GopherResponse {
    /// Rendered text.
    pub text: String,

    /// Optional HTML rendering.
    pub html: Option<String>,

    /// Raw server state and parser output.
    pub data: ResponseData,
}

impl GopherResponse {
    /// Returns the parsed directory entries (empty for content payloads).
    #[inline]
    #[must_use]
    pub fn entries(&self) -> &[DirectoryEntry] {
        self.data.body.entries()
    }

    /// Returns the request ID.
    #[inline]
    #[must_use]
    pub const fn request_id(&self) -> RequestId {
        self.data.request_id
    }
}

// ============================================================================
// ResponseData
// ============================================================================

/// Structured data attached to a response.
#[derive(Debug, Clone, Serialize)]
pub struct ResponseData {
    /// Request identity.
    pub request_id: RequestId,

    /// Server state at the moment the stream ended.
    pub server: ServerSnapshot,

    /// Parsed body.
    pub body: ResponseBody,

    /// Renderer-specific data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rendered: Option<Value>,
}

// ============================================================================
// ClientStatus
// ============================================================================

/// Point-in-time view of the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientStatus {
    /// Whether a request is in progress.
    pub active: bool,

    /// Active request fields.
    pub server: ServerSnapshot,

    /// Number of archived requests.
    pub history: usize,
}
