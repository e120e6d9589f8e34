//! TCP transport layer.
//!
//! This module owns the socket for one request.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐                              ┌─────────────────┐
//! │  GopherClient   │   selector [TAB query] CRLF  │  Gopher server  │
//! │                 │─────────────────────────────►│                 │
//! │   Connection    │                              │                 │
//! │                 │◄─────────────────────────────│                 │
//! │  SessionState   │   bytes until close          │                 │
//! └─────────────────┘                              └─────────────────┘
//! ```
//!
//! # Connection Lifecycle
//!
//! 1. `SessionState::begin` - Mark the request active
//! 2. `Connection::request` - Connect, send the request line, collect chunks
//! 3. Server closes the stream
//! 4. `SessionState::finish` / `reset` - Stamp and archive the request

// ============================================================================
// Submodules
// ============================================================================

/// TCP connection and read loop.
pub mod connection;

// ============================================================================
// Re-exports
// ============================================================================

pub use connection::{Connection, DEFAULT_READ_BUFFER_SIZE, DEFAULT_REQUEST_TIMEOUT};
