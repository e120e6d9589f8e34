//! Gopher client - RFC 1436 protocol engine.
//!
//! This library fetches Gopher resources and turns the raw byte stream
//! into a normalized, navigable directory listing or a content payload.
//!
//! # Architecture
//!
//! - **URI Codec**: parses `gopher://` URIs and bare selectors, serializes them back
//! - **Session State**: one active request plus an append-only history ledger
//! - **Connection Manager**: one TCP socket per request, read until the server closes
//! - **Response Parser**: classifies lines into info text and navigable items
//!
//! Key design principles:
//!
//! - One request at a time (no implicit queuing)
//! - Every request ends in the history ledger via an explicit reset
//! - Rendering is an injected capability, not part of the protocol core
//!
//! # Quick Start
//!
//! ```no_run
//! use gopher_client::{GopherClient, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = GopherClient::builder()
//!         .default_host("gopher.floodgap.com")
//!         .build()?;
//!
//!     let response = client.get("gopher://gopher.floodgap.com/1/").await?;
//!     println!("{}", response.text);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`client`] | [`GopherClient`], builder, configuration, renderer |
//! | [`error`] | Error types and [`Result`] alias |
//! | [`identifiers`] | Type-safe ID wrappers |
//! | [`protocol`] | Item types, request line, response parser |
//! | [`session`] | Active request state and history |
//! | [`transport`] | TCP connection manager |
//! | [`uri`] | URI parsing and serialization |

// ============================================================================
// Modules
// ============================================================================

/// Client facade: `get`, `search`, status and history.
///
/// Use [`GopherClient::builder()`] to create a configured client.
pub mod client;

/// Error types and result aliases.
///
/// All fallible operations return [`Result<T>`] which uses [`Error`].
pub mod error;

/// Type-safe identifiers.
pub mod identifiers;

/// Gopher wire protocol: item types, request line, response parsing.
pub mod protocol;

/// Request session state and history ledger.
pub mod session;

/// TCP transport layer.
pub mod transport;

/// Gopher URI codec.
pub mod uri;

// ============================================================================
// Re-exports
// ============================================================================

// Client types
pub use client::{
    ClientBuilder, ClientConfig, ClientStatus, GopherClient, GopherResponse, PlainRenderer,
    Rendered, Renderer, ResponseData,
};

// Error types
pub use error::{Error, Result};

// Identifier types
pub use identifiers::RequestId;

// Protocol types
pub use protocol::{DirectoryEntry, ItemType, Request, ResponseBody};

// Session types
pub use session::{HistoryEntry, Outcome, ServerSnapshot, SessionState};

// Transport types
pub use transport::Connection;

// URI types
pub use uri::{UriCodec, UriComponents};
