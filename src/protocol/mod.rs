//! Gopher wire protocol.
//!
//! This module defines what goes over the socket and how the reply is
//! interpreted.
//!
//! # Protocol Overview
//!
//! | Direction | Format |
//! |-----------|--------|
//! | Client → Server | `selector [TAB query] CRLF` |
//! | Server → Client | byte stream until the server closes |
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `entry` | Parsed directory entries |
//! | `item` | Item type characters |
//! | `parser` | Response framing and directory parsing |
//! | `request` | Request line formatting |

// ============================================================================
// Submodules
// ============================================================================

/// Parsed directory entries.
pub mod entry;

/// Gopher item types.
pub mod item;

/// Response framing and directory parsing.
pub mod parser;

/// Request line formatting.
pub mod request;

// ============================================================================
// Re-exports
// ============================================================================

pub use entry::DirectoryEntry;
pub use item::ItemType;
pub use parser::ResponseBody;
pub use request::Request;
