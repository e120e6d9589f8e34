//! Gopher client facade.
//!
//! This module provides the main entry point for fetching Gopher resources.
//!
//! # Components
//!
//! | Type | Description |
//! |------|-------------|
//! | [`GopherClient`] | Runs `get` and `search` requests |
//! | [`ClientBuilder`] | Fluent configuration builder |
//! | [`ClientConfig`] | Serializable settings from the host application |
//! | [`Renderer`] | Injected presentation step |
//! | [`GopherResponse`] | Rendered text plus structured data |

// ============================================================================
// Submodules
// ============================================================================

/// Fluent builder pattern for client configuration.
pub mod builder;

/// Client settings and JSON loading.
pub mod config;

/// Core client implementation.
pub mod core;

/// Rendering seam.
pub mod render;

/// Response and status types.
pub mod response;

// ============================================================================
// Re-exports
// ============================================================================

pub use builder::ClientBuilder;
pub use config::{ClientConfig, DEFAULT_HOST, DEFAULT_SEARCH};
pub use core::GopherClient;
pub use render::{PlainRenderer, Rendered, Renderer};
pub use response::{ClientStatus, GopherResponse, ResponseData};
