//! Gopher URI codec.
//!
//! Parses raw input into [`UriComponents`] and serializes components back
//! into their canonical forms.
//!
//! # Grammar
//!
//! ```text
//! gopher://[host][:port][/itemType][selector][?query][#displayName]
//! ```
//!
//! Input is percent-decoded before matching; output is percent-encoded.
//!
//! # Example
//!
//! ```
//! use gopher_client::uri::UriCodec;
//!
//! let codec = UriCodec::with_defaults("gopher.floodgap.com", 70)?;
//! let components = codec.parse("gopher://gopher.floodgap.com/1/world")?;
//!
//! assert_eq!(components.selector, "/world");
//! assert_eq!(components.to_short_uri(), "gopher://gopher.floodgap.com:70/1/world");
//! # Ok::<(), gopher_client::Error>(())
//! ```

// ============================================================================
// Submodules
// ============================================================================

/// Grammar-driven URI parsing.
pub mod codec;

/// URI components and serialization.
pub mod components;

/// Percent-encoding helpers.
pub mod encoding;

// ============================================================================
// Re-exports
// ============================================================================

pub use codec::{DEFAULT_URI_PATTERN, UriCodec};
pub use components::{DEFAULT_PORT, SCHEME_PREFIX, UriComponents};
