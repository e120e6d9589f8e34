//! Percent-encoding helpers.
//!
//! Two flavours are needed: whole-URI encoding that leaves the URI
//! delimiters alone, and component encoding for the `#name` fragment.

// ============================================================================
// Imports
// ============================================================================

use std::borrow::Cow;

// ============================================================================
// Constants
// ============================================================================

/// Characters left untouched when encoding a whole URI.
const URI_UNESCAPED: &str = ";,/?:@&=+$-_.!~*'()#";

// ============================================================================
// Functions
// ============================================================================

/// Percent-encodes a URI, keeping reserved delimiters intact.
#[must_use]
pub fn encode_uri(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut buf = [0u8; 4];

    for ch in input.chars() {
        if ch.is_ascii_alphanumeric() || URI_UNESCAPED.contains(ch) {
            out.push(ch);
        } else {
            out.push_str(&urlencoding::encode(ch.encode_utf8(&mut buf)));
        }
    }

    out
}

/// Percent-encodes a single URI component, delimiters included.
#[inline]
#[must_use]
pub fn encode_component(input: &str) -> Cow<'_, str> {
    urlencoding::encode(input)
}

/// Percent-decodes the whole input.
///
/// Returns `None` when the decoded bytes are not valid UTF-8.
#[inline]
#[must_use]
pub fn decode(input: &str) -> Option<Cow<'_, str>> {
    urlencoding::decode(input).ok()
}

// ============================================================================
// Tests
// ============================================================================
