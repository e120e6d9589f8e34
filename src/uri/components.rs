//! Parsed Gopher URI components and their serialized forms.

// ============================================================================
// Imports
// ============================================================================

use serde::{Deserialize, Serialize};

use crate::protocol::ItemType;

use super::encoding::{encode_component, encode_uri};

// ============================================================================
// Constants
// ============================================================================

/// URI scheme prefix.
pub const SCHEME_PREFIX: &str = "gopher://";

/// Well-known Gopher port.
pub const DEFAULT_PORT: u16 = 70;

// ============================================================================
// UriComponents
// ============================================================================

/// Components of a Gopher URI.
///
/// ```text
/// gopher://host[:port][/itemType][selector][?query][#displayName]
/// ```
///
/// Host and port are always resolved; the selector may be empty (root
/// menu) but is never absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UriComponents {
    /// Server hostname.
    pub host: String,

    /// Server port.
    pub port: u16,

    /// Item type of the target resource.
    #[serde(rename = "type")]
    pub item_type: ItemType,

    /// Selector string.
    pub selector: String,

    /// Search query.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,

    /// Human-facing label.
    #[serde(rename = "name", skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

// ============================================================================
// UriComponents - Constructors
// ============================================================================

impl UriComponents {
    /// Creates components for the root menu of a server.
    #[must_use]
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            item_type: ItemType::default(),
            selector: String::new(),
            query: None,
            display_name: None,
        }
    }

    /// Sets the item type.
    #[inline]
    #[must_use]
    pub fn with_item_type(mut self, item_type: ItemType) -> Self {
        self.item_type = item_type;
        self
    }

    /// Sets the selector.
    #[inline]
    #[must_use]
    pub fn with_selector(mut self, selector: impl Into<String>) -> Self {
        self.selector = selector.into();
        self
    }

    /// Sets the search query.
    #[inline]
    #[must_use]
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Sets the display name.
    #[inline]
    #[must_use]
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }
}

// ============================================================================
// UriComponents - Serialization
// ============================================================================

impl UriComponents {
    /// Returns the query if it carries a value.
    ///
    /// An empty query is the same as no query.
    #[inline]
    #[must_use]
    pub fn effective_query(&self) -> Option<&str> {
        self.query.as_deref().filter(|q| !q.is_empty())
    }

    /// Returns the display name if it carries a value.
    #[inline]
    #[must_use]
    pub fn effective_display_name(&self) -> Option<&str> {
        self.display_name.as_deref().filter(|n| !n.is_empty())
    }

    /// Serializes to `gopher://host:port/<type><selector>[?query]`.
    #[must_use]
    pub fn to_short_uri(&self) -> String {
        let mut uri = format!(
            "{SCHEME_PREFIX}{}:{}/{}{}",
            self.host, self.port, self.item_type, self.selector
        );

        if let Some(query) = self.effective_query() {
            uri.push('?');
            uri.push_str(query);
        }

        encode_uri(&uri)
    }

    /// Serializes to the short form plus `#displayName`.
    #[must_use]
    pub fn to_uri(&self) -> String {
        let mut uri = self.to_short_uri();

        if let Some(name) = self.effective_display_name() {
            uri.push('#');
            uri.push_str(&encode_component(name));
        }

        uri
    }

    /// Serializes as a directory-entry line.
    ///
    /// ```text
    /// <type><name> TAB <selector> TAB <host> TAB <port> CRLF
    /// ```
    ///
    /// Without a display name the long URI stands in for it.
    #[must_use]
    pub fn to_directory_entry(&self) -> String {
        let name = self
            .effective_display_name()
            .map_or_else(|| self.to_uri(), str::to_string);

        format!(
            "{}{}\t{}\t{}\t{}\r\n",
            self.item_type, name, self.selector, self.host, self.port
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
