//! Parsed directory entries.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::uri::UriComponents;

use super::ItemType;

// ============================================================================
// DirectoryEntry
// ============================================================================

/// One line of a normalized directory listing.
///
/// # Normalized Form
///
/// ```text
/// l: <text>
/// cmd[<type><name>]:#gopher get <host>:<port><selector>
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DirectoryEntry {
    /// Informational text (`i` and `3` lines).
    Info {
        /// Trimmed display text.
        text: String,
    },

    /// Navigable item.
    Link {
        /// Item type of the target.
        #[serde(rename = "type")]
        item_type: ItemType,
        /// Label shown to the user.
        #[serde(rename = "display")]
        display_text: String,
        /// Selector on the target server.
        selector: String,
        /// Target hostname.
        host: String,
        /// Target port, verbatim from the server.
        port: String,
    },
}

impl DirectoryEntry {
    /// Creates an info entry.
    #[inline]
    #[must_use]
    pub fn info(text: impl Into<String>) -> Self {
        Self::Info { text: text.into() }
    }

    /// Returns `true` for info entries.
    #[inline]
    #[must_use]
    pub fn is_info(&self) -> bool {
        matches!(self, Self::Info { .. })
    }

    /// Renders the entry as one normalized output line.
    #[must_use]
    pub fn to_line(&self) -> String {
        self.to_string()
    }

    /// Returns the `gopher://` URI a link points to.
    ///
    /// `None` for info lines and for links whose host or port is unusable.
    #[must_use]
    pub fn uri(&self) -> Option<String> {
        let Self::Link {
            item_type,
            display_text,
            selector,
            host,
            port,
        } = self
        else {
            return None;
        };

        let port = port.trim().parse::<u16>().ok().filter(|p| *p != 0)?;
        if host.is_empty() {
            return None;
        }

        let mut components = UriComponents::new(host.as_str(), port)
            .with_item_type(*item_type)
            .with_selector(selector.as_str());
        if !display_text.is_empty() {
            components = components.with_display_name(display_text.as_str());
        }

        Some(components.to_uri())
    }
}

impl fmt::Display for DirectoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info { text } => write!(f, "l: {text}"),
            Self::Link {
                item_type,
                display_text,
                selector,
                host,
                port,
            } => write!(
                f,
                "cmd[{item_type}{display_text}]:#gopher get {host}:{port}{selector}"
            ),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
