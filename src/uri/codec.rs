//! URI parsing against a configurable grammar.
//!
//! The grammar is a regular expression with named capture groups, so it can
//! evolve through configuration without touching the parser.
//!
//! | Group | Meaning |
//! |-------|---------|
//! | `host` | Server hostname (required) |
//! | `port` | Server port (required) |
//! | `selector` | Selector after the item type (required) |
//! | `type` | Single item-type character |
//! | `bare` | Whole selector when no scheme is given |
//! | `query` | Search query after `?` |
//! | `name` | Display name after `#` |

// ============================================================================
// Imports
// ============================================================================

use regex::{Captures, Regex};
use tracing::trace;

use crate::error::{Error, Result};
use crate::protocol::ItemType;

use super::components::{SCHEME_PREFIX, UriComponents};
use super::encoding::decode;

// ============================================================================
// Constants
// ============================================================================

/// Built-in URI grammar.
///
/// Either `gopher://host[:port][/type selector]` or a bare selector,
/// followed by an optional `?query` and `#name`.
pub const DEFAULT_URI_PATTERN: &str = concat!(
    r"^(?:(?i:gopher)://(?P<host>[^:/?#\s]*)(?::(?P<port>[0-9]+))?",
    r"(?:/(?P<type>[^/?#])?(?P<selector>[^?#]*))?",
    r"|(?P<bare>[^?#]*))",
    r"(?:\?(?P<query>[^#]*))?",
    r"(?:#(?P<name>(?s:.*)))?$",
);

/// Groups every URI pattern must define.
const REQUIRED_GROUPS: [&str; 3] = ["host", "port", "selector"];

// ============================================================================
// UriCodec
// ============================================================================

/// Parses raw input into [`UriComponents`].
///
/// Stateless apart from its grammar and defaults.
#[derive(Debug, Clone)]
pub struct UriCodec {
    /// Compiled grammar.
    pattern: Regex,
    /// Host used when the input names none.
    default_host: String,
    /// Port used when the input names none.
    default_port: u16,
}

impl UriCodec {
    /// Creates a codec with the built-in grammar.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the defaults are invalid.
    pub fn with_defaults(default_host: impl Into<String>, default_port: u16) -> Result<Self> {
        Self::new(DEFAULT_URI_PATTERN, default_host, default_port)
    }

    /// Creates a codec with a custom grammar.
    ///
    /// # Errors
    ///
    /// - [`Error::Regex`] if the pattern does not compile
    /// - [`Error::Config`] if a required group is missing or the defaults are invalid
    pub fn new(
        pattern: &str,
        default_host: impl Into<String>,
        default_port: u16,
    ) -> Result<Self> {
        let pattern = Regex::new(pattern)?;
        Self::check_groups(&pattern)?;

        let default_host = default_host.into();
        if default_host.trim().is_empty() {
            return Err(Error::config("default host must not be empty"));
        }
        if default_port == 0 {
            return Err(Error::config("default port must be non-zero"));
        }

        Ok(Self {
            pattern,
            default_host,
            default_port,
        })
    }

    /// Returns the grammar source.
    #[inline]
    #[must_use]
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// Returns the default host.
    #[inline]
    #[must_use]
    pub fn default_host(&self) -> &str {
        &self.default_host
    }

    /// Returns the default port.
    #[inline]
    #[must_use]
    pub const fn default_port(&self) -> u16 {
        self.default_port
    }

    /// Parses a Gopher URI or a bare selector/query string.
    ///
    /// The whole input is percent-decoded before matching. Missing host and
    /// port fall back to the configured defaults.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedUri`] if the input does not match the grammar,
    /// names a scheme without a host, or carries an invalid port.
    pub fn parse(&self, raw: &str) -> Result<UriComponents> {
        let input = raw.trim();
        let decoded = decode(input)
            .ok_or_else(|| Error::malformed_uri(raw, "percent-decoding produced invalid UTF-8"))?;

        let captures = self
            .pattern
            .captures(&decoded)
            .ok_or_else(|| Error::malformed_uri(raw, "does not match the URI grammar"))?;

        let has_scheme = decoded
            .get(..SCHEME_PREFIX.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(SCHEME_PREFIX));

        let host = match group(&captures, "host") {
            Some(host) => host.to_string(),
            None if has_scheme => {
                return Err(Error::malformed_uri(raw, "no parseable host after scheme"));
            }
            None => self.default_host.clone(),
        };

        let port = match group(&captures, "port") {
            Some(port) => parse_port(raw, port)?,
            None => self.default_port,
        };

        let item_type = group(&captures, "type")
            .and_then(|t| t.chars().next())
            .map(ItemType::from)
            .unwrap_or_default();

        let selector = group(&captures, "selector")
            .or_else(|| group(&captures, "bare"))
            .unwrap_or_default()
            .to_string();

        let components = UriComponents {
            host,
            port,
            item_type,
            selector,
            query: group(&captures, "query").map(str::to_string),
            display_name: group(&captures, "name").map(str::to_string),
        };

        trace!(input = %raw, ?components, "Parsed URI");

        Ok(components)
    }

    /// Verifies that the grammar exposes every required group.
    fn check_groups(pattern: &Regex) -> Result<()> {
        let names: Vec<&str> = pattern.capture_names().flatten().collect();

        for required in REQUIRED_GROUPS {
            if !names.contains(&required) {
                return Err(Error::config(format!(
                    "URI pattern is missing the named group '{required}'"
                )));
            }
        }

        Ok(())
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Returns a named group's text if it matched something non-empty.
fn group<'h>(captures: &Captures<'h>, name: &str) -> Option<&'h str> {
    captures
        .name(name)
        .map(|m| m.as_str())
        .filter(|s| !s.is_empty())
}

/// Parses a port number, rejecting zero and overflow.
fn parse_port(raw: &str, port: &str) -> Result<u16> {
    match port.parse::<u16>() {
        Ok(0) | Err(_) => Err(Error::malformed_uri(raw, format!("invalid port '{port}'"))),
        Ok(port) => Ok(port),
    }
}

// ============================================================================
// Tests
// ============================================================================
