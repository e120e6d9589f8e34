//! Response framing and directory parsing.
//!
//! A Gopher response is an unterminated byte stream read until the server
//! closes the connection. This module turns the collected chunks into
//! either a normalized directory listing or a content payload.
//!
//! # Directory Rules
//!
//! Lines are processed in wire order:
//!
//! 1. The first line that is empty after trimming ends the listing.
//! 2. `i` and `3` lines become `l: <text>` when their text is non-empty.
//! 3. A lone `.` is skipped and processing continues.
//! 4. Every other line becomes a navigable `cmd[...]` entry.

// ============================================================================
// Imports
// ============================================================================

use serde::Serialize;
use tracing::warn;

use super::{DirectoryEntry, ItemType};

// ============================================================================
// Constants
// ============================================================================

/// Field separator inside a directory line.
const FIELD_SEPARATOR: char = '\t';

/// Legacy end-of-response marker.
const DOT_LINE: &str = ".";

// ============================================================================
// ResponseBody
// ============================================================================

/// Decoded response payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "content", rename_all = "lowercase")]
pub enum ResponseBody {
    /// Menu listing.
    Directory(Vec<DirectoryEntry>),
    /// Text document.
    Text(String),
    /// Anything else, byte for byte.
    Binary(Vec<u8>),
}

impl ResponseBody {
    /// Returns `true` for menu listings.
    #[inline]
    #[must_use]
    pub fn is_directory(&self) -> bool {
        matches!(self, Self::Directory(_))
    }

    /// Returns the directory entries, empty for content payloads.
    #[must_use]
    pub fn entries(&self) -> &[DirectoryEntry] {
        match self {
            Self::Directory(entries) => entries,
            Self::Text(_) | Self::Binary(_) => &[],
        }
    }

    /// Returns the normalized text handed to the renderer.
    #[must_use]
    pub fn to_text(&self) -> String {
        match self {
            Self::Directory(entries) => normalize(entries),
            Self::Text(text) => text.clone(),
            Self::Binary(bytes) => format!("[binary content: {} bytes]", bytes.len()),
        }
    }
}

// ============================================================================
// Functions
// ============================================================================

/// Concatenates received chunks in arrival order.
#[must_use]
pub fn concat<B: AsRef<[u8]>>(chunks: &[B]) -> Vec<u8> {
    let total = chunks.iter().map(|c| c.as_ref().len()).sum();
    let mut buffer = Vec::with_capacity(total);

    for chunk in chunks {
        buffer.extend_from_slice(chunk.as_ref());
    }

    buffer
}

/// Parses received chunks into normalized directory text.
#[must_use]
pub fn parse<B: AsRef<[u8]>>(chunks: &[B]) -> String {
    normalize(&parse_directory(&concat(chunks)))
}

/// Parses a response according to the requested item type.
///
/// Menus (`1`, `7`) are parsed as directories, text types are decoded,
/// everything else is returned untouched.
#[must_use]
pub fn parse_body<B: AsRef<[u8]>>(chunks: &[B], item_type: ItemType) -> ResponseBody {
    let buffer = concat(chunks);

    if item_type.is_menu() {
        ResponseBody::Directory(parse_directory(&buffer))
    } else if item_type.is_text() {
        ResponseBody::Text(decode_text(&buffer))
    } else {
        ResponseBody::Binary(buffer)
    }
}

/// Parses a raw menu into directory entries.
#[must_use]
pub fn parse_directory(buffer: &[u8]) -> Vec<DirectoryEntry> {
    let data = String::from_utf8_lossy(buffer).replace("\r\n", "\n");
    let mut entries = Vec::new();

    for raw_line in data.split('\n') {
        let line = raw_line.trim();
        if line.is_empty() {
            break;
        }

        if let Some(entry) = parse_line(line) {
            entries.push(entry);
        }
    }

    entries
}

/// Joins entries into the normalized listing, one per line.
#[must_use]
pub fn normalize(entries: &[DirectoryEntry]) -> String {
    entries
        .iter()
        .map(DirectoryEntry::to_line)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Decodes a text document.
///
/// Line endings become `\n` and a trailing lone `.` line is dropped.
#[must_use]
pub fn decode_text(buffer: &[u8]) -> String {
    let text = String::from_utf8_lossy(buffer).replace("\r\n", "\n");
    let trimmed = text.trim_end_matches('\n');

    match trimmed.strip_suffix(DOT_LINE) {
        Some(rest) if rest.is_empty() || rest.ends_with('\n') => {
            rest.trim_end_matches('\n').to_string()
        }
        _ => trimmed.to_string(),
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Parses one trimmed, non-empty directory line.
fn parse_line(line: &str) -> Option<DirectoryEntry> {
    let mut chars = line.chars();
    let item_type = ItemType::from(chars.next()?);
    let rest = chars.as_str();

    if item_type.is_info() {
        let text = rest.split(FIELD_SEPARATOR).next().unwrap_or_default().trim();
        return (!text.is_empty()).then(|| DirectoryEntry::info(text));
    }

    if line == DOT_LINE {
        return None;
    }

    let mut fields = rest.split(FIELD_SEPARATOR);
    let display_text = fields.next().unwrap_or_default();
    let selector = fields.next();
    let host = fields.next();
    let port = fields.next();

    if port.is_none() {
        warn!(line = %line, "Directory line has fewer than four fields");
    }

    Some(DirectoryEntry::Link {
        item_type,
        display_text: display_text.to_string(),
        selector: selector.unwrap_or_default().to_string(),
        host: host.unwrap_or_default().to_string(),
        port: port.unwrap_or_default().to_string(),
    })
}

// ============================================================================
// Tests
// ============================================================================
